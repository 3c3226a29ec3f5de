//! # homehub-adapter-http-axum
//!
//! HTTP API adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Expose the read endpoints (devices, logs, energy, security)
//! - Accept control commands and natural-language commands
//! - Stream live notifications to observers over SSE
//! - Map [`HubError`] values onto HTTP status codes
//!
//! ## Dependency rule
//! Depends on `homehub-app` and `homehub-domain`. The `app` and `domain`
//! crates never reference this adapter.
//!
//! [`HubError`]: homehub_domain::error::HubError

pub mod api;
pub mod error;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build;
pub use state::AppState;
