//! # homehub-adapter-assist-http
//!
//! HTTP client for the natural-language command translation service,
//! built on [reqwest](https://docs.rs/reqwest).
//!
//! The service is an OpenAI-compatible chat endpoint: the adapter sends
//! the user's free text plus a rendered device inventory, and expects the
//! model to answer with a single JSON object carrying a human-readable
//! `response` and a list of `actions`. The adapter owns prompt rendering
//! and reply parsing; the rest of the system only sees the
//! [`CommandTranslator`] port.
//!
//! [`CommandTranslator`]: homehub_app::ports::CommandTranslator

pub mod client;
pub mod config;

pub use client::HttpTranslator;
pub use config::AssistConfig;
