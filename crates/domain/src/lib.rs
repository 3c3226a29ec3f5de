//! # homehub-domain
//!
//! Domain model — devices, payloads, topics, persisted records, and
//! notifications. Pure data and logic: no IO, no frameworks.
//!
//! ## Responsibilities
//! - Define the [`Device`](device::Device) record and its open-set enums
//! - Define the open key-value [`Payload`](payload::Payload) with typed
//!   accessors for the well-known optional fields
//! - Classify bus topics ([`topic`]) and extract device ids
//! - Define the append-only record types mirroring the persisted tables
//! - Define the [`Notification`](notification::Notification) events pushed
//!   to live observers
//! - Define the [`HubError`](error::HubError) taxonomy
//!
//! ## Dependency rule
//! Depends only on serde/serde_json/chrono/thiserror. Every other crate in
//! the workspace depends on *this* one, never the reverse.

pub mod command;
pub mod device;
pub mod error;
pub mod notification;
pub mod payload;
pub mod record;
pub mod time;
pub mod topic;
