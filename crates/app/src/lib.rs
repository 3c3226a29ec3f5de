//! # homehub-app
//!
//! Application core — the **Device State Hub** and the port definitions
//! (traits) adapters implement.
//!
//! ## Responsibilities
//! - Define **driven/outbound ports**:
//!   - [`ports::DeviceRepository`], [`ports::DeviceLogStore`],
//!     [`ports::EnergyStore`], [`ports::SecurityEventStore`] — persistence
//!   - [`ports::CommandPublisher`] — outbound bus publishes
//!   - [`ports::Notifier`] — observer fan-out
//!   - [`ports::CommandTranslator`] — natural-language translation
//! - Define the **driving/inbound port** [`ports::MessageHandler`], which
//!   the bus gateway invokes and the [`hub::Hub`] implements
//! - Own the canonical in-memory device/sensor state and the
//!   ingestion/classification/dispatch logic ([`hub`])
//! - Provide in-process fan-out that doesn't need IO ([`event_bus`])
//! - Funnel natural-language command results through the hub's dispatch
//!   entry point ([`assistant`])
//!
//! ## Dependency rule
//! Depends on `homehub-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod assistant;
pub mod event_bus;
pub mod hub;
pub mod ports;
