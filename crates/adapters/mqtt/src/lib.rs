//! # homehub-adapter-mqtt
//!
//! MQTT bus gateway built on [rumqttc](https://docs.rs/rumqttc).
//!
//! ## Responsibilities
//! - Maintain the broker connection and reconnect with backoff
//! - Subscribe to the device topic filters and forward every inbound
//!   message to the application's [`MessageHandler`]
//! - Expose a cheap-to-clone [`CommandPublisher`] for outbound commands
//! - Surface connectivity transitions as notifications
//!
//! ## Dependency rule
//! Depends on `homehub-app` (for port traits) and `homehub-domain` (for
//! topic helpers). The `app` and `domain` crates never reference this
//! adapter.
//!
//! [`MessageHandler`]: homehub_app::ports::MessageHandler
//! [`CommandPublisher`]: homehub_app::ports::CommandPublisher

pub mod config;
pub mod gateway;

pub use config::MqttConfig;
pub use gateway::{CommandSender, Gateway};
