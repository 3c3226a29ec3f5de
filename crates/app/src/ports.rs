//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside
//! world. They are defined here (in `app`) so that both the use-case layer
//! and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod bus;
pub mod notifier;
pub mod storage;
pub mod translator;

pub use bus::{CommandPublisher, MessageHandler};
pub use notifier::Notifier;
pub use storage::{DeviceLogStore, DeviceRepository, EnergyStore, SecurityEventStore};
pub use translator::CommandTranslator;
