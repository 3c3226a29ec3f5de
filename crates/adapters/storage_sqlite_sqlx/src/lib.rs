//! # homehub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the storage port traits defined in `homehub-app::ports`
//! - Manage the `SQLite` connection pool lifecycle
//! - Run database migrations (sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Seed the sample device set on first boot
//!
//! ## Dependency rule
//! Depends on `homehub-app` (for port traits) and `homehub-domain` (for
//! domain types). The `app` and `domain` crates never reference this
//! adapter.

pub mod device_repo;
pub mod energy_store;
pub mod error;
pub mod log_store;
pub mod pool;
pub mod security_store;
pub mod seed;

pub use device_repo::SqliteDeviceRepository;
pub use energy_store::SqliteEnergyStore;
pub use error::StorageError;
pub use log_store::SqliteDeviceLogStore;
pub use pool::{Config, Database};
pub use security_store::SqliteSecurityEventStore;
