//! # homehubd — home hub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize the `SQLite` connection pool, run migrations, seed samples
//! - Construct the storage adapters
//! - Construct the hub and (optionally) the assistant, injecting adapters
//!   via port traits
//! - Connect the MQTT gateway and spawn its event loop
//! - Build the axum router, bind to a TCP port and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use homehub_adapter_assist_http::HttpTranslator;
use homehub_adapter_http_axum::AppState;
use homehub_adapter_mqtt::Gateway;
use homehub_adapter_storage_sqlite_sqlx::{
    Config as StorageConfig, SqliteDeviceLogStore, SqliteDeviceRepository, SqliteEnergyStore,
    SqliteSecurityEventStore, seed,
};
use homehub_app::assistant::Assistant;
use homehub_app::event_bus::Broadcaster;
use homehub_app::hub::Hub;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = StorageConfig {
        database_url: config.database.url.clone(),
    }
    .build()
    .await?;
    seed::seed_if_empty(db.pool()).await?;
    let pool = db.pool().clone();

    // Storage adapters
    let device_repo = SqliteDeviceRepository::new(pool.clone());
    let log_store = SqliteDeviceLogStore::new(pool.clone());
    let energy_store = SqliteEnergyStore::new(pool.clone());
    let security_store = SqliteSecurityEventStore::new(pool);

    // Notification fan-out
    let events = Arc::new(Broadcaster::new(256));

    // Bus gateway
    let gateway = Gateway::new(&config.mqtt);
    let sender = gateway.sender();

    // Hub
    let hub = Arc::new(Hub::new(
        device_repo,
        log_store,
        energy_store,
        security_store,
        sender,
        Arc::clone(&events),
        config.mqtt.topic_prefix.clone(),
    ));

    tokio::spawn(gateway.run(Arc::clone(&hub), Arc::clone(&events)));

    // Assistant (optional)
    let assistant = match config.assistant.clone() {
        Some(assist) => Some(Arc::new(Assistant::new(
            HttpTranslator::new(assist)?,
            Arc::clone(&hub),
        ))),
        None => {
            tracing::info!("no translation service configured, assistant disabled");
            None
        }
    };

    // HTTP
    let state = AppState::new(hub, assistant, events);
    let app = homehub_adapter_http_axum::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "homehubd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
