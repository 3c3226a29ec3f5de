//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod assistant;
#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod energy;
#[allow(clippy::missing_errors_doc)]
pub mod security;
pub mod sse;

use axum::Router;
use axum::routing::{get, post};

use homehub_app::ports::{
    CommandPublisher, CommandTranslator, DeviceLogStore, DeviceRepository, EnergyStore, Notifier,
    SecurityEventStore,
};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<DR, LS, ES, SS, CP, NP, CT>() -> Router<AppState<DR, LS, ES, SS, CP, NP, CT>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: DeviceLogStore + Send + Sync + 'static,
    ES: EnergyStore + Send + Sync + 'static,
    SS: SecurityEventStore + Send + Sync + 'static,
    CP: CommandPublisher + Send + Sync + 'static,
    NP: Notifier + Send + Sync + 'static,
    CT: CommandTranslator + Send + Sync + 'static,
{
    Router::new()
        // Devices
        .route("/devices", get(devices::list::<DR, LS, ES, SS, CP, NP, CT>))
        .route(
            "/devices/{id}",
            get(devices::get::<DR, LS, ES, SS, CP, NP, CT>),
        )
        .route(
            "/devices/{id}/logs",
            get(devices::logs::<DR, LS, ES, SS, CP, NP, CT>),
        )
        .route(
            "/devices/{id}/control",
            post(devices::control::<DR, LS, ES, SS, CP, NP, CT>),
        )
        // Energy
        .route(
            "/energy/summary",
            get(energy::summary::<DR, LS, ES, SS, CP, NP, CT>),
        )
        // Security
        .route(
            "/security/events",
            get(security::recent::<DR, LS, ES, SS, CP, NP, CT>),
        )
        // Assistant
        .route(
            "/assistant/command",
            post(assistant::handle::<DR, LS, ES, SS, CP, NP, CT>),
        )
        // Live notifications
        .route(
            "/events/stream",
            get(sse::stream::<DR, LS, ES, SS, CP, NP, CT>),
        )
}
