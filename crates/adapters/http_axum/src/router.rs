//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use homehub_app::ports::{
    CommandPublisher, CommandTranslator, DeviceLogStore, DeviceRepository, EnergyStore, Notifier,
    SecurityEventStore,
};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts API routes under `/api`. Includes a [`TraceLayer`] that logs
/// each HTTP request/response at the `DEBUG` level using the `tracing`
/// ecosystem.
pub fn build<DR, LS, ES, SS, CP, NP, CT>(state: AppState<DR, LS, ES, SS, CP, NP, CT>) -> Router
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
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
