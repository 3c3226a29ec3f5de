//! JSON REST handler for recent security events.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use homehub_app::ports::{
    CommandPublisher, CommandTranslator, DeviceLogStore, DeviceRepository, EnergyStore, Notifier,
    SecurityEventStore,
};
use homehub_domain::record::SecurityEvent;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_EVENT_LIMIT: usize = 10;

/// Query parameters for the recent-events endpoint.
#[derive(Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

/// Possible responses from the recent-events endpoint.
pub enum RecentResponse {
    Ok(Json<Vec<SecurityEvent>>),
}

impl IntoResponse for RecentResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/security/events` — most recent security events, newest-first.
pub async fn recent<DR, LS, ES, SS, CP, NP, CT>(
    State(state): State<AppState<DR, LS, ES, SS, CP, NP, CT>>,
    Query(query): Query<RecentQuery>,
) -> Result<RecentResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: DeviceLogStore + Send + Sync + 'static,
    ES: EnergyStore + Send + Sync + 'static,
    SS: SecurityEventStore + Send + Sync + 'static,
    CP: CommandPublisher + Send + Sync + 'static,
    NP: Notifier + Send + Sync + 'static,
    CT: CommandTranslator + Send + Sync + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_EVENT_LIMIT);
    let events = state.hub.recent_security_events(limit).await?;
    Ok(RecentResponse::Ok(Json(events)))
}
