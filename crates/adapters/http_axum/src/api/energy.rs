//! JSON REST handler for the energy summary.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use homehub_app::ports::{
    CommandPublisher, CommandTranslator, DeviceLogStore, DeviceRepository, EnergyStore, Notifier,
    SecurityEventStore,
};
use homehub_domain::record::EnergySummaryRow;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the summary endpoint.
pub enum SummaryResponse {
    Ok(Json<Vec<EnergySummaryRow>>),
}

impl IntoResponse for SummaryResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/energy/summary` — average and peak power per device for the
/// current UTC day.
pub async fn summary<DR, LS, ES, SS, CP, NP, CT>(
    State(state): State<AppState<DR, LS, ES, SS, CP, NP, CT>>,
) -> Result<SummaryResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: DeviceLogStore + Send + Sync + 'static,
    ES: EnergyStore + Send + Sync + 'static,
    SS: SecurityEventStore + Send + Sync + 'static,
    CP: CommandPublisher + Send + Sync + 'static,
    NP: Notifier + Send + Sync + 'static,
    CT: CommandTranslator + Send + Sync + 'static,
{
    let rows = state.hub.energy_summary_today().await?;
    Ok(SummaryResponse::Ok(Json(rows)))
}
