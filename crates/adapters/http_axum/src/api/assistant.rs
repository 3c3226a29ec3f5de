//! JSON REST handler for natural-language commands.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use homehub_app::assistant::AssistantReply;
use homehub_app::ports::{
    CommandPublisher, CommandTranslator, DeviceLogStore, DeviceRepository, EnergyStore, Notifier,
    SecurityEventStore,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body: the user's free-text command.
#[derive(Deserialize)]
pub struct AssistRequest {
    pub command: String,
}

/// Possible responses from the assistant endpoint.
pub enum AssistResponse {
    Ok(Json<AssistantReply>),
    /// No translation service is configured on this deployment.
    NotConfigured,
}

impl IntoResponse for AssistResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::NotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({"error": "assistant not configured"})),
            )
                .into_response(),
        }
    }
}

/// `POST /api/assistant/command`
pub async fn handle<DR, LS, ES, SS, CP, NP, CT>(
    State(state): State<AppState<DR, LS, ES, SS, CP, NP, CT>>,
    Json(req): Json<AssistRequest>,
) -> Result<AssistResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: DeviceLogStore + Send + Sync + 'static,
    ES: EnergyStore + Send + Sync + 'static,
    SS: SecurityEventStore + Send + Sync + 'static,
    CP: CommandPublisher + Send + Sync + 'static,
    NP: Notifier + Send + Sync + 'static,
    CT: CommandTranslator + Send + Sync + 'static,
{
    let Some(assistant) = &state.assistant else {
        return Ok(AssistResponse::NotConfigured);
    };

    let reply = assistant.handle(&req.command).await?;
    Ok(AssistResponse::Ok(Json(reply)))
}
