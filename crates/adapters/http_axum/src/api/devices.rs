//! JSON REST handlers for devices: list, get, logs and control.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use homehub_app::ports::{
    CommandPublisher, CommandTranslator, DeviceLogStore, DeviceRepository, EnergyStore, Notifier,
    SecurityEventStore,
};
use homehub_domain::device::{Device, DeviceId};
use homehub_domain::record::DeviceLogEntry;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_LOG_LIMIT: usize = 50;

/// Query parameters for the logs endpoint.
#[derive(Deserialize)]
pub struct LogsQuery {
    pub limit: Option<usize>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Device>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the logs endpoint.
pub enum LogsResponse {
    Ok(Json<Vec<DeviceLogEntry>>),
}

impl IntoResponse for LogsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the control endpoint.
pub enum ControlResponse {
    /// The command was accepted by the bus gateway; delivery to the device
    /// itself is not confirmed.
    Accepted,
}

impl IntoResponse for ControlResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted => StatusCode::ACCEPTED.into_response(),
        }
    }
}

/// `GET /api/devices`
pub async fn list<DR, LS, ES, SS, CP, NP, CT>(
    State(state): State<AppState<DR, LS, ES, SS, CP, NP, CT>>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: DeviceLogStore + Send + Sync + 'static,
    ES: EnergyStore + Send + Sync + 'static,
    SS: SecurityEventStore + Send + Sync + 'static,
    CP: CommandPublisher + Send + Sync + 'static,
    NP: Notifier + Send + Sync + 'static,
    CT: CommandTranslator + Send + Sync + 'static,
{
    let devices = state.hub.list_devices().await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `GET /api/devices/{id}`
pub async fn get<DR, LS, ES, SS, CP, NP, CT>(
    State(state): State<AppState<DR, LS, ES, SS, CP, NP, CT>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: DeviceLogStore + Send + Sync + 'static,
    ES: EnergyStore + Send + Sync + 'static,
    SS: SecurityEventStore + Send + Sync + 'static,
    CP: CommandPublisher + Send + Sync + 'static,
    NP: Notifier + Send + Sync + 'static,
    CT: CommandTranslator + Send + Sync + 'static,
{
    let device = state.hub.device(&DeviceId::from(id)).await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `GET /api/devices/{id}/logs`
pub async fn logs<DR, LS, ES, SS, CP, NP, CT>(
    State(state): State<AppState<DR, LS, ES, SS, CP, NP, CT>>,
    Path(id): Path<String>,
    Query(query): Query<LogsQuery>,
) -> Result<LogsResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: DeviceLogStore + Send + Sync + 'static,
    ES: EnergyStore + Send + Sync + 'static,
    SS: SecurityEventStore + Send + Sync + 'static,
    CP: CommandPublisher + Send + Sync + 'static,
    NP: Notifier + Send + Sync + 'static,
    CT: CommandTranslator + Send + Sync + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_LOG_LIMIT);
    let entries = state.hub.device_logs(&DeviceId::from(id), limit).await?;
    Ok(LogsResponse::Ok(Json(entries)))
}

/// `POST /api/devices/{id}/control`
pub async fn control<DR, LS, ES, SS, CP, NP, CT>(
    State(state): State<AppState<DR, LS, ES, SS, CP, NP, CT>>,
    Path(id): Path<String>,
    Json(command): Json<serde_json::Value>,
) -> Result<ControlResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: DeviceLogStore + Send + Sync + 'static,
    ES: EnergyStore + Send + Sync + 'static,
    SS: SecurityEventStore + Send + Sync + 'static,
    CP: CommandPublisher + Send + Sync + 'static,
    NP: Notifier + Send + Sync + 'static,
    CT: CommandTranslator + Send + Sync + 'static,
{
    state.hub.dispatch(&DeviceId::from(id), &command).await?;
    Ok(ControlResponse::Accepted)
}
