//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homehub_domain::error::HubError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`HubError`] to an HTTP response with appropriate status code.
pub struct ApiError(HubError);

impl From<HubError> for ApiError {
    fn from(err: HubError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            HubError::MalformedPayload(_) | HubError::UnroutableTopic(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            HubError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            HubError::Translation(message) => (StatusCode::BAD_GATEWAY, message.clone()),
            HubError::Publish(message) => (StatusCode::SERVICE_UNAVAILABLE, message.clone()),
            HubError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homehub_domain::error::NotFoundError;

    fn status_of(err: HubError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn should_map_each_error_variant_to_its_status() {
        assert_eq!(
            status_of(HubError::UnroutableTopic("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(HubError::NotFound(NotFoundError {
                entity: "Device",
                id: "ghost".into(),
            })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(HubError::Translation("down".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(HubError::Publish("disconnected".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn should_hide_storage_details_from_the_body() {
        let err = HubError::Storage("table devices is corrupt".into());
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
