//! Common error taxonomy used across the workspace.
//!
//! Every layer defines its own typed errors and converts into [`HubError`]
//! at the boundary. No failure here is fatal to the process; callers always
//! receive a typed result.

/// A lookup that found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// What kind of thing was looked up (e.g. `"Device"`).
    pub entity: &'static str,
    /// The identifier that missed.
    pub id: String,
}

/// Workspace-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// Inbound payload was not a JSON object. Non-fatal: logged and dropped.
    #[error("malformed payload: not a JSON object")]
    MalformedPayload(#[source] serde_json::Error),

    /// Topic did not match a recognized shape. Non-fatal: logged and dropped.
    #[error("unroutable topic {0:?}")]
    UnroutableTopic(String),

    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The persistent store failed. Surfaced to the caller, never swallowed.
    #[error("storage failure")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The bus gateway could not accept a publish.
    #[error("bus publish failed: {0}")]
    Publish(String),

    /// The external command translation call failed or returned an
    /// unparseable structure. No actions are executed in that case.
    #[error("command translation failed: {0}")]
    Translation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Device",
            id: "light1".to_owned(),
        };
        assert_eq!(err.to_string(), "Device light1 not found");
        let hub_err: HubError = err.into();
        assert!(matches!(hub_err, HubError::NotFound(_)));
    }

    #[test]
    fn should_keep_publish_reason_in_message() {
        let err = HubError::Publish("gateway disconnected".to_owned());
        assert!(err.to_string().contains("gateway disconnected"));
    }
}
