//! Command dispatch and natural-language translation value types.

use serde::{Deserialize, Serialize};

use crate::device::{DeviceId, DeviceKind};

/// One device-targeted command, as produced by the translator or a direct
/// API call. The command body is an arbitrary JSON object interpreted by
/// the target device out-of-band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceAction {
    pub device_id: DeviceId,
    pub command: serde_json::Value,
}

/// The structured result of translating free text into device actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    /// Human-readable response to show the user.
    pub response: String,
    /// Device actions to dispatch, possibly empty.
    #[serde(default)]
    pub actions: Vec<DeviceAction>,
}

/// Snapshot of one device's identity, handed to the translator as context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSummary {
    pub id: DeviceId,
    pub name: String,
    pub kind: DeviceKind,
    pub room: String,
}

/// One failed action from a batch dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionFailure {
    pub device_id: DeviceId,
    pub error: String,
}

/// Outcome of a batch dispatch: every action is attempted, failures are
/// collected rather than aborting the batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Number of actions that dispatched successfully.
    pub executed: usize,
    pub failures: Vec<ActionFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_deserialize_translation_from_wire_shape() {
        let raw = r#"{
            "response": "Turning on the fan",
            "actions": [
                {"device_id": "fan1", "command": {"power": "on", "speed": 3}}
            ]
        }"#;
        let translation: Translation = serde_json::from_str(raw).unwrap();
        assert_eq!(translation.actions.len(), 1);
        assert_eq!(translation.actions[0].device_id, DeviceId::from("fan1"));
        assert_eq!(translation.actions[0].command["speed"], json!(3));
    }

    #[test]
    fn should_default_actions_to_empty_when_absent() {
        let translation: Translation =
            serde_json::from_str(r#"{"response": "Nothing to do"}"#).unwrap();
        assert!(translation.actions.is_empty());
    }
}
