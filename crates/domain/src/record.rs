//! Append-only record types mirroring the persisted tables.

use serde::{Deserialize, Serialize};

use crate::device::DeviceId;
use crate::time::Timestamp;

/// What a device-log row records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogAction {
    StatusUpdate,
    ControlCommand,
}

impl LogAction {
    /// The canonical string form stored in the database.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StatusUpdate => "status_update",
            Self::ControlCommand => "control_command",
        }
    }
}

/// One row of the device event log. Write-once; never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceLogEntry {
    pub device_id: DeviceId,
    pub action: LogAction,
    /// Serialized payload or command body.
    pub value: String,
    pub timestamp: Timestamp,
}

/// One instantaneous power reading. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergySample {
    pub device_id: DeviceId,
    pub power_watts: f64,
    pub timestamp: Timestamp,
}

/// A derived security event, created as a side effect of interpreting a
/// sensor payload. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityEvent {
    pub sensor_id: DeviceId,
    pub event_type: String,
    pub description: String,
    pub timestamp: Timestamp,
}

impl SecurityEvent {
    /// The event type recorded for a motion trigger.
    pub const MOTION_DETECTED: &'static str = "motion_detected";

    /// Build the standard motion event for a sensor.
    #[must_use]
    pub fn motion(sensor_id: DeviceId, timestamp: Timestamp) -> Self {
        Self {
            sensor_id,
            event_type: Self::MOTION_DETECTED.to_owned(),
            description: "Motion detected by sensor".to_owned(),
            timestamp,
        }
    }
}

/// Read-side aggregation row: average and peak power for one device over
/// the current day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergySummaryRow {
    pub device: String,
    pub avg_power: f64,
    pub peak_power: f64,
}
