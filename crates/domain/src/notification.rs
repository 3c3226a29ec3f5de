//! Notifications pushed to live observers.
//!
//! These are the hub-originated real-time events fanned out over the push
//! channel: device updates, derived security alerts, and bus connectivity
//! changes. Serialized with an `event`/`data` envelope so observers can
//! route on the event name.

use serde::{Deserialize, Serialize};

use crate::device::DeviceId;
use crate::payload::Payload;
use crate::time::Timestamp;

/// A real-time event delivered to every connected observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Notification {
    /// A device's status payload was accepted.
    DeviceUpdate { device_id: DeviceId, data: Payload },
    /// A sensor payload carried a recognized trigger condition.
    SecurityAlert {
        sensor_id: DeviceId,
        event: String,
        timestamp: Timestamp,
    },
    /// The bus gateway's connection state changed.
    BusConnectivity { connected: bool },
}

impl Notification {
    /// The event name observers route on.
    #[must_use]
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::DeviceUpdate { .. } => "device_update",
            Self::SecurityAlert { .. } => "security_alert",
            Self::BusConnectivity { .. } => "bus_connectivity",
        }
    }
}
