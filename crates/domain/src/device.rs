//! Device — a controllable or sensing unit provisioned on the bus.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::payload::Payload;
use crate::time::Timestamp;

/// Stable, unique device identifier, as provisioned on the bus
/// (e.g. `living_room_light`). Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Wrap an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for DeviceId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for DeviceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Device category. Open set: unrecognized strings round-trip through
/// [`DeviceKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceKind {
    Light,
    Fan,
    Ac,
    MotionSensor,
    Other(String),
}

impl DeviceKind {
    /// The canonical string form stored in the database and on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Light => "light",
            Self::Fan => "fan",
            Self::Ac => "ac",
            Self::MotionSensor => "motion_sensor",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for DeviceKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "light" => Self::Light,
            "fan" => Self::Fan,
            "ac" => Self::Ac,
            "motion_sensor" => Self::MotionSensor,
            _ => Self::Other(value),
        }
    }
}

impl From<DeviceKind> for String {
    fn from(value: DeviceKind) -> Self {
        value.as_str().to_owned()
    }
}

/// Device-reported availability. Open set: devices may report arbitrary
/// status strings, which round-trip through [`DeviceStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceStatus {
    Online,
    Offline,
    Other(String),
}

impl DeviceStatus {
    /// The canonical string form stored in the database and on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for DeviceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "online" => Self::Online,
            "offline" => Self::Offline,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for DeviceStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<DeviceStatus> for String {
    fn from(value: DeviceStatus) -> Self {
        value.as_str().to_owned()
    }
}

/// The persisted record describing a single controllable or sensing unit.
///
/// `config` is an open mapping; each device kind interprets a subset of its
/// keys (brightness, speed, temperature, mode, …).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub kind: DeviceKind,
    pub room: String,
    pub status: DeviceStatus,
    pub last_seen: Option<Timestamp>,
    pub config: Payload,
}

impl Device {
    /// A minimal row for a device first seen through a status message,
    /// before any out-of-band provisioning.
    #[must_use]
    pub fn auto_provisioned(id: DeviceId) -> Self {
        Self {
            name: id.to_string(),
            id,
            kind: DeviceKind::Other("unknown".to_owned()),
            room: "unassigned".to_owned(),
            status: DeviceStatus::Offline,
            last_seen: None,
            config: Payload::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_known_kind_through_string() {
        let kind = DeviceKind::from("motion_sensor".to_owned());
        assert_eq!(kind, DeviceKind::MotionSensor);
        assert_eq!(kind.as_str(), "motion_sensor");
    }

    #[test]
    fn should_preserve_unknown_kind() {
        let kind = DeviceKind::from("humidifier".to_owned());
        assert_eq!(kind, DeviceKind::Other("humidifier".to_owned()));
        assert_eq!(kind.as_str(), "humidifier");
    }

    #[test]
    fn should_preserve_free_form_status() {
        let status = DeviceStatus::from("rebooting");
        assert_eq!(status.as_str(), "rebooting");
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"rebooting\"");
    }

    #[test]
    fn should_serialize_status_as_plain_string() {
        let json = serde_json::to_string(&DeviceStatus::Online).unwrap();
        assert_eq!(json, "\"online\"");
        let parsed: DeviceStatus = serde_json::from_str("\"offline\"").unwrap();
        assert_eq!(parsed, DeviceStatus::Offline);
    }

    #[test]
    fn should_name_auto_provisioned_device_after_its_id() {
        let device = Device::auto_provisioned(DeviceId::from("attic_light"));
        assert_eq!(device.name, "attic_light");
        assert_eq!(device.room, "unassigned");
        assert!(device.last_seen.is_none());
    }
}
