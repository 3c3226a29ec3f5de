//! Bus topic classification and device-id extraction.
//!
//! Topics are shaped `<prefix>/<deviceId>/<class>`. Classification is
//! substring based with a fixed priority: a topic containing `status` is a
//! status message, otherwise one containing `sensor` is a sensor message,
//! otherwise one containing `energy` is an energy message. First match
//! wins; the order must not change.

use crate::device::DeviceId;

/// The three inbound message classes the hub routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicClass {
    Status,
    Sensor,
    Energy,
}

/// Classify a topic by substring, in fixed priority order.
#[must_use]
pub fn classify(topic: &str) -> Option<TopicClass> {
    if topic.contains("status") {
        Some(TopicClass::Status)
    } else if topic.contains("sensor") {
        Some(TopicClass::Sensor)
    } else if topic.contains("energy") {
        Some(TopicClass::Energy)
    } else {
        None
    }
}

/// Extract the device id from the second path segment, if the topic has
/// one. The segment may be empty (`home//status`), which callers treat as
/// a no-op rather than an error.
#[must_use]
pub fn device_id(topic: &str) -> Option<DeviceId> {
    topic.split('/').nth(1).map(DeviceId::from)
}

/// The control topic commands are published to for a given device.
#[must_use]
pub fn control_topic(prefix: &str, device_id: &DeviceId) -> String {
    format!("{prefix}/{device_id}/control")
}

/// The four wildcard filters a gateway subscribes to.
#[must_use]
pub fn subscription_filters(prefix: &str) -> [String; 4] {
    [
        format!("{prefix}/+/status"),
        format!("{prefix}/+/control"),
        format!("{prefix}/+/sensor"),
        format!("{prefix}/+/energy"),
    ]
}
