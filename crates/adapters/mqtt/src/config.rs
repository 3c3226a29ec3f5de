//! MQTT gateway configuration.

use serde::Deserialize;

/// Connection settings for the MQTT gateway.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// Broker hostname or IP.
    pub host: String,
    /// Broker port.
    pub port: u16,
    /// Client identifier presented to the broker.
    pub client_id: String,
    /// First topic segment shared by every device topic.
    pub topic_prefix: String,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1883,
            client_id: "homehub".to_string(),
            topic_prefix: "smarthome".to_string(),
        }
    }
}
