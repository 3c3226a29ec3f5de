//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `homehub.toml` in the working directory. Every field has a
//! sensible default so the file is optional (the assistant section is the
//! exception: without it, natural-language commands stay disabled).
//! Environment variables take precedence over file values.

use serde::Deserialize;

use homehub_adapter_assist_http::AssistConfig;
use homehub_adapter_mqtt::MqttConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// MQTT broker settings.
    pub mqtt: MqttConfig,
    /// Translation service settings; absent means the assistant endpoint
    /// answers 503.
    pub assistant: Option<AssistConfig>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

const DEFAULT_ASSIST_MODEL: &str = "gemini-1.5-flash";

impl Config {
    /// Load configuration from `homehub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if
    /// validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("homehub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HOMEHUB_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("HOMEHUB_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("HOMEHUB_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("HOMEHUB_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("HOMEHUB_MQTT_HOST") {
            self.mqtt.host = val;
        }
        if let Ok(val) = std::env::var("HOMEHUB_MQTT_PORT") {
            if let Ok(port) = val.parse() {
                self.mqtt.port = port;
            }
        }
        if let Ok(val) = std::env::var("HOMEHUB_TOPIC_PREFIX") {
            self.mqtt.topic_prefix = val;
        }
        if let Ok(endpoint) = std::env::var("HOMEHUB_ASSIST_ENDPOINT") {
            let assist = self.assistant.get_or_insert_with(|| AssistConfig {
                endpoint: String::new(),
                model: DEFAULT_ASSIST_MODEL.to_string(),
                api_key: None,
                timeout_secs: 30,
            });
            assist.endpoint = endpoint;
        }
        if let Some(assist) = &mut self.assistant {
            if let Ok(val) = std::env::var("HOMEHUB_ASSIST_MODEL") {
                assist.model = val;
            }
            if let Ok(val) = std::env::var("HOMEHUB_ASSIST_API_KEY") {
                assist.api_key = Some(val);
            }
        }
        if let Ok(val) = std::env::var("HOMEHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.mqtt.topic_prefix.is_empty() || self.mqtt.topic_prefix.contains('/') {
            return Err(ConfigError::Validation(
                "topic prefix must be a single non-empty segment".to_string(),
            ));
        }
        if let Some(assist) = &self.assistant {
            if assist.endpoint.is_empty() {
                return Err(ConfigError::Validation(
                    "assist endpoint must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:homehub.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homehubd=info,homehub=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
