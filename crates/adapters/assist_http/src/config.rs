//! Translation service configuration.

use std::time::Duration;

use serde::Deserialize;

fn default_timeout_secs() -> u64 {
    30
}

/// Connection settings for the translation service.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistConfig {
    /// Base URL of the OpenAI-compatible chat endpoint
    /// (e.g. `http://localhost:11434/v1`).
    pub endpoint: String,

    /// Model name to request.
    pub model: String,

    /// Bearer token, when the service requires one.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl AssistConfig {
    /// The timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
