//! The HTTP translator client.

use reqwest::Client;
use serde::Deserialize;

use homehub_app::ports::CommandTranslator;
use homehub_domain::command::{DeviceSummary, Translation};
use homehub_domain::error::HubError;

use crate::config::AssistConfig;

/// Errors raised while calling or interpreting the translation service.
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service answered with status {0}")]
    Status(u16),

    #[error("service answered without any choice")]
    EmptyReply,

    #[error("service answer is not a translation: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<AssistError> for HubError {
    fn from(err: AssistError) -> Self {
        Self::Translation(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Client for the OpenAI-compatible chat endpoint.
pub struct HttpTranslator {
    config: AssistConfig,
    client: Client,
}

impl HttpTranslator {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::Http`] when the underlying client cannot be
    /// constructed.
    pub fn new(config: AssistConfig) -> Result<Self, AssistError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { config, client })
    }

    async fn request(&self, prompt: String) -> Result<Translation, AssistError> {
        let url = format!("{}/chat/completions", self.config.endpoint);
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}],
            "stream": false,
        });

        let mut request = self.client.post(&url).json(&body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssistError::Status(status.as_u16()));
        }

        let reply: ChatResponse = response.json().await?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(AssistError::EmptyReply)?;

        parse_reply(&content)
    }
}

impl CommandTranslator for HttpTranslator {
    async fn translate(
        &self,
        input: &str,
        context: &[DeviceSummary],
    ) -> Result<Translation, HubError> {
        let prompt = render_prompt(input, context);
        tracing::debug!(model = %self.config.model, devices = context.len(), "translating command");

        let translation = self.request(prompt).await?;
        tracing::debug!(actions = translation.actions.len(), "translation received");
        Ok(translation)
    }
}

/// Render the instruction prompt: the user's text, the device inventory,
/// and the expected answer shape.
fn render_prompt(input: &str, context: &[DeviceSummary]) -> String {
    let mut inventory = String::from("Available devices:\n");
    for device in context {
        inventory.push_str(&format!(
            "- {} (ID: {}, Type: {}, Room: {})\n",
            device.name,
            device.id,
            device.kind.as_str(),
            device.room
        ));
    }

    format!(
        "You are a smart home assistant. Based on this command: \"{input}\"\n\n\
         {inventory}\n\
         Generate a JSON response with device control commands. Format:\n\
         {{\n\
           \"actions\": [\n\
             {{\"device_id\": \"device_id\", \"command\": {{\"action\": \"value\"}}}}\n\
           ],\n\
           \"response\": \"Human-readable response\"\n\
         }}\n\n\
         For lights: {{\"power\": \"on/off\", \"brightness\": 0-100}}\n\
         For fans: {{\"power\": \"on/off\", \"speed\": 0-5}}\n\
         For AC: {{\"power\": \"on/off\", \"temperature\": 16-30, \"mode\": \"cool/heat/auto\"}}\n\n\
         Only return valid JSON."
    )
}

/// Parse the model's text answer into a [`Translation`], tolerating a
/// markdown code fence around the JSON object.
fn parse_reply(content: &str) -> Result<Translation, AssistError> {
    let stripped = strip_code_fence(content.trim());
    Ok(serde_json::from_str(stripped)?)
}

fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    // Drop the language tag line, then the closing fence.
    let rest = rest
        .split_once('\n')
        .map_or(rest, |(_, body)| body);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use homehub_domain::device::{DeviceId, DeviceKind};

    fn summary(id: &str, name: &str, kind: DeviceKind, room: &str) -> DeviceSummary {
        DeviceSummary {
            id: DeviceId::from(id),
            name: name.to_string(),
            kind,
            room: room.to_string(),
        }
    }

    #[test]
    fn should_render_one_inventory_line_per_device() {
        let context = vec![
            summary("light1", "Living Room Light", DeviceKind::Light, "living_room"),
            summary("fan1", "Bedroom Fan", DeviceKind::Fan, "bedroom"),
        ];

        let prompt = render_prompt("turn everything off", &context);
        assert!(prompt.contains("turn everything off"));
        assert!(prompt.contains("- Living Room Light (ID: light1, Type: light, Room: living_room)"));
        assert!(prompt.contains("- Bedroom Fan (ID: fan1, Type: fan, Room: bedroom)"));
    }

    #[test]
    fn should_parse_plain_json_reply() {
        let reply = r#"{"response": "Done", "actions": [{"device_id": "light1", "command": {"power": "on"}}]}"#;
        let translation = parse_reply(reply).unwrap();
        assert_eq!(translation.response, "Done");
        assert_eq!(translation.actions.len(), 1);
        assert_eq!(translation.actions[0].device_id, DeviceId::from("light1"));
    }

    #[test]
    fn should_parse_fenced_json_reply() {
        let reply = "```json\n{\"response\": \"Done\", \"actions\": []}\n```";
        let translation = parse_reply(reply).unwrap();
        assert_eq!(translation.response, "Done");
        assert!(translation.actions.is_empty());
    }

    #[test]
    fn should_default_actions_when_reply_omits_them() {
        let translation = parse_reply(r#"{"response": "Nothing to do"}"#).unwrap();
        assert!(translation.actions.is_empty());
    }

    #[test]
    fn should_reject_non_json_reply() {
        assert!(matches!(
            parse_reply("I cannot help with that."),
            Err(AssistError::Malformed(_))
        ));
    }
}
