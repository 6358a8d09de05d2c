use crate::config::AssistantConfig;
use crate::error::AssistantError;
use crate::models::ChatMessage;
use serde::Serialize;

pub const FALLBACK_TEMPERATURE: f64 = 0.7;

/// Shapes an ordered message list into the chat-completion request body.
/// Message ordering is the caller's responsibility and is preserved
/// verbatim.
pub struct RequestComposer {
    default_model: String,
    default_temperature: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl RequestComposer {
    pub fn new(default_model: impl Into<String>, default_temperature: f64) -> Self {
        Self {
            default_model: default_model.into(),
            default_temperature,
        }
    }

    /// An unparseable configured temperature degrades to the fallback here,
    /// once, rather than on every compose call.
    pub fn from_config(config: &AssistantConfig) -> Self {
        let temperature = config
            .temperature
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(FALLBACK_TEMPERATURE);

        Self::new(config.model.clone(), temperature)
    }

    pub fn compose(
        &self,
        messages: &[ChatMessage],
        model: Option<&str>,
        temperature: Option<f64>,
    ) -> Result<String, AssistantError> {
        if messages.is_empty() {
            return Err(AssistantError::InvalidRequest(
                "at least one chat message must be provided".to_string(),
            ));
        }

        let request = WireRequest {
            model: model.unwrap_or(&self.default_model),
            messages: messages
                .iter()
                .map(|message| WireMessage {
                    role: message.role.as_wire_str(),
                    content: &message.text,
                })
                .collect(),
            temperature: temperature.unwrap_or(self.default_temperature),
        };

        Ok(serde_json::to_string(&request)?)
    }
}
