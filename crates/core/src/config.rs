use crate::error::AssistantError;
use std::env;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Settings consumed by the assistant. Only the API key is mandatory; the
/// temperature stays a raw string until the composer parses it, so a bad
/// value degrades to the fallback instead of failing construction.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub temperature: Option<String>,
    pub timeout: Duration,
}

impl AssistantConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build a configuration from `RQL_ASSISTANT_*` environment variables.
    pub fn from_env() -> Result<Self, AssistantError> {
        let api_key = env::var("RQL_ASSISTANT_API_KEY").map_err(|_| {
            AssistantError::Configuration(
                "missing environment variable RQL_ASSISTANT_API_KEY".to_string(),
            )
        })?;

        let mut config = Self::new(api_key);
        if let Ok(endpoint) = env::var("RQL_ASSISTANT_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(model) = env::var("RQL_ASSISTANT_MODEL") {
            config.model = model;
        }
        if let Ok(temperature) = env::var("RQL_ASSISTANT_TEMPERATURE") {
            config.temperature = Some(temperature);
        }
        if let Ok(raw) = env::var("RQL_ASSISTANT_TIMEOUT_SECS") {
            let seconds: u64 = raw.parse().map_err(|_| {
                AssistantError::Configuration(format!(
                    "invalid RQL_ASSISTANT_TIMEOUT_SECS value '{raw}'"
                ))
            })?;
            config.timeout = Duration::from_secs(seconds);
        }

        Ok(config)
    }
}
