use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("bundled resource not found: {0}")]
    ResourceNotFound(String),

    #[error("failed to parse {corpus} corpus: {source}")]
    DocumentParse {
        corpus: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("provider request failed: {message}")]
    Provider {
        message: String,
        status: Option<u16>,
    },

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AssistantError {
    /// HTTP status attached to a provider failure, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            AssistantError::Provider { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T, E = AssistantError> = std::result::Result<T, E>;
