use crate::config::AssistantConfig;
use crate::error::AssistantError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

const ERROR_BODY_PREVIEW_CHARS: usize = 1024;

/// One round trip to a chat-completion endpoint. The orchestrator is
/// generic over this seam so tests can drive it with fakes.
#[async_trait]
pub trait CompletionEndpoint: Send + Sync {
    async fn send(&self, request_json: &str) -> Result<String, AssistantError>;
}

/// Default endpoint implementation over a shared, pooled HTTP client with a
/// fixed bearer auth header. Performs exactly one attempt per call; retry
/// policy belongs to the caller.
#[derive(Debug)]
pub struct RemoteModelClient {
    client: Client,
    endpoint: Url,
}

impl RemoteModelClient {
    pub fn new(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(AssistantError::Configuration(
                "missing chat-completion API key".to_string(),
            ));
        }

        let endpoint = Url::parse(&config.endpoint).map_err(|error| {
            AssistantError::Configuration(format!(
                "invalid endpoint url '{}': {error}",
                config.endpoint
            ))
        })?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
            AssistantError::Configuration("API key contains invalid header characters".to_string())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|error| {
                AssistantError::Configuration(format!("failed to build http client: {error}"))
            })?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl CompletionEndpoint for RemoteModelClient {
    async fn send(&self, request_json: &str) -> Result<String, AssistantError> {
        if request_json.trim().is_empty() {
            return Err(AssistantError::InvalidRequest(
                "request body cannot be empty".to_string(),
            ));
        }

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(request_json.to_owned())
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_failure)?;

        if !status.is_success() {
            return Err(failure_from_response(status, &body));
        }

        assistant_content(status, &body)
    }
}

fn transport_failure(error: reqwest::Error) -> AssistantError {
    AssistantError::Provider {
        message: format!("transport failure: {error}"),
        status: None,
    }
}

/// Provider failures carry the most specific message available: the JSON
/// error envelope, then the HTTP reason phrase, then a body preview.
fn failure_from_response(status: StatusCode, body: &str) -> AssistantError {
    let message = extract_provider_message(body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| preview(body));

    AssistantError::Provider {
        message,
        status: Some(status.as_u16()),
    }
}

fn assistant_content(status: StatusCode, body: &str) -> Result<String, AssistantError> {
    let parsed: Value = serde_json::from_str(body).map_err(|error| AssistantError::Provider {
        message: format!("failed to parse completion response: {error}"),
        status: Some(status.as_u16()),
    })?;

    parsed
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AssistantError::Provider {
            message: "completion response missing choices[0].message.content".to_string(),
            status: None,
        })
}

fn extract_provider_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    match parsed.get("error")? {
        Value::String(message) => Some(message.clone()),
        envelope => envelope
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_PREVIEW_CHARS {
        return body.to_string();
    }
    let mut preview: String = body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
    preview.push('…');
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_parts(error: AssistantError) -> (String, Option<u16>) {
        match error {
            AssistantError::Provider { message, status } => (message, status),
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[test]
    fn error_envelope_message_wins() {
        let error = failure_from_response(
            StatusCode::TOO_MANY_REQUESTS,
            "{\"error\":{\"message\":\"rate limited\"}}",
        );
        let (message, status) = provider_parts(error);
        assert_eq!(message, "rate limited");
        assert_eq!(status, Some(429));
    }

    #[test]
    fn string_error_envelope_is_accepted() {
        let error = failure_from_response(StatusCode::BAD_REQUEST, "{\"error\":\"bad prompt\"}");
        let (message, status) = provider_parts(error);
        assert_eq!(message, "bad prompt");
        assert_eq!(status, Some(400));
    }

    #[test]
    fn unparsable_error_body_falls_back_to_reason_phrase() {
        let error = failure_from_response(StatusCode::SERVICE_UNAVAILABLE, "<html>down</html>");
        let (message, status) = provider_parts(error);
        assert_eq!(message, "Service Unavailable");
        assert_eq!(status, Some(503));
    }

    #[test]
    fn unknown_status_falls_back_to_body_preview() {
        let status = StatusCode::from_u16(599).expect("valid status code");
        let long_body = "x".repeat(2000);

        let error = failure_from_response(status, &long_body);
        let (message, returned_status) = provider_parts(error);
        assert_eq!(message.chars().count(), ERROR_BODY_PREVIEW_CHARS + 1);
        assert!(message.ends_with('…'));
        assert_eq!(returned_status, Some(599));
    }

    #[test]
    fn success_body_yields_assistant_content() {
        let content = assistant_content(
            StatusCode::OK,
            "{\"choices\":[{\"message\":{\"content\":\"Hello!\"}}]}",
        )
        .expect("content extracted");
        assert_eq!(content, "Hello!");
    }

    #[test]
    fn unparsable_success_body_keeps_the_status() {
        let error = assistant_content(StatusCode::OK, "not json").expect_err("parse should fail");
        let (message, status) = provider_parts(error);
        assert!(message.contains("failed to parse completion response"));
        assert_eq!(status, Some(200));
    }

    #[test]
    fn shape_mismatch_on_parseable_json_has_no_status() {
        let error = assistant_content(StatusCode::OK, "{}").expect_err("shape should mismatch");
        let (message, status) = provider_parts(error);
        assert!(message.contains("choices[0].message.content"));
        assert_eq!(status, None);
    }

    #[test]
    fn missing_api_key_fails_construction() {
        let config = AssistantConfig::new("   ");
        let error = RemoteModelClient::new(&config).expect_err("blank key should fail");
        assert!(matches!(error, AssistantError::Configuration(_)));
    }

    #[test]
    fn invalid_endpoint_url_fails_construction() {
        let mut config = AssistantConfig::new("key");
        config.endpoint = "not a url".to_string();
        let error = RemoteModelClient::new(&config).expect_err("bad url should fail");
        assert!(matches!(error, AssistantError::Configuration(_)));
    }

    #[tokio::test]
    async fn blank_request_is_rejected_before_any_network_activity() {
        let client =
            RemoteModelClient::new(&AssistantConfig::new("key")).expect("client builds");
        let error = client.send("   ").await.expect_err("blank body should fail");
        assert!(matches!(error, AssistantError::InvalidRequest(_)));
    }
}
