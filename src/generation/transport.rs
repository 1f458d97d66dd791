//! Single-attempt transport to the chat completions endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::request::ChatCompletionRequest;
use super::GenerationError;
use crate::config::GenerationConfig;

/// One outbound completion call. Implementations must not retry.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn complete(&self, body: &ChatCompletionRequest) -> Result<String, GenerationError>;
}

/// reqwest-backed transport with bearer authorization.
pub struct HttpTransport {
    client: Client,
    url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &GenerationConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("dilekce-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &GenerationConfig) -> Self {
        Self {
            client,
            url: config.completions_url(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn complete(&self, body: &ChatCompletionRequest) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                log::debug!("completion request to {} failed: {}", self.url, e);
                GenerationError::NetworkFailure(e)
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(GenerationError::NetworkFailure)?;

        if !status.is_success() {
            return Err(GenerationError::NonOkStatus {
                status: status.as_u16(),
                message: error_message(&bytes, status),
            });
        }

        parse_completion(&bytes)
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Extract `choices[0].message.content`, which must be a non-empty string.
pub fn parse_completion(bytes: &[u8]) -> Result<String, GenerationError> {
    let parsed: CompletionResponse =
        serde_json::from_slice(bytes).map_err(|_| GenerationError::MalformedResponse)?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty())
        .ok_or(GenerationError::MalformedResponse)
}

/// Best-effort `error.message` from a failed response, else the status reason.
pub fn error_message(bytes: &[u8], status: StatusCode) -> String {
    serde_json::from_slice::<ErrorBody>(bytes)
        .ok()
        .and_then(|body| body.error)
        .and_then(|detail| detail.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or_else(|| status.as_str())
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completion_ok() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"SAYIN HAKİMLİĞİNE"}}]}"#
            .as_bytes();
        assert_eq!(parse_completion(body).unwrap(), "SAYIN HAKİMLİĞİNE");
    }

    #[test]
    fn test_parse_completion_empty_content() {
        let body = br#"{"choices":[{"message":{"content":""}}]}"#;
        assert!(matches!(
            parse_completion(body),
            Err(GenerationError::MalformedResponse)
        ));
    }

    #[test]
    fn test_parse_completion_no_choices() {
        assert!(matches!(
            parse_completion(br#"{"choices":[]}"#),
            Err(GenerationError::MalformedResponse)
        ));
        assert!(matches!(
            parse_completion(b"<html>bad gateway</html>"),
            Err(GenerationError::MalformedResponse)
        ));
    }

    #[test]
    fn test_error_message_from_body() {
        let body = br#"{"error":{"message":"Rate limit reached"}}"#;
        assert_eq!(
            error_message(body, StatusCode::TOO_MANY_REQUESTS),
            "Rate limit reached"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_status_text() {
        assert_eq!(
            error_message(b"not json", StatusCode::BAD_GATEWAY),
            "Bad Gateway"
        );
        assert_eq!(
            error_message(br#"{"error":{}}"#, StatusCode::INTERNAL_SERVER_ERROR),
            "Internal Server Error"
        );
    }
}
