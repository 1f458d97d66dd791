//! Retrying generation client.

use std::sync::Arc;
use std::time::Duration;

use super::request::{ChatCompletionRequest, GenerationRequest};
use super::transport::{CompletionTransport, HttpTransport};
use super::GenerationError;
use crate::config::GenerationConfig;

/// Bounded retry with linear backoff (`base_delay * attempt`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay after the given 1-based attempt failed. Saturates instead of overflowing.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }
}

enum AttemptState {
    Attempting(u32),
    Succeeded(String),
    ExhaustedFailed(GenerationError),
}

/// Turns a subject and institution into petition text.
///
/// Holds only immutable configuration and a shared transport, so one client
/// may serve concurrent requests.
#[derive(Clone)]
pub struct GenerationClient {
    transport: Arc<dyn CompletionTransport>,
    policy: RetryPolicy,
}

impl GenerationClient {
    pub fn new(transport: Arc<dyn CompletionTransport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn from_config(config: &GenerationConfig) -> Result<Self, reqwest::Error> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(
            Arc::new(transport),
            RetryPolicy::new(config.retry_attempts, config.retry_delay),
        ))
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub async fn generate(
        &self,
        subject_text: &str,
        institution_name: &str,
    ) -> Result<String, GenerationError> {
        let request = GenerationRequest::new(subject_text, institution_name)?;
        let body = request.to_body();

        let mut state = AttemptState::Attempting(1);
        loop {
            state = match state {
                AttemptState::Attempting(attempt) => self.attempt(&body, attempt).await,
                AttemptState::Succeeded(text) => {
                    log::info!(
                        "petition generated for '{}' ({} chars)",
                        request.institution_name(),
                        text.chars().count()
                    );
                    return Ok(text);
                }
                AttemptState::ExhaustedFailed(err) => {
                    log::error!("petition generation failed: {}", err);
                    return Err(err);
                }
            };
        }
    }

    async fn attempt(&self, body: &ChatCompletionRequest, attempt: u32) -> AttemptState {
        match self.transport.complete(body).await {
            Ok(text) => AttemptState::Succeeded(text),
            Err(err) if attempt < self.policy.max_attempts => {
                let delay = self.policy.delay_after(attempt);
                log::warn!(
                    "generation attempt {}/{} failed: {}; retrying in {:?}",
                    attempt,
                    self.policy.max_attempts,
                    err,
                    delay
                );
                tokio::time::sleep(delay).await;
                AttemptState::Attempting(attempt + 1)
            }
            Err(err) => AttemptState::ExhaustedFailed(GenerationError::ExhaustedRetries {
                attempts: attempt,
                last: Box::new(err),
            }),
        }
    }
}
