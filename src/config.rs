//! Environment-driven configuration.
//!
//! Values are read once at startup after loading `.env` with `dotenvy`.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_AI_API_URL: &str = "https://free.v36.cm";
const DEFAULT_AUTH_TOKEN_SECRET: &str = "dilekce-auth-secret-change-in-production";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Settings for the text-generation endpoint.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub base_url: String,
    pub api_key: String,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
    pub request_timeout: Duration,
}

impl GenerationConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            retry_attempts: 3,
            retry_delay: Duration::from_millis(1000),
            request_timeout: Duration::from_secs(60),
        }
    }

    /// Full URL of the chat completions route.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub auth_token_secret: String,
    pub payment_delay: Duration,
    pub petition_ttl: Duration,
    pub bind_addr: String,
    pub allowed_origin: String,
    pub typst_bin: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("AI_API_KEY").map_err(|_| ConfigError::Missing("AI_API_KEY"))?;
        let mut generation = GenerationConfig::new(
            env::var("AI_API_URL").unwrap_or_else(|_| DEFAULT_AI_API_URL.to_string()),
            api_key,
        );
        generation.retry_attempts = parse_var("AI_RETRY_ATTEMPTS", 3u32)?.max(1);
        generation.retry_delay = Duration::from_millis(parse_var("AI_RETRY_DELAY_MS", 1000u64)?);
        generation.request_timeout =
            Duration::from_secs(parse_var("AI_REQUEST_TIMEOUT_SECS", 60u64)?);

        let auth_token_secret = env::var("AUTH_TOKEN_SECRET").unwrap_or_else(|_| {
            log::warn!("AUTH_TOKEN_SECRET not set, using default secret. SET THIS IN PRODUCTION!");
            DEFAULT_AUTH_TOKEN_SECRET.to_string()
        });

        Ok(Self {
            generation,
            auth_token_secret,
            payment_delay: Duration::from_millis(parse_var("PAYMENT_DELAY_MS", 1500u64)?),
            petition_ttl: Duration::from_secs(parse_var("PETITION_TTL_SECS", 3600u64)?),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            allowed_origin: env::var("ALLOWED_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string()),
            typst_bin: env::var("TYPST_BIN").unwrap_or_else(|_| "typst".to_string()),
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
