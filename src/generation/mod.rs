//! Petition text generation against an OpenAI-compatible chat endpoint.
//!
//! - `request` - input validation and prompt/body construction
//! - `transport` - the single-attempt HTTP call and response parsing
//! - `client` - bounded retry with linear backoff around the transport

pub mod client;
pub mod request;
pub mod transport;

pub use client::{GenerationClient, RetryPolicy};
pub use request::{ChatCompletionRequest, ChatMessage, GenerationRequest};
pub use transport::{CompletionTransport, HttpTransport};

use thiserror::Error;

/// Classification of generation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NetworkFailure,
    NonOkStatus,
    MalformedResponse,
    ExhaustedRetries,
}

/// Errors produced while generating petition text.
///
/// Only `InvalidInput` and `ExhaustedRetries` leave `GenerationClient::generate`;
/// the others describe a single failed attempt.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("AI servisine ulaşılamadı")]
    NetworkFailure(#[source] reqwest::Error),
    #[error("AI API yanıtı başarısız: {message}")]
    NonOkStatus { status: u16, message: String },
    #[error("AI yanıtı geçersiz format içeriyor")]
    MalformedResponse,
    #[error("AI servisi ile iletişim hatası: {last}")]
    ExhaustedRetries {
        attempts: u32,
        #[source]
        last: Box<GenerationError>,
    },
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::NetworkFailure(_) => ErrorKind::NetworkFailure,
            Self::NonOkStatus { .. } => ErrorKind::NonOkStatus,
            Self::MalformedResponse => ErrorKind::MalformedResponse,
            Self::ExhaustedRetries { .. } => ErrorKind::ExhaustedRetries,
        }
    }

    /// HTTP status of the failing response, looking through retry exhaustion.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::NonOkStatus { status, .. } => Some(*status),
            Self::ExhaustedRetries { last, .. } => last.http_status(),
            _ => None,
        }
    }
}
