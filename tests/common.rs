#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dilekce_server::auth::TokenIdentityProvider;
use dilekce_server::generation::{
    ChatCompletionRequest, CompletionTransport, GenerationClient, GenerationError, RetryPolicy,
};
use dilekce_server::payment::MockPaymentGateway;
use dilekce_server::petition::PetitionForm;
use dilekce_server::AppState;
use parking_lot::Mutex;
use tokio::time::Instant;

pub const TEST_SECRET: &str = "test-secret";

/// Transport that replays scripted outcomes and records when it was called.
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<String, GenerationError>>>,
    calls: Mutex<Vec<(Instant, ChatCompletionRequest)>>,
}

impl ScriptedTransport {
    pub fn new(outcomes: Vec<Result<String, GenerationError>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().iter().map(|(at, _)| *at).collect()
    }

    pub fn last_body(&self) -> Option<ChatCompletionRequest> {
        self.calls.lock().last().map(|(_, body)| body.clone())
    }
}

#[async_trait]
impl CompletionTransport for ScriptedTransport {
    async fn complete(&self, body: &ChatCompletionRequest) -> Result<String, GenerationError> {
        self.calls.lock().push((Instant::now(), body.clone()));
        self.outcomes
            .lock()
            .pop_front()
            .unwrap_or(Err(GenerationError::MalformedResponse))
    }
}

pub fn server_error() -> GenerationError {
    GenerationError::NonOkStatus {
        status: 503,
        message: "Service Unavailable".to_string(),
    }
}

pub fn test_state(transport: Arc<ScriptedTransport>) -> AppState {
    test_state_with_payment_delay(transport, Duration::ZERO)
}

pub fn test_state_with_payment_delay(
    transport: Arc<ScriptedTransport>,
    payment_delay: Duration,
) -> AppState {
    let generation = GenerationClient::new(transport, RetryPolicy::new(3, Duration::ZERO));
    AppState::new(
        generation,
        Arc::new(MockPaymentGateway::new(payment_delay)),
        Arc::new(TokenIdentityProvider::new(TEST_SECRET)),
        Duration::from_secs(3600),
    )
}

pub fn bearer(uid: &str) -> (&'static str, String) {
    let token = TokenIdentityProvider::new(TEST_SECRET)
        .issue_token(uid, Some("test@example.com"), 3600)
        .expect("token");
    ("Authorization", format!("Bearer {}", token))
}

pub fn valid_form() -> PetitionForm {
    PetitionForm {
        ad: "Ayşe".to_string(),
        soyad: "Yılmaz".to_string(),
        telefon: "0532 123 45 67".to_string(),
        adres: "Moda Cad. No: 5 Kadıköy/İstanbul".to_string(),
        kurum: "Aile Mahkemesi".to_string(),
        mesaj: "Şiddetli geçimsizlik nedeniyle boşanma davası".to_string(),
    }
}
