//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::auth::{IdentityProvider, TokenIdentityProvider};
use crate::config::AppConfig;
use crate::export::{DocumentBuilder, DocxBuilder, ExportFormat, TypstPdfBuilder};
use crate::generation::GenerationClient;
use crate::payment::{MockPaymentGateway, PaymentGateway};
use crate::petition::Petition;

const MAX_PETITIONS: u64 = 10_000;

pub type PetitionStore = Cache<Uuid, Arc<Mutex<Petition>>>;

#[derive(Clone)]
pub struct AppState {
    pub generation: GenerationClient,
    pub payments: Arc<dyn PaymentGateway>,
    pub identity: Arc<dyn IdentityProvider>,
    pub docx_builder: Arc<dyn DocumentBuilder>,
    pub pdf_builder: Arc<dyn DocumentBuilder>,
    pub petitions: PetitionStore,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let generation = GenerationClient::from_config(&config.generation)?;
        let mut state = Self::new(
            generation,
            Arc::new(MockPaymentGateway::new(config.payment_delay)),
            Arc::new(TokenIdentityProvider::new(&config.auth_token_secret)),
            config.petition_ttl,
        );
        state.pdf_builder = Arc::new(TypstPdfBuilder::new(config.typst_bin.clone()));
        Ok(state)
    }

    pub fn new(
        generation: GenerationClient,
        payments: Arc<dyn PaymentGateway>,
        identity: Arc<dyn IdentityProvider>,
        petition_ttl: Duration,
    ) -> Self {
        let petitions = Cache::builder()
            .time_to_live(petition_ttl)
            .max_capacity(MAX_PETITIONS)
            .build();

        Self {
            generation,
            payments,
            identity,
            docx_builder: Arc::new(DocxBuilder::new()),
            pdf_builder: Arc::new(TypstPdfBuilder::default()),
            petitions,
        }
    }

    pub fn builder_for(&self, format: ExportFormat) -> Arc<dyn DocumentBuilder> {
        match format {
            ExportFormat::Docx => self.docx_builder.clone(),
            ExportFormat::Pdf => self.pdf_builder.clone(),
        }
    }
}
