//! Mock payment gateway.
//!
//! Accepts two fixed test cards and nothing else. There is no real payment
//! integration behind it.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Price of unlocking one petition, in kuruş (24,90 TL).
pub const PETITION_PRICE_KURUS: u64 = 2490;

pub const TEST_CARD_SUCCESS: &str = "5890040000000016";
pub const TEST_CARD_INSUFFICIENT_FUNDS: &str = "5890040000000015";

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CardDetails {
    pub number: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub cvc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentReceipt {
    pub transaction_id: Uuid,
    pub amount_kurus: u64,
    pub paid_at: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Ödeme başarısız: Yetersiz bakiye")]
    InsufficientFunds,
    #[error("Ödeme başarısız: Geçersiz kart numarası")]
    InvalidCard,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(
        &self,
        card: &CardDetails,
        amount_kurus: u64,
    ) -> Result<PaymentReceipt, PaymentError>;
}

/// Strip whitespace from a card number as typed ("5890 0400 ...").
pub fn normalize_card_number(number: &str) -> String {
    number.chars().filter(|c| !c.is_whitespace()).collect()
}

pub struct MockPaymentGateway {
    processing_delay: Duration,
}

impl MockPaymentGateway {
    pub fn new(processing_delay: Duration) -> Self {
        Self { processing_delay }
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn charge(
        &self,
        card: &CardDetails,
        amount_kurus: u64,
    ) -> Result<PaymentReceipt, PaymentError> {
        match normalize_card_number(&card.number).as_str() {
            TEST_CARD_SUCCESS => {
                tokio::time::sleep(self.processing_delay).await;
                let receipt = PaymentReceipt {
                    transaction_id: Uuid::new_v4(),
                    amount_kurus,
                    paid_at: Utc::now(),
                };
                log::info!(
                    "mock payment {} accepted ({} kuruş)",
                    receipt.transaction_id,
                    amount_kurus
                );
                Ok(receipt)
            }
            TEST_CARD_INSUFFICIENT_FUNDS => {
                log::warn!("mock payment declined: insufficient funds");
                Err(PaymentError::InsufficientFunds)
            }
            _ => {
                log::warn!("mock payment declined: unknown card");
                Err(PaymentError::InvalidCard)
            }
        }
    }
}
