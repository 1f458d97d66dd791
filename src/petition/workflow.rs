//! Per-petition state and the payment gate.
//!
//! The unmasked text never leaves a `Petition` before `mark_paid` succeeds,
//! apart from `final_text`, which itself requires payment.

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use super::model::PetitionForm;
use crate::payment::PaymentReceipt;
use crate::redaction;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("Dilekçe henüz oluşturulmadı")]
    NotGenerated,
    #[error("Tam metne erişmek için ödeme yapmanız gerekiyor")]
    PaymentRequired,
    #[error("Bu dilekçe için ödeme zaten yapıldı")]
    AlreadyPaid,
    #[error("Ödeme işlemi devam ediyor")]
    PaymentInProgress,
}

/// What the caller may show for a petition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub content: String,
    pub masked: bool,
}

#[derive(Debug, Clone)]
pub struct Petition {
    pub id: Uuid,
    pub owner_uid: String,
    pub form: PetitionForm,
    pub created_at: DateTime<Utc>,
    content: Option<String>,
    receipt: Option<PaymentReceipt>,
    payment_pending: bool,
}

impl Petition {
    pub fn new(owner_uid: impl Into<String>, form: PetitionForm) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_uid: owner_uid.into(),
            form,
            created_at: Utc::now(),
            content: None,
            receipt: None,
            payment_pending: false,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.receipt.is_some()
    }

    /// Whether new text may be generated right now.
    pub fn check_regenerate(&self) -> Result<(), GateError> {
        if self.is_paid() {
            return Err(GateError::AlreadyPaid);
        }
        if self.payment_pending {
            return Err(GateError::PaymentInProgress);
        }
        Ok(())
    }

    /// Store freshly generated text. Paid petitions are frozen.
    pub fn attach_content(&mut self, text: String) -> Result<(), GateError> {
        self.check_regenerate()?;
        self.content = Some(text);
        Ok(())
    }

    /// Masked text until paid, full text after. A new mask on every call.
    pub fn preview<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Preview, GateError> {
        let content = self.content.as_deref().ok_or(GateError::NotGenerated)?;
        if self.is_paid() {
            Ok(Preview {
                content: content.to_string(),
                masked: false,
            })
        } else {
            Ok(Preview {
                content: redaction::mask(content, rng),
                masked: true,
            })
        }
    }

    /// Reserve the petition for one payment attempt.
    pub fn begin_payment(&mut self) -> Result<(), GateError> {
        if self.content.is_none() {
            return Err(GateError::NotGenerated);
        }
        if self.is_paid() {
            return Err(GateError::AlreadyPaid);
        }
        if self.payment_pending {
            return Err(GateError::PaymentInProgress);
        }
        self.payment_pending = true;
        Ok(())
    }

    /// Release the reservation after a declined charge.
    pub fn abort_payment(&mut self) {
        self.payment_pending = false;
    }

    /// Flip the gate. Succeeds at most once.
    pub fn mark_paid(&mut self, receipt: PaymentReceipt) -> Result<(), GateError> {
        if self.content.is_none() {
            return Err(GateError::NotGenerated);
        }
        if self.is_paid() {
            return Err(GateError::AlreadyPaid);
        }
        self.payment_pending = false;
        self.receipt = Some(receipt);
        Ok(())
    }

    pub fn final_text(&self) -> Result<&str, GateError> {
        let content = self.content.as_deref().ok_or(GateError::NotGenerated)?;
        if !self.is_paid() {
            return Err(GateError::PaymentRequired);
        }
        Ok(content)
    }
}
