use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::validation::{validate_min_length, validate_name, validate_phone, ValidationErrors};
use crate::export::{ExportFormat, PetitionerFields};
use crate::payment::PaymentReceipt;

/// Petitioner form as submitted by the front end.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PetitionForm {
    pub ad: String,
    pub soyad: String,
    pub telefon: String,
    pub adres: String,
    pub kurum: String,
    /// Free-text subject of the petition
    pub mesaj: String,
}

impl PetitionForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate_name(&self.ad, "ad", &mut errors);
        validate_name(&self.soyad, "soyad", &mut errors);
        validate_phone(&self.telefon, "telefon", &mut errors);
        validate_min_length(&self.adres, 10, "adres", "Adres", &mut errors);
        validate_min_length(&self.kurum, 3, "kurum", "Kurum adı", &mut errors);
        validate_min_length(&self.mesaj, 10, "mesaj", "Mesaj", &mut errors);

        errors.into_result()
    }

    pub fn petitioner_fields(&self) -> PetitionerFields {
        PetitionerFields {
            first_name: self.ad.clone(),
            last_name: self.soyad.clone(),
            address: self.adres.clone(),
            phone: self.telefon.clone(),
            institution_name: self.kurum.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePetitionResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PreviewResponse {
    pub id: Uuid,
    pub content: String,
    /// False once the petition is paid for
    pub masked: bool,
    pub price_kurus: u64,
    pub price: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub message: String,
    pub receipt: PaymentReceipt,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
    /// Return the document as a `data:` URI in JSON instead of a file download
    #[serde(default)]
    pub data_uri: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExportDataUriResponse {
    pub file_name: String,
    pub mime_type: String,
    pub data_uri: String,
}
