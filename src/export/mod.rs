//! Petition export to downloadable documents.
//!
//! - `document` - assembly of the fixed petition layout
//! - `docx` - Word output (default)
//! - `typst` - PDF output via the Typst CLI

pub mod document;
pub mod docx;
pub mod traits;
pub mod typst;

pub use document::{assemble, body_paragraphs, PetitionDocument};
pub use docx::DocxBuilder;
pub use traits::DocumentBuilder;
pub use typst::TypstPdfBuilder;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::locale::{to_lower_tr, today_turkish};

/// Errors raised inside a document builder. Never shown to end users.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to serialize Word document: {0}")]
    Docx(String),
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write Typst source: {0}")]
    WriteTypst(#[source] std::io::Error),
    #[error("Typst CLI execution failed: {0}")]
    TypstIo(#[source] std::io::Error),
    #[error("Typst CLI exited with status {0}")]
    TypstExit(i32),
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Dilekçe belgesi oluşturulurken bir hata oluştu. Lütfen tekrar deneyiniz.")]
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Docx,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Pdf => "application/pdf",
        }
    }
}

/// Petitioner details printed on the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PetitionerFields {
    #[serde(alias = "ad")]
    pub first_name: String,
    #[serde(alias = "soyad")]
    pub last_name: String,
    #[serde(alias = "adres")]
    pub address: String,
    #[serde(alias = "telefon")]
    pub phone: String,
    #[serde(alias = "kurum")]
    pub institution_name: String,
}

impl PetitionerFields {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// Serialized document ready for the download sink.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, BASE64.encode(&self.bytes))
    }
}

/// `dilekce_<firstname>_<lastname>_<timestamp>.<ext>`
pub fn file_name(fields: &PetitionerFields, format: ExportFormat, timestamp_millis: i64) -> String {
    format!(
        "dilekce_{}_{}_{}.{}",
        file_name_part(&fields.first_name),
        file_name_part(&fields.last_name),
        timestamp_millis,
        format.extension()
    )
}

fn file_name_part(value: &str) -> String {
    let lowered = to_lower_tr(value.trim());
    let sanitized = sanitize_filename::sanitize(lowered);
    let joined = sanitized.split_whitespace().collect::<Vec<_>>().join("-");
    if joined.is_empty() {
        "isimsiz".to_string()
    } else {
        joined
    }
}

/// Assemble and serialize the unmasked petition.
///
/// Builder failures are logged and collapsed into [`ExportError::Failed`].
pub fn export_document(
    final_text: &str,
    fields: &PetitionerFields,
    builder: &dyn DocumentBuilder,
) -> Result<ExportArtifact, ExportError> {
    let document = assemble(final_text, fields, &today_turkish());
    let format = builder.format();

    let bytes = builder.build(&document).map_err(|e| {
        log::error!("petition export ({}) failed: {}", format.extension(), e);
        ExportError::Failed
    })?;

    let artifact = ExportArtifact {
        file_name: file_name(fields, format, chrono::Utc::now().timestamp_millis()),
        mime_type: format.mime_type(),
        bytes,
    };
    log::info!(
        "exported {} ({} bytes)",
        artifact.file_name,
        artifact.bytes.len()
    );
    Ok(artifact)
}
