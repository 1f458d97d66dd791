//! Seam between petition assembly and the layout engines.

use super::document::PetitionDocument;
use super::{BuildError, ExportFormat};

/// Serializes an assembled petition to document bytes.
pub trait DocumentBuilder: Send + Sync {
    fn format(&self) -> ExportFormat;

    fn build(&self, document: &PetitionDocument) -> Result<Vec<u8>, BuildError>;
}
