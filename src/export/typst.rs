//! PDF output through the Typst CLI.
//!
//! The petition is rendered to Typst markup, written into a temporary
//! directory, and compiled with `typst compile`.

use std::fs;
use std::process::Command;

use tempfile::{tempdir, TempDir};

use super::document::{Alignment, Block, PetitionDocument};
use super::traits::DocumentBuilder;
use super::{BuildError, ExportFormat};

const SOURCE_FILE: &str = "dilekce.typ";
const OUTPUT_FILE: &str = "dilekce.pdf";

pub struct TypstPdfBuilder {
    binary: String,
}

impl TypstPdfBuilder {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Typst markup for the whole document.
    pub fn render_source(document: &PetitionDocument) -> String {
        let mut source = format!(
            "#set page(paper: \"a4\", margin: 2.5cm)\n#set text(font: \"{}\", lang: \"tr\")\n\n",
            escape_typst_string(document.font)
        );
        for block in &document.blocks {
            source.push_str(&render_block(block));
            source.push('\n');
        }
        source
    }

    fn compile(&self, temp_dir: &TempDir) -> Result<Vec<u8>, BuildError> {
        let typ_path = temp_dir.path().join(SOURCE_FILE);
        let output_path = temp_dir.path().join(OUTPUT_FILE);

        let status = Command::new(&self.binary)
            .arg("compile")
            .arg(&typ_path)
            .arg(&output_path)
            .current_dir(temp_dir.path())
            .status()
            .map_err(BuildError::TypstIo)?;

        if !status.success() {
            return Err(BuildError::TypstExit(status.code().unwrap_or(-1)));
        }

        fs::read(&output_path).map_err(BuildError::ReadPdf)
    }
}

impl Default for TypstPdfBuilder {
    fn default() -> Self {
        Self::new("typst")
    }
}

impl DocumentBuilder for TypstPdfBuilder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn build(&self, document: &PetitionDocument) -> Result<Vec<u8>, BuildError> {
        let temp_dir = tempdir().map_err(BuildError::TempDir)?;
        fs::write(temp_dir.path().join(SOURCE_FILE), Self::render_source(document))
            .map_err(BuildError::WriteTypst)?;
        self.compile(&temp_dir)
    }
}

fn render_block(block: &Block) -> String {
    let align = match block.alignment {
        Alignment::Left | Alignment::Justified => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
    };
    let justify = block.alignment == Alignment::Justified;

    let mut runs = String::new();
    for run in &block.runs {
        runs.push_str(&format!(
            "#text(size: {}pt, weight: \"{}\", \"{}\")",
            half_points(run.size),
            if run.bold { "bold" } else { "regular" },
            escape_typst_string(&run.text)
        ));
        if run.line_break {
            runs.push_str("#linebreak()");
        }
    }

    format!(
        "#block(above: {}pt, below: {}pt, width: 100%)[#align({})[#par(justify: {})[{}]]]",
        twips_to_points(block.spacing_before),
        twips_to_points(block.spacing_after),
        align,
        justify,
        runs
    )
}

fn half_points(size: u32) -> f32 {
    size as f32 / 2.0
}

fn twips_to_points(twips: u32) -> f32 {
    twips as f32 / 20.0
}

/// Escape special characters for Typst strings.
pub fn escape_typst_string(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::document::assemble;
    use crate::export::PetitionerFields;

    fn document() -> PetitionDocument {
        let fields = PetitionerFields {
            first_name: "Ali".into(),
            last_name: "Kaya".into(),
            address: "Cumhuriyet Cad. No: 7 Çankaya".into(),
            phone: "03121234567".into(),
            institution_name: "İş Mahkemesi".into(),
        };
        assemble("Davalı \"işveren\" ücretimi ödememiştir.", &fields, "3 Mart 2026")
    }

    #[test]
    fn test_escape_typst_string() {
        assert_eq!(escape_typst_string(r#"a "b" \c"#), r#"a \"b\" \\c"#);
        assert_eq!(escape_typst_string("x\ny"), r"x\ny");
    }

    #[test]
    fn test_render_source_contents() {
        let source = TypstPdfBuilder::render_source(&document());
        assert!(source.contains("font: \"Times New Roman\""));
        assert!(source.contains("#align(right)[#par(justify: false)[#text(size: 12pt, weight: \"regular\", \"3 Mart 2026\")]]"));
        assert!(source.contains("#text(size: 16pt, weight: \"bold\", \"İŞ MAHKEMESİ\")"));
        assert!(source.contains("#par(justify: true)"));
        assert!(source.contains(r#"Davalı \"işveren\" ücretimi ödememiştir."#));
        assert!(source.contains("#linebreak()"));
    }

    #[test]
    fn test_missing_binary_is_io_error() {
        let builder = TypstPdfBuilder::new("typst-binary-that-does-not-exist");
        let result = builder.build(&document());
        assert!(matches!(result, Err(BuildError::TypstIo(_))));
    }
}
