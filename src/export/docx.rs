//! Word (.docx) output through `docx-rs`.

use std::io::Cursor;

use docx_rs::{AlignmentType, BreakType, Docx, LineSpacing, Paragraph, Run, RunFonts};

use super::document::{Alignment, Block, PetitionDocument};
use super::traits::DocumentBuilder;
use super::{BuildError, ExportFormat};

#[derive(Debug, Default, Clone, Copy)]
pub struct DocxBuilder;

impl DocxBuilder {
    pub fn new() -> Self {
        Self
    }

    fn paragraph(font: &str, block: &Block) -> Paragraph {
        let mut paragraph = Paragraph::new()
            .align(alignment(block.alignment))
            .line_spacing(
                LineSpacing::new()
                    .before(block.spacing_before)
                    .after(block.spacing_after),
            );

        for text_run in &block.runs {
            let mut run = Run::new()
                .add_text(text_run.text.as_str())
                .size(text_run.size as usize)
                .fonts(RunFonts::new().ascii(font).hi_ansi(font).cs(font));
            if text_run.bold {
                run = run.bold();
            }
            if text_run.line_break {
                run = run.add_break(BreakType::TextWrapping);
            }
            paragraph = paragraph.add_run(run);
        }

        paragraph
    }
}

fn alignment(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
        Alignment::Right => AlignmentType::Right,
        Alignment::Justified => AlignmentType::Both,
    }
}

impl DocumentBuilder for DocxBuilder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Docx
    }

    fn build(&self, document: &PetitionDocument) -> Result<Vec<u8>, BuildError> {
        let docx = document
            .blocks
            .iter()
            .fold(Docx::new(), |docx, block| {
                docx.add_paragraph(Self::paragraph(document.font, block))
            });

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|e| BuildError::Docx(e.to_string()))?;

        Ok(buffer.into_inner())
    }
}
