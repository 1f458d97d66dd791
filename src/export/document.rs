//! Layout-independent model of the petition document.

use super::PetitionerFields;
use crate::locale::to_upper_tr;

pub const FONT_FAMILY: &str = "Times New Roman";
/// Body text size in half-points (12 pt).
pub const BODY_SIZE: u32 = 24;
/// Institution heading size in half-points (16 pt).
pub const HEADING_SIZE: u32 = 32;
/// Paragraph spacing in twentieths of a point (1.15 lines at 12 pt).
pub const PARAGRAPH_SPACING: u32 = 276;

pub const SUBJECT_LABEL: &str = "KONU: ";
pub const SUBJECT_TEXT: &str = "Dilekçe Talebi Hk.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Date,
    Heading,
    Petitioner,
    Subject,
    Body,
    Signature,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    /// Half-points.
    pub size: u32,
    pub line_break: bool,
}

impl TextRun {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            size: BODY_SIZE,
            line_break: false,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    fn line(mut self) -> Self {
        self.line_break = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub alignment: Alignment,
    pub spacing_before: u32,
    pub spacing_after: u32,
    pub runs: Vec<TextRun>,
}

impl Block {
    fn new(kind: BlockKind, alignment: Alignment, runs: Vec<TextRun>) -> Self {
        Self {
            kind,
            alignment,
            spacing_before: PARAGRAPH_SPACING,
            spacing_after: PARAGRAPH_SPACING,
            runs,
        }
    }

    /// Concatenated text of all runs, line breaks as `\n`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for run in &self.runs {
            out.push_str(&run.text);
            if run.line_break {
                out.push('\n');
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PetitionDocument {
    pub font: &'static str,
    pub blocks: Vec<Block>,
}

impl PetitionDocument {
    pub fn body_paragraphs(&self) -> Vec<String> {
        self.blocks
            .iter()
            .filter(|block| block.kind == BlockKind::Body)
            .map(Block::text)
            .collect()
    }

    pub fn block(&self, kind: BlockKind) -> Option<&Block> {
        self.blocks.iter().find(|block| block.kind == kind)
    }
}

/// Split on line breaks, trim, and drop empty lines.
pub fn body_paragraphs(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lay out the petition in its fixed section order.
pub fn assemble(final_text: &str, fields: &PetitionerFields, date: &str) -> PetitionDocument {
    let full_name = fields.full_name();
    let mut blocks = Vec::new();

    let mut date_block = Block::new(
        BlockKind::Date,
        Alignment::Right,
        vec![TextRun::plain(date)],
    );
    date_block.spacing_before = 0;
    blocks.push(date_block);

    blocks.push(Block::new(
        BlockKind::Heading,
        Alignment::Center,
        vec![TextRun::plain(to_upper_tr(fields.institution_name.trim()))
            .bold()
            .size(HEADING_SIZE)],
    ));

    blocks.push(Block::new(
        BlockKind::Petitioner,
        Alignment::Left,
        vec![
            TextRun::plain("Dilekçe Sahibi:").bold().line(),
            TextRun::plain(format!("Ad Soyad: {}", full_name)).line(),
            TextRun::plain(format!("Adres: {}", fields.address.trim())).line(),
            TextRun::plain(format!("Telefon: {}", fields.phone.trim())),
        ],
    ));

    blocks.push(Block::new(
        BlockKind::Subject,
        Alignment::Left,
        vec![
            TextRun::plain(SUBJECT_LABEL).bold(),
            TextRun::plain(SUBJECT_TEXT),
        ],
    ));

    for paragraph in body_paragraphs(final_text) {
        blocks.push(Block::new(
            BlockKind::Body,
            Alignment::Justified,
            vec![TextRun::plain(paragraph)],
        ));
    }

    let mut signature = Block::new(
        BlockKind::Signature,
        Alignment::Right,
        vec![TextRun::plain("İmza").line(), TextRun::plain(full_name)],
    );
    signature.spacing_before = PARAGRAPH_SPACING * 2;
    signature.spacing_after = 0;
    blocks.push(signature);

    PetitionDocument {
        font: FONT_FAMILY,
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> PetitionerFields {
        PetitionerFields {
            first_name: "Ayşe".into(),
            last_name: "Yılmaz".into(),
            address: "Bağdat Cad. No: 12 Kadıköy".into(),
            phone: "05321234567".into(),
            institution_name: "Aile Mahkemesi".into(),
        }
    }

    #[test]
    fn test_body_paragraphs_drop_blank_lines() {
        assert_eq!(
            body_paragraphs("Paragraf bir.\n\nParagraf iki."),
            vec!["Paragraf bir.", "Paragraf iki."]
        );
        assert_eq!(
            body_paragraphs("  a  \r\n   \r\nb\n"),
            vec!["a", "b"]
        );
        assert!(body_paragraphs("\n \n").is_empty());
    }

    #[test]
    fn test_section_order() {
        let doc = assemble("Bir.\nİki.", &fields(), "17 Ekim 2026");
        let kinds: Vec<BlockKind> = doc.blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Date,
                BlockKind::Heading,
                BlockKind::Petitioner,
                BlockKind::Subject,
                BlockKind::Body,
                BlockKind::Body,
                BlockKind::Signature,
            ]
        );
    }

    #[test]
    fn test_heading_is_upper_bold_and_larger() {
        let doc = assemble("Metin", &fields(), "17 Ekim 2026");
        let heading = doc.block(BlockKind::Heading).unwrap();
        assert_eq!(heading.alignment, Alignment::Center);
        assert_eq!(heading.runs[0].text, "AİLE MAHKEMESİ");
        assert!(heading.runs[0].bold);
        assert!(heading.runs[0].size > BODY_SIZE);
    }

    #[test]
    fn test_alignments_and_signature() {
        let doc = assemble("Metin", &fields(), "17 Ekim 2026");
        assert_eq!(doc.block(BlockKind::Date).unwrap().alignment, Alignment::Right);
        assert_eq!(doc.block(BlockKind::Body).unwrap().alignment, Alignment::Justified);
        let signature = doc.block(BlockKind::Signature).unwrap();
        assert_eq!(signature.alignment, Alignment::Right);
        assert_eq!(signature.text(), "İmza\nAyşe Yılmaz");
    }

    #[test]
    fn test_petitioner_block_lines() {
        let doc = assemble("Metin", &fields(), "17 Ekim 2026");
        let text = doc.block(BlockKind::Petitioner).unwrap().text();
        assert_eq!(
            text,
            "Dilekçe Sahibi:\nAd Soyad: Ayşe Yılmaz\nAdres: Bağdat Cad. No: 12 Kadıköy\nTelefon: 05321234567"
        );
    }
}
