use dilekce_server::export::document::BlockKind;
use dilekce_server::export::{
    assemble, export_document, BuildError, DocumentBuilder, DocxBuilder, ExportFormat,
    PetitionDocument, PetitionerFields, TypstPdfBuilder,
};

fn ayse() -> PetitionerFields {
    PetitionerFields {
        first_name: "Ayşe".to_string(),
        last_name: "Yılmaz".to_string(),
        address: "Moda Cad. No: 5 Kadıköy/İstanbul".to_string(),
        phone: "0532 123 45 67".to_string(),
        institution_name: "Aile Mahkemesi".to_string(),
    }
}

struct FailingBuilder;

impl DocumentBuilder for FailingBuilder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn build(&self, _document: &PetitionDocument) -> Result<Vec<u8>, BuildError> {
        Err(BuildError::TypstExit(1))
    }
}

#[test]
fn test_layout_order_and_paragraphs() {
    let document = assemble("Paragraf bir.\n\nParagraf iki.", &ayse(), "17 Ekim 2026");

    let kinds: Vec<BlockKind> = document.blocks.iter().map(|b| b.kind).collect();
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
    assert_eq!(document.body_paragraphs(), vec!["Paragraf bir.", "Paragraf iki."]);
    assert_eq!(document.block(BlockKind::Heading).unwrap().text(), "AİLE MAHKEMESİ");
    assert_eq!(
        document.block(BlockKind::Signature).unwrap().text(),
        "İmza\nAyşe Yılmaz"
    );
    assert!(document
        .block(BlockKind::Petitioner)
        .unwrap()
        .text()
        .contains("Ad Soyad: Ayşe Yılmaz"));
}

#[test]
fn test_docx_export_artifact() {
    let artifact = export_document("Paragraf bir.\n\nParagraf iki.", &ayse(), &DocxBuilder::new())
        .unwrap();

    assert!(artifact.file_name.starts_with("dilekce_ayşe_yılmaz_"));
    assert!(artifact.file_name.ends_with(".docx"));
    assert_eq!(
        artifact.mime_type,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    assert!(artifact.bytes.starts_with(b"PK"));
    assert!(artifact
        .to_data_uri()
        .starts_with("data:application/vnd.openxmlformats-officedocument.wordprocessingml.document;base64,"));
}

#[test]
fn test_builder_failure_is_generic() {
    let err = export_document("Metin", &ayse(), &FailingBuilder).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Dilekçe belgesi oluşturulurken bir hata oluştu. Lütfen tekrar deneyiniz."
    );
}

#[test]
fn test_missing_typst_binary_fails_export() {
    let builder = TypstPdfBuilder::new("/nonexistent/typst-binary");
    assert!(export_document("Metin", &ayse(), &builder).is_err());
}
