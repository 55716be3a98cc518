/*!
 * Tests for DOCX and PDF export
 */

use std::sync::Arc;
use std::time::Duration;

use cvforge::document::{BlockKind, Document, StyleSheet};
use cvforge::errors::ExportError;
use cvforge::export::{DocumentConverter, ExportFormat, Exporter, OfficeConverter, write_docx};
use cvforge::language_utils::Language;

use crate::common::mock_converters::MockConverter;
use crate::common::{create_temp_dir, list_dir, read_docx_numbering, read_docx_paragraphs};

fn sample_document() -> Document {
    let styles = StyleSheet::default();
    let mut document = Document::new(Language::English);
    document.push(BlockKind::Title, "Jane Doe", &styles);
    document.push(BlockKind::Heading { level: 2 }, "Languages", &styles);
    document.push(BlockKind::Paragraph, "Fluent in three languages 🌍", &styles);
    document.push(BlockKind::BulletItem, "Spanish: Native", &styles);
    document.push(BlockKind::BulletItem, "English: C1", &styles);
    document
}

#[test]
fn test_writeDocx_shouldRoundTripBlockTexts() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("cv.docx");

    write_docx(&sample_document(), &path).unwrap();

    assert_eq!(
        read_docx_paragraphs(&path).unwrap(),
        vec![
            "Jane Doe",
            "Languages",
            "Fluent in three languages 🌍",
            "Spanish: Native",
            "English: C1"
        ]
    );
}

#[test]
fn test_writeDocx_shouldNumberOnlyBulletItems() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("cv.docx");

    write_docx(&sample_document(), &path).unwrap();

    assert_eq!(
        read_docx_numbering(&path).unwrap(),
        vec![false, false, false, true, true]
    );
}

#[test]
fn test_exportFormat_shouldExposeExtensionsAndMimeTypes() {
    assert_eq!(ExportFormat::Docx.extension(), "docx");
    assert_eq!(ExportFormat::Pdf.extension(), "pdf");
    assert_eq!(ExportFormat::Pdf.mime_type(), "application/pdf");
    assert_eq!(
        ExportFormat::Docx.mime_type(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
    assert!("odt".parse::<ExportFormat>().is_err());
}

#[test]
fn test_exportFormat_failureMessage_shouldBeLocalized() {
    assert_eq!(
        ExportFormat::Docx.failure_message(Language::English),
        "The Word file was not generated correctly."
    );
    assert_eq!(
        ExportFormat::Pdf.failure_message(Language::Spanish),
        "El archivo PDF no se generó correctamente."
    );
    assert_eq!(ExportFormat::Pdf.action_label(Language::German), "PDF generieren");
}

#[tokio::test]
async fn test_export_docx_shouldCreateParentDirectories() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("nested").join("out").join("cv_en.docx");
    let exporter = Exporter::new(Arc::new(MockConverter::working()));

    let artifact = exporter
        .export(&sample_document(), ExportFormat::Docx, &path)
        .await
        .unwrap();

    assert_eq!(artifact.path, path);
    assert_eq!(artifact.format, ExportFormat::Docx);
    assert!(path.is_file());
}

#[tokio::test]
async fn test_export_pdf_withWorkingConverter_shouldWritePdfAndRemoveIntermediate() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("cv_en.pdf");
    let converter = MockConverter::working();
    let exporter = Exporter::new(Arc::new(converter.clone()));

    let artifact = exporter
        .export(&sample_document(), ExportFormat::Pdf, &path)
        .await
        .unwrap();

    assert_eq!(artifact.mime_type(), "application/pdf");
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));

    let inputs = converter.inputs();
    assert_eq!(inputs.len(), 1);
    assert!(!inputs[0].exists());
    assert!(!inputs[0].parent().unwrap().exists());
    assert_eq!(list_dir(temp_dir.path()), vec!["cv_en.pdf".to_string()]);
}

#[tokio::test]
async fn test_export_pdf_withFailingConverter_shouldReturnConversionFailure() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("cv_en.pdf");
    let converter = MockConverter::failing();
    let exporter = Exporter::new(Arc::new(converter.clone()));

    let err = exporter
        .export(&sample_document(), ExportFormat::Pdf, &path)
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::ConversionFailed(_)));
    assert!(err.is_conversion_failure());
    assert!(!path.exists());
    assert!(!converter.inputs()[0].exists());
    assert!(list_dir(temp_dir.path()).is_empty());
}

#[tokio::test]
async fn test_export_pdf_withSilentConverter_shouldReportEmptyOutput() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("cv_en.pdf");
    let converter = MockConverter::silent();
    let exporter = Exporter::new(Arc::new(converter.clone()));

    let err = exporter
        .export(&sample_document(), ExportFormat::Pdf, &path)
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::EmptyOutput(_)));
    assert!(!path.exists());
    assert!(!converter.inputs()[0].exists());
}

#[tokio::test]
async fn test_export_pdf_withZeroByteOutput_shouldReportEmptyOutput() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("cv_en.pdf");
    let exporter = Exporter::new(Arc::new(MockConverter::zero_bytes()));

    let err = exporter
        .export(&sample_document(), ExportFormat::Pdf, &path)
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::EmptyOutput(_)));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_officeConverter_withMissingProgram_shouldReportUnavailable() {
    let temp_dir = create_temp_dir().unwrap();
    let input = temp_dir.path().join("cv.docx");
    write_docx(&sample_document(), &input).unwrap();
    let converter = OfficeConverter::new(
        "cvforge-converter-that-does-not-exist",
        Duration::from_secs(5),
    );

    let err = converter
        .convert_to_pdf(&input, temp_dir.path())
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::ConverterUnavailable { .. }));
    assert!(err.is_conversion_failure());
}

/// Converter stand-in that records its arguments, then hangs
#[cfg(unix)]
fn hanging_converter_script(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    use std::os::unix::fs::PermissionsExt;

    let args_file = dir.join("args.txt");
    let script = dir.join("hanging-soffice.sh");
    std::fs::write(
        &script,
        format!(
            "#!/bin/sh\nfor a in \"$@\"; do echo \"$a\"; done > '{}'\nexec sleep 30\n",
            args_file.display()
        ),
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    (script, args_file)
}

#[cfg(unix)]
#[tokio::test]
async fn test_export_pdf_withHangingConverter_shouldTimeOutAndCleanUp() {
    let temp_dir = create_temp_dir().unwrap();
    let (script, args_file) = hanging_converter_script(temp_dir.path());
    let converter = OfficeConverter::new(
        script.display().to_string(),
        Duration::from_millis(1500),
    );
    let exporter = Exporter::new(Arc::new(converter));
    let path = temp_dir.path().join("out").join("curriculum_en.pdf");

    let err = exporter
        .export(&sample_document(), ExportFormat::Pdf, &path)
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::ConversionTimeout(_)));
    assert!(err.is_conversion_failure());
    assert!(!path.exists());

    // the converter saw the private work directory; it must be gone now
    let args = std::fs::read_to_string(&args_file).unwrap();
    let lines: Vec<&str> = args.lines().collect();
    let outdir_pos = lines.iter().position(|arg| *arg == "--outdir").unwrap();
    let workdir = std::path::Path::new(lines[outdir_pos + 1]);
    let intermediate = std::path::Path::new(lines[outdir_pos + 2]);
    assert!(
        workdir
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("cvforge-")
    );
    assert!(!workdir.exists());
    assert!(!intermediate.exists());
}
