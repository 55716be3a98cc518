/*!
 * End-to-end tests of the generation pipeline
 */

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use cvforge::app_config::Config;
use cvforge::document::BlockKind;
use cvforge::errors::SectionError;
use cvforge::export::ExportFormat;
use cvforge::language_utils::Language;
use cvforge::pipeline::{ResumePipeline, RunStage};
use cvforge::providers::mock::MockProvider;
use cvforge::sections::{FileSectionStore, MemorySectionStore, SectionId};
use cvforge::translation::{RetryPolicy, TranslationCache, Translator};

use crate::common::mock_converters::MockConverter;
use crate::common::{
    create_temp_dir, create_test_file, init_test_logging, list_dir, profile_languages_catalog,
    read_docx_paragraphs, test_pipeline,
};

fn formats(list: &[ExportFormat]) -> BTreeSet<ExportFormat> {
    list.iter().copied().collect()
}

fn scenario_store() -> MemorySectionStore {
    MemorySectionStore::new()
        .with_section("profile", "Contact: a@b.com")
        .with_section("languages", "- Spanish: Native")
}

#[tokio::test]
async fn test_generate_withSourceLanguage_shouldProduceExpectedDocx() {
    init_test_logging();
    let temp_dir = create_temp_dir().unwrap();
    let provider = MockProvider::working();
    let counter = provider.counter();
    let translator = Translator::new(Box::new(provider), Language::Spanish, TranslationCache::new());
    let pipeline = test_pipeline(
        Box::new(scenario_store()),
        profile_languages_catalog(),
        translator,
        Arc::new(MockConverter::working()),
        temp_dir.path(),
    );

    let report = pipeline
        .generate(Language::Spanish, &formats(&[ExportFormat::Docx]))
        .await;

    assert_eq!(
        report.document.kinds(),
        vec![
            BlockKind::Title,
            BlockKind::Heading { level: 2 },
            BlockKind::Paragraph,
            BlockKind::Heading { level: 2 },
            BlockKind::BulletItem,
        ]
    );
    let artifact = report.artifacts[&ExportFormat::Docx].as_ref().unwrap();
    assert_eq!(artifact.path, temp_dir.path().join("curriculum_es.docx"));
    assert_eq!(
        read_docx_paragraphs(&artifact.path).unwrap(),
        vec!["Jane Doe", "Profile", "Contact: a@b.com", "Languages", "Spanish: Native"]
    );
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert_eq!(report.translation.translated, 2);
}

#[tokio::test]
async fn test_generate_withMissingSection_shouldKeepHeadingAndPlaceholder() {
    init_test_logging();
    let temp_dir = create_temp_dir().unwrap();
    let sections_dir = temp_dir.path().join("markdown");
    std::fs::create_dir_all(&sections_dir).unwrap();
    create_test_file(&sections_dir, "profile.md", "Contact: a@b.com").unwrap();
    let catalog = profile_languages_catalog();
    let store = FileSectionStore::from_catalog(&sections_dir, &catalog);
    let pipeline = test_pipeline(
        Box::new(store),
        catalog,
        Translator::disabled(Language::Spanish, TranslationCache::new()),
        Arc::new(MockConverter::working()),
        temp_dir.path(),
    );

    let report = pipeline
        .generate(Language::Spanish, &formats(&[ExportFormat::Docx]))
        .await;

    let blocks = &report.document.blocks;
    assert_eq!(blocks.len(), 5);
    assert_eq!(blocks[3].kind, BlockKind::Heading { level: 2 });
    assert_eq!(blocks[3].text, "Languages");
    assert_eq!(blocks[4].kind, BlockKind::Paragraph);
    assert!(blocks[4].text.contains("languages.md"));
    assert_eq!(report.translation.missing, 1);
    assert!(report.artifacts[&ExportFormat::Docx].is_ok());
}

#[tokio::test]
async fn test_generate_withFailingTranslation_shouldExportOriginalText() {
    init_test_logging();
    let temp_dir = create_temp_dir().unwrap();
    let translator = Translator::new(
        Box::new(MockProvider::failing()),
        Language::Spanish,
        TranslationCache::new(),
    )
    .with_retry(RetryPolicy::none());
    let pipeline = test_pipeline(
        Box::new(scenario_store()),
        profile_languages_catalog(),
        translator,
        Arc::new(MockConverter::working()),
        temp_dir.path(),
    );

    let report = pipeline
        .generate(
            Language::English,
            &formats(&[ExportFormat::Docx, ExportFormat::Pdf]),
        )
        .await;

    assert_eq!(report.translation.passed_through, 2);
    assert!(report.failures().next().is_none());
    let docx = report.artifacts[&ExportFormat::Docx].as_ref().unwrap();
    let paragraphs = read_docx_paragraphs(&docx.path).unwrap();
    assert!(paragraphs.contains(&"Contact: a@b.com".to_string()));
    assert!(paragraphs.contains(&"Spanish: Native".to_string()));
    let pdf = report.artifacts[&ExportFormat::Pdf].as_ref().unwrap();
    assert_eq!(pdf.path, temp_dir.path().join("curriculum_en.pdf"));
    assert!(pdf.path.is_file());
}

#[tokio::test]
async fn test_generate_withTranslation_shouldUseTranslatedTextAndLabels() {
    init_test_logging();
    let temp_dir = create_temp_dir().unwrap();
    let translator = Translator::new(
        Box::new(MockProvider::fenced()),
        Language::Spanish,
        TranslationCache::new(),
    );
    let pipeline = test_pipeline(
        Box::new(scenario_store()),
        profile_languages_catalog(),
        translator,
        Arc::new(MockConverter::working()),
        temp_dir.path(),
    );

    let report = pipeline
        .generate(Language::German, &formats(&[ExportFormat::Docx]))
        .await;

    let texts: Vec<&str> = report.document.blocks.iter().map(|b| b.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Jane Doe",
            "Profile",
            "[TRANSLATED] Contact: a@b.com",
            "Languages",
            // the marker precedes the list dash, so the line is no longer a bullet
            "[TRANSLATED] - Spanish: Native",
        ]
    );
    assert_eq!(report.translation.translated, 2);
}

#[tokio::test]
async fn test_generate_withFailingPdf_shouldKeepDocx() {
    init_test_logging();
    let temp_dir = create_temp_dir().unwrap();
    let pipeline = test_pipeline(
        Box::new(scenario_store()),
        profile_languages_catalog(),
        Translator::disabled(Language::Spanish, TranslationCache::new()),
        Arc::new(MockConverter::failing()),
        temp_dir.path(),
    );

    let report = pipeline
        .generate(
            Language::Spanish,
            &formats(&[ExportFormat::Docx, ExportFormat::Pdf]),
        )
        .await;

    assert!(report.artifacts[&ExportFormat::Docx].is_ok());
    assert!(report.artifacts[&ExportFormat::Pdf].is_err());
    assert!(!report.all_failed());
    let failures: Vec<ExportFormat> = report.failures().map(|(format, _)| format).collect();
    assert_eq!(failures, vec![ExportFormat::Pdf]);
    assert_eq!(list_dir(temp_dir.path()), vec!["curriculum_es.docx".to_string()]);
}

#[tokio::test]
async fn test_generate_withEveryFormatFailing_shouldReportAllFailed() {
    init_test_logging();
    let temp_dir = create_temp_dir().unwrap();
    let pipeline = test_pipeline(
        Box::new(scenario_store()),
        profile_languages_catalog(),
        Translator::disabled(Language::Spanish, TranslationCache::new()),
        Arc::new(MockConverter::silent()),
        temp_dir.path(),
    );

    let report = pipeline
        .generate(Language::French, &formats(&[ExportFormat::Pdf]))
        .await;

    assert!(report.all_failed());
    assert_eq!(report.succeeded().count(), 0);
}

#[tokio::test]
async fn test_generate_twice_shouldReuseSharedCache() {
    init_test_logging();
    let temp_dir = create_temp_dir().unwrap();
    let provider = MockProvider::working();
    let counter = provider.counter();
    let cache = TranslationCache::new();
    let translator = Translator::new(Box::new(provider), Language::Spanish, cache.clone());
    let pipeline = test_pipeline(
        Box::new(scenario_store()),
        profile_languages_catalog(),
        translator,
        Arc::new(MockConverter::working()),
        temp_dir.path(),
    );

    let first = pipeline
        .generate(Language::Portuguese, &formats(&[ExportFormat::Docx]))
        .await;
    let second = pipeline
        .generate(Language::Portuguese, &formats(&[ExportFormat::Docx]))
        .await;

    assert_eq!(first.document, second.document);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn test_preview_shouldReturnOneTranslatedSection() {
    init_test_logging();
    let temp_dir = create_temp_dir().unwrap();
    let pipeline = test_pipeline(
        Box::new(scenario_store()),
        profile_languages_catalog(),
        Translator::new(
            Box::new(MockProvider::working()),
            Language::Spanish,
            TranslationCache::new(),
        ),
        Arc::new(MockConverter::working()),
        temp_dir.path(),
    );

    let result = pipeline
        .preview(&SectionId::new("languages"), Language::English)
        .await
        .unwrap();
    assert!(result.ok);
    assert_eq!(result.text, "[TRANSLATED] - Spanish: Native");

    let err = pipeline
        .preview(&SectionId::new("hobbies"), Language::English)
        .await
        .unwrap_err();
    assert!(matches!(err, SectionError::ResourceMissing { .. }));
}

#[tokio::test]
async fn test_fromConfig_withoutCredential_shouldRenderSourceText() {
    init_test_logging();
    let temp_dir = create_temp_dir().unwrap();
    let sections_dir = temp_dir.path().join("markdown");
    std::fs::create_dir_all(&sections_dir).unwrap();
    create_test_file(&sections_dir, "idiomas.md", "- Español: Nativo\n- Inglés: C1").unwrap();

    let mut config = Config::default();
    config.full_name = "Jane Doe".to_string();
    config.sections_dir = sections_dir;
    config.output_dir = temp_dir.path().join("output");
    config.translation.api_key = String::new();
    config.translation.api_key_env = "CVFORGE_TEST_KEY_THAT_IS_NEVER_SET".to_string();
    config.converter.program = "cvforge-converter-that-does-not-exist".to_string();
    config.converter.timeout_secs = 5;

    let pipeline = ResumePipeline::from_config(&config, TranslationCache::new()).unwrap();
    assert!(!pipeline.translator().is_enabled());

    let report = pipeline
        .generate(
            Language::English,
            &formats(&[ExportFormat::Docx, ExportFormat::Pdf]),
        )
        .await;

    // five headings with English labels, four placeholders, one real section
    let headings: Vec<&str> = report.document.headings().map(|b| b.text.as_str()).collect();
    assert_eq!(
        headings,
        vec![
            "Contact Information",
            "Professional Experience",
            "Academic Experience",
            "Additional Information",
            "Languages"
        ]
    );
    assert_eq!(report.translation.missing, 4);
    assert_eq!(report.translation.passed_through, 1);
    let bullets: Vec<&str> = report
        .document
        .blocks
        .iter()
        .filter(|b| b.kind == BlockKind::BulletItem)
        .map(|b| b.text.as_str())
        .collect();
    assert_eq!(bullets, vec!["Español: Nativo", "Inglés: C1"]);

    let docx = report.artifacts[&ExportFormat::Docx].as_ref().unwrap();
    assert_eq!(docx.path, config.output_dir.join("curriculum_en.docx"));
    assert!(
        report.artifacts[&ExportFormat::Pdf]
            .as_ref()
            .unwrap_err()
            .is_conversion_failure()
    );
}

#[test]
fn test_runStage_shouldBeOrdered() {
    assert!(RunStage::Loaded < RunStage::Translated);
    assert!(RunStage::Translated < RunStage::Built);
    assert!(RunStage::Built < RunStage::Exported);
    assert_eq!(RunStage::Built.to_string(), "built");
}
