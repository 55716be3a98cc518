use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use log::{debug, error, info, warn};

use crate::app_config::Config;
use crate::document::{Document, DocumentBuilder};
use crate::errors::{ConfigError, ExportError, SectionError};
use crate::export::{ExportArtifact, ExportFormat, Exporter};
use crate::file_utils::FileManager;
use crate::language_utils::Language;
use crate::sections::{
    FileSectionStore, Section, SectionBody, SectionCatalog, SectionId, SectionStore, load_sections,
};
use crate::translation::{TranslationCache, TranslationResult, Translator};

// @module: Résumé generation pipeline

/// Stage reached by a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunStage {
    /// Section texts read from the store
    Loaded,
    /// Bodies translated or passed through
    Translated,
    /// Document laid out
    Built,
    /// Every requested format attempted
    Exported,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Loaded => "loaded",
            Self::Translated => "translated",
            Self::Built => "built",
            Self::Exported => "exported",
        };
        f.write_str(name)
    }
}

/// Per-run translation counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationSummary {
    /// Sections whose text is in the target language
    pub translated: usize,
    /// Sections kept in the source language after a failure
    pub passed_through: usize,
    /// Sections with no source text
    pub missing: usize,
}

/// Outcome of one `generate` call
#[derive(Debug)]
pub struct GenerationReport {
    pub language: Language,
    pub document: Document,
    pub translation: TranslationSummary,
    /// One entry per requested format; formats fail independently
    pub artifacts: BTreeMap<ExportFormat, Result<ExportArtifact, ExportError>>,
}

impl GenerationReport {
    /// Artifacts that were written successfully
    pub fn succeeded(&self) -> impl Iterator<Item = &ExportArtifact> {
        self.artifacts.values().filter_map(|result| result.as_ref().ok())
    }

    /// Formats that failed, with their error
    pub fn failures(&self) -> impl Iterator<Item = (ExportFormat, &ExportError)> {
        self.artifacts
            .iter()
            .filter_map(|(format, result)| result.as_ref().err().map(|e| (*format, e)))
    }

    /// True when formats were requested and none succeeded
    pub fn all_failed(&self) -> bool {
        !self.artifacts.is_empty() && self.succeeded().next().is_none()
    }
}

/// Where artifacts are written
#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub dir: PathBuf,
    pub basename: String,
}

impl OutputSettings {
    pub fn new(dir: impl Into<PathBuf>, basename: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            basename: basename.into(),
        }
    }

    /// `<dir>/<basename>_<lang>.<ext>`
    pub fn artifact_path(&self, language: Language, format: ExportFormat) -> PathBuf {
        FileManager::generate_output_path(
            &self.dir,
            &self.basename,
            language.code(),
            format.extension(),
        )
    }
}

/// Load → translate → build → export, one language per run
pub struct ResumePipeline {
    store: Box<dyn SectionStore>,
    catalog: SectionCatalog,
    translator: Translator,
    builder: DocumentBuilder,
    exporter: Exporter,
    output: OutputSettings,
}

impl ResumePipeline {
    pub fn new(
        store: Box<dyn SectionStore>,
        catalog: SectionCatalog,
        translator: Translator,
        builder: DocumentBuilder,
        exporter: Exporter,
        output: OutputSettings,
    ) -> Self {
        Self {
            store,
            catalog,
            translator,
            builder,
            exporter,
            output,
        }
    }

    /// Assemble the pipeline described by `config`
    ///
    /// The cache is passed in so it can outlive a single pipeline.
    pub fn from_config(config: &Config, cache: TranslationCache) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = config.catalog()?;
        let store = FileSectionStore::from_catalog(&config.sections_dir, &catalog);

        Ok(Self::new(
            Box::new(store),
            catalog,
            Translator::from_config(config, cache),
            DocumentBuilder::new(config.full_name.clone()),
            Exporter::from_config(&config.converter),
            OutputSettings::new(&config.output_dir, config.output_basename.clone()),
        ))
    }

    pub fn catalog(&self) -> &SectionCatalog {
        &self.catalog
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn output(&self) -> &OutputSettings {
        &self.output
    }

    /// Generate the résumé in `language` for each of `formats`
    ///
    /// Every stage up to the document is total; only exporting can fail,
    /// and then only for the format concerned.
    pub async fn generate(
        &self,
        language: Language,
        formats: &BTreeSet<ExportFormat>,
    ) -> GenerationReport {
        let sections = load_sections(self.store.as_ref(), &self.catalog, language);
        log_stage(RunStage::Loaded, language);

        let (sections, translation) = self.translate_sections(sections, language).await;
        log_stage(RunStage::Translated, language);
        if translation.passed_through > 0 {
            warn!(
                "{} section(s) kept in {} because translation was unavailable",
                translation.passed_through,
                self.translator.source_language().english_name()
            );
        }

        let document = self.builder.build(&sections, language);
        log_stage(RunStage::Built, language);

        let mut artifacts = BTreeMap::new();
        for format in formats {
            let path = self.output.artifact_path(language, *format);
            let result = self.exporter.export(&document, *format, &path).await;
            if let Err(e) = &result {
                error!("Failed to export {}: {}", format, e);
            }
            artifacts.insert(*format, result);
        }
        log_stage(RunStage::Exported, language);

        GenerationReport {
            language,
            document,
            translation,
            artifacts,
        }
    }

    /// Text of a single section in `language`
    pub async fn preview(
        &self,
        id: &SectionId,
        language: Language,
    ) -> Result<TranslationResult, SectionError> {
        let spec = self
            .catalog
            .get(id)
            .ok_or_else(|| SectionError::ResourceMissing {
                section: id.to_string(),
                resource: id.to_string(),
            })?;

        let text = self.store.load(&spec.id)?;
        Ok(self.translator.translate(&text, language).await)
    }

    async fn translate_sections(
        &self,
        sections: Vec<Section>,
        language: Language,
    ) -> (Vec<Section>, TranslationSummary) {
        let mut summary = TranslationSummary::default();
        let mut translated = Vec::with_capacity(sections.len());

        for section in sections {
            let body = match section.body {
                SectionBody::Text(text) => {
                    let result = self.translator.translate(&text, language).await;
                    if result.ok {
                        summary.translated += 1;
                    } else {
                        summary.passed_through += 1;
                    }
                    SectionBody::Text(result.text)
                }
                SectionBody::Unavailable(e) => {
                    summary.missing += 1;
                    SectionBody::Unavailable(e)
                }
            };

            translated.push(Section { body, ..section });
        }

        (translated, summary)
    }
}

fn log_stage(stage: RunStage, language: Language) {
    if stage == RunStage::Exported {
        info!("Generation for {} finished", language.english_name());
    }
    debug!("Run for '{}' reached stage: {}", language, stage);
}
