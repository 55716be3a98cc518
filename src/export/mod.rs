/*!
 * Serialization of a `Document` into output artifacts.
 *
 * - `docx`: direct word-processor output
 * - `pdf`: conversion of a temporary DOCX through a `DocumentConverter`
 */

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use clap::ValueEnum;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::app_config::ConverterConfig;
use crate::document::Document;
use crate::errors::ExportError;
use crate::file_utils::FileManager;
use crate::language_utils::Language;

pub use self::docx::{render_docx, write_docx};
pub use self::pdf::{DocumentConverter, OfficeConverter, export_pdf};

pub mod docx;
pub mod pdf;

/// Supported output formats
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Docx,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Docx, ExportFormat::Pdf];

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

    /// User-facing notice that this format could not be produced
    pub fn failure_message(&self, language: Language) -> &'static str {
        use Language::*;
        match (self, language) {
            (Self::Docx, Spanish) => "El archivo Word no se generó correctamente.",
            (Self::Docx, English) => "The Word file was not generated correctly.",
            (Self::Docx, French) => "Le fichier Word n'a pas été généré correctement.",
            (Self::Docx, Portuguese) => "O arquivo Word não foi gerado corretamente.",
            (Self::Docx, German) => "Die Word-Datei wurde nicht korrekt generiert.",
            (Self::Pdf, Spanish) => "El archivo PDF no se generó correctamente.",
            (Self::Pdf, English) => "The PDF file was not generated correctly.",
            (Self::Pdf, French) => "Le fichier PDF n'a pas été généré correctement.",
            (Self::Pdf, Portuguese) => "O arquivo PDF não foi gerado corretamente.",
            (Self::Pdf, German) => "Die PDF-Datei wurde nicht korrekt generiert.",
        }
    }

    /// User-facing label for producing this format
    pub fn action_label(&self, language: Language) -> &'static str {
        use Language::*;
        match (self, language) {
            (Self::Docx, Spanish) => "Generar Word",
            (Self::Docx, English) => "Generate Word",
            (Self::Docx, French) => "Générer Word",
            (Self::Docx, Portuguese) => "Gerar Word",
            (Self::Docx, German) => "Word generieren",
            (Self::Pdf, Spanish) => "Generar PDF",
            (Self::Pdf, English) => "Generate PDF",
            (Self::Pdf, French) => "Générer PDF",
            (Self::Pdf, Portuguese) => "Gerar PDF",
            (Self::Pdf, German) => "PDF generieren",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "docx" => Ok(Self::Docx),
            "pdf" => Ok(Self::Pdf),
            other => Err(format!("Unsupported export format: {}", other)),
        }
    }
}

/// A file written by the exporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub path: PathBuf,
}

impl ExportArtifact {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Writes documents in any supported format
#[derive(Debug, Clone)]
pub struct Exporter {
    converter: Arc<dyn DocumentConverter>,
}

impl Exporter {
    pub fn new(converter: Arc<dyn DocumentConverter>) -> Self {
        Self { converter }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(Arc::new(OfficeConverter::from_config(config)))
    }

    /// Write `document` to `path` in `format`
    ///
    /// Temporary files never outlive the call, whatever the outcome.
    pub async fn export(
        &self,
        document: &Document,
        format: ExportFormat,
        path: &Path,
    ) -> Result<ExportArtifact, ExportError> {
        debug!("Exporting {} to {}", format, path.display());

        match format {
            ExportFormat::Docx => {
                FileManager::ensure_parent_dir(path)?;
                if let Err(e) = write_docx(document, path) {
                    // drop the truncated package
                    let _ = std::fs::remove_file(path);
                    return Err(e);
                }
            }
            ExportFormat::Pdf => export_pdf(document, self.converter.as_ref(), path).await?,
        }

        info!("Wrote {}", path.display());
        Ok(ExportArtifact {
            format,
            path: path.to_path_buf(),
        })
    }
}
