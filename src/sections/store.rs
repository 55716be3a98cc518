/*!
 * Section sources.
 *
 * A store resolves a `SectionId` to raw text. Reads are independent: a missing
 * resource for one section is reported as `SectionError::ResourceMissing` for
 * that section only, and the caller substitutes it as the section body.
 */

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::errors::SectionError;
use crate::language_utils::Language;

use super::catalog::{SectionCatalog, SectionId};

/// Source of raw section text
pub trait SectionStore: Send + Sync {
    /// Load the raw text of a single section
    fn load(&self, id: &SectionId) -> Result<String, SectionError>;
}

/// Body of a loaded section
#[derive(Debug)]
pub enum SectionBody {
    /// Text as read from the source (or as translated)
    Text(String),
    /// The source could not provide the section
    Unavailable(SectionError),
}

impl SectionBody {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Unavailable(_) => None,
        }
    }
}

/// One résumé section ready for translation and layout
#[derive(Debug)]
pub struct Section {
    /// Stable identifier
    pub key: SectionId,
    /// Localized heading
    pub title: String,
    /// Backing resource name, as declared in the catalog
    pub source: String,
    /// Section content
    pub body: SectionBody,
}

/// Load every declared section, in declaration order
///
/// Never fails as a whole; unavailable sections carry their error as body.
pub fn load_sections(
    store: &dyn SectionStore,
    catalog: &SectionCatalog,
    language: Language,
) -> Vec<Section> {
    catalog
        .sections()
        .iter()
        .map(|spec| {
            let body = match store.load(&spec.id) {
                Ok(text) => {
                    debug!("Loaded section '{}' ({} bytes)", spec.id, text.len());
                    SectionBody::Text(text)
                }
                Err(e) => {
                    warn!("{}", e);
                    SectionBody::Unavailable(e)
                }
            };

            Section {
                key: spec.id.clone(),
                title: catalog.label(&spec.id, language).to_string(),
                source: spec.file.clone(),
                body,
            }
        })
        .collect()
}

/// Markdown files in a directory, one per section
pub struct FileSectionStore {
    root: PathBuf,
    files: HashMap<SectionId, String>,
}

impl FileSectionStore {
    /// Create a store resolving catalog entries against `root`
    pub fn from_catalog(root: impl Into<PathBuf>, catalog: &SectionCatalog) -> Self {
        Self {
            root: root.into(),
            files: catalog
                .sections()
                .iter()
                .map(|spec| (spec.id.clone(), spec.file.clone()))
                .collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resource_path(&self, id: &SectionId) -> Option<PathBuf> {
        self.files.get(id).map(|file| self.root.join(file))
    }
}

impl SectionStore for FileSectionStore {
    fn load(&self, id: &SectionId) -> Result<String, SectionError> {
        let path = self
            .resource_path(id)
            .ok_or_else(|| SectionError::ResourceMissing {
                section: id.to_string(),
                resource: id.to_string(),
            })?;
        let resource = path.display().to_string();

        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SectionError::ResourceMissing {
                section: id.to_string(),
                resource,
            },
            _ => SectionError::Unreadable {
                section: id.to_string(),
                resource,
                reason: e.to_string(),
            },
        })
    }
}

/// In-memory store, useful for embedding and tests
#[derive(Debug, Default, Clone)]
pub struct MemorySectionStore {
    texts: HashMap<SectionId, String>,
}

impl MemorySectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a section's text
    pub fn with_section(mut self, id: &str, text: impl Into<String>) -> Self {
        self.texts.insert(SectionId::new(id), text.into());
        self
    }
}

impl SectionStore for MemorySectionStore {
    fn load(&self, id: &SectionId) -> Result<String, SectionError> {
        self.texts
            .get(id)
            .cloned()
            .ok_or_else(|| SectionError::ResourceMissing {
                section: id.to_string(),
                resource: format!("memory:{}", id),
            })
    }
}
