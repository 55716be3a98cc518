/*!
 * Declared résumé sections and their localized labels.
 *
 * The catalog fixes the order in which sections appear in every generated
 * document. Labels live in a `(SectionId, Language) -> label` table that is
 * checked for totality when the catalog is built, so a lookup at render time
 * can never miss.
 */

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::language_utils::Language;

/// Stable, language-independent identifier of a section
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Declaration of one section: identifier, backing resource and labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Stable identifier
    pub id: SectionId,

    /// Backing resource, relative to the sections directory
    pub file: String,

    /// Heading text per language
    pub labels: HashMap<Language, String>,
}

impl SectionSpec {
    pub fn new(id: &str, file: &str, labels: &[(Language, &str)]) -> Self {
        Self {
            id: SectionId::new(id),
            file: file.to_string(),
            labels: labels
                .iter()
                .map(|(lang, label)| (*lang, label.to_string()))
                .collect(),
        }
    }
}

/// Ordered, validated set of section declarations
#[derive(Debug, Clone)]
pub struct SectionCatalog {
    sections: Vec<SectionSpec>,
    labels: HashMap<(SectionId, Language), String>,
}

impl SectionCatalog {
    /// Build a catalog, rejecting duplicates and incomplete label tables
    pub fn new(sections: Vec<SectionSpec>) -> Result<Self, ConfigError> {
        if sections.is_empty() {
            return Err(ConfigError::NoSections);
        }

        let mut seen = HashSet::new();
        let mut labels = HashMap::new();

        for spec in &sections {
            if !seen.insert(spec.id.clone()) {
                return Err(ConfigError::DuplicateSection(spec.id.to_string()));
            }

            for language in Language::ALL {
                let label = spec
                    .labels
                    .get(&language)
                    .filter(|label| !label.trim().is_empty())
                    .ok_or_else(|| ConfigError::MissingLabel {
                        section: spec.id.to_string(),
                        language: language.code().to_string(),
                    })?;
                labels.insert((spec.id.clone(), language), label.clone());
            }
        }

        Ok(Self { sections, labels })
    }

    /// Localized heading for a section
    ///
    /// Totality is checked in `new`; an unknown id falls back to the id itself.
    pub fn label<'a>(&'a self, id: &'a SectionId, language: Language) -> &'a str {
        self.labels
            .get(&(id.clone(), language))
            .map(String::as_str)
            .unwrap_or_else(|| id.as_str())
    }

    /// Sections in declaration order
    pub fn sections(&self) -> &[SectionSpec] {
        &self.sections
    }

    pub fn get(&self, id: &SectionId) -> Option<&SectionSpec> {
        self.sections.iter().find(|spec| &spec.id == id)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// The five-section résumé layout with labels in every supported language
pub fn default_sections() -> Vec<SectionSpec> {
    use Language::*;

    vec![
        SectionSpec::new(
            "profile",
            "perfil_profesional.md",
            &[
                (Spanish, "Datos de Contacto"),
                (English, "Contact Information"),
                (French, "Informations de Contact"),
                (Portuguese, "Informações de Contato"),
                (German, "Kontaktinformationen"),
            ],
        ),
        SectionSpec::new(
            "experience",
            "experiencia_profesional.md",
            &[
                (Spanish, "Experiencia Profesional"),
                (English, "Professional Experience"),
                (French, "Expérience Professionnelle"),
                (Portuguese, "Experiência Profissional"),
                (German, "Berufserfahrung"),
            ],
        ),
        SectionSpec::new(
            "education",
            "experiencia_academica.md",
            &[
                (Spanish, "Experiencia Académica"),
                (English, "Academic Experience"),
                (French, "Expérience Académique"),
                (Portuguese, "Experiência Acadêmica"),
                (German, "Akademische Erfahrung"),
            ],
        ),
        SectionSpec::new(
            "additional",
            "informacion_adicional.md",
            &[
                (Spanish, "Información Adicional"),
                (English, "Additional Information"),
                (French, "Informations Supplémentaires"),
                (Portuguese, "Informações Adicionais"),
                (German, "Zusätzliche Informationen"),
            ],
        ),
        SectionSpec::new(
            "languages",
            "idiomas.md",
            &[
                (Spanish, "Idiomas"),
                (English, "Languages"),
                (French, "Langues"),
                (Portuguese, "Idiomas"),
                (German, "Sprachen"),
            ],
        ),
    ]
}
