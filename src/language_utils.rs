use std::fmt;
use std::str::FromStr;

use isolang::Language as IsoLanguage;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Language utilities for the résumé pipeline
///
/// The set of document languages is closed: every section label table must be
/// total over `Language::ALL`. Parsing accepts ISO 639-1, ISO 639-2/T and
/// ISO 639-2/B codes as well as the language's own name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "de")]
    German,
}

impl Language {
    /// Every supported language, in selector order
    pub const ALL: [Language; 5] = [
        Language::Spanish,
        Language::English,
        Language::French,
        Language::Portuguese,
        Language::German,
    ];

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Spanish => "es",
            Self::English => "en",
            Self::French => "fr",
            Self::Portuguese => "pt",
            Self::German => "de",
        }
    }

    /// Name of the language written in that language
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::Spanish => "Español",
            Self::English => "English",
            Self::French => "Français",
            Self::Portuguese => "Português",
            Self::German => "Deutsch",
        }
    }

    /// English name, as used in translation instructions
    pub fn english_name(&self) -> String {
        IsoLanguage::from_639_1(self.code())
            .map(|lang| lang.to_name().to_string())
            .unwrap_or_else(|| self.native_name().to_string())
    }

    fn from_part1(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|lang| lang.code() == code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();

        if let Some(lang) = Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.native_name().to_lowercase() == normalized)
        {
            return Ok(lang);
        }

        let part1 = normalize_to_part1(&normalized)
            .ok_or_else(|| ConfigError::InvalidLanguage(s.to_string()))?;

        Language::from_part1(&part1).ok_or_else(|| ConfigError::InvalidLanguage(s.to_string()))
    }
}

/// Map an ISO 639-2/B code to its ISO 639-2/T form
fn part2b_to_part2t(code: &str) -> &str {
    match code {
        "fre" => "fra",
        "ger" => "deu",
        "spa" => "spa",
        "por" => "por",
        "eng" => "eng",
        _ => code,
    }
}

/// Normalize a language code to ISO 639-1 (2-letter) format if possible
pub fn normalize_to_part1(code: &str) -> Option<String> {
    let normalized = code.trim().to_lowercase();

    match normalized.len() {
        2 => IsoLanguage::from_639_1(&normalized).map(|_| normalized),
        3 => IsoLanguage::from_639_3(part2b_to_part2t(&normalized))
            .and_then(|lang| lang.to_639_1())
            .map(|code| code.to_string()),
        _ => IsoLanguage::from_name(&capitalize(&normalized))
            .and_then(|lang| lang.to_639_1())
            .map(|code| code.to_string()),
    }
}

/// Check if two language codes represent the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part1(code1), normalize_to_part1(code2)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
