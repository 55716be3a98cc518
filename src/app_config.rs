use anyhow::{Context, Result};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use url::Url;

use crate::errors::ConfigError;
use crate::language_utils::Language;
use crate::sections::{SectionCatalog, SectionSpec, default_sections};

/// Résumé generation settings, read from `conf.json`
///
/// Every field has a default, so a partial file is valid.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language the section sources are written in
    #[serde(default = "default_source_language")]
    pub source_language: Language,

    /// Language to render when none is given on the command line
    #[serde(default = "default_source_language")]
    pub target_language: Language,

    /// Document title (the person's name)
    #[serde(default = "default_full_name")]
    pub full_name: String,

    /// Directory holding one markdown file per section
    #[serde(default = "default_sections_dir")]
    pub sections_dir: PathBuf,

    /// Directory receiving generated artifacts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File stem of generated artifacts, suffixed with the language code
    #[serde(default = "default_output_basename")]
    pub output_basename: String,

    /// Declared sections in document order
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionSpec>,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// PDF converter config
    #[serde(default)]
    pub converter: ConverterConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google Gemini
    #[default]
    Gemini,
    // @provider: OpenAI and compatible servers
    OpenAI,
    // @provider: Anthropic
    Anthropic,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Gemini => "Gemini",
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Gemini => "gemini".to_string(),
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(ConfigError::Invalid(format!("Invalid provider type: {}", s))),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Master switch; when false every language is rendered from source text
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Model name; empty selects the provider default
    #[serde(default)]
    pub model: String,

    /// Service URL; empty selects the provider default
    #[serde(default)]
    pub endpoint: String,

    /// API key stored in the file (the environment takes precedence)
    #[serde(default)]
    pub api_key: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Upper bound for one remote call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts for transient failures
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Base backoff between attempts, doubled each retry (milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Temperature parameter for text generation (0.0 to 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: TranslationProvider::default(),
            model: String::new(),
            endpoint: String::new(),
            api_key: String::new(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            temperature: default_temperature(),
        }
    }
}

impl TranslationConfig {
    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if !self.model.is_empty() {
            return self.model.clone();
        }

        match self.provider {
            TranslationProvider::Gemini => "gemini-2.0-flash".to_string(),
            TranslationProvider::OpenAI => "gpt-4o-mini".to_string(),
            TranslationProvider::Anthropic => "claude-3-haiku-20240307".to_string(),
        }
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if !self.endpoint.is_empty() {
            return self.endpoint.clone();
        }

        match self.provider {
            TranslationProvider::Gemini => "https://generativelanguage.googleapis.com".to_string(),
            TranslationProvider::OpenAI => "https://api.openai.com/v1".to_string(),
            TranslationProvider::Anthropic => "https://api.anthropic.com".to_string(),
        }
    }

    /// Resolve the credential: environment variable first, then the file
    ///
    /// Returns `None` when no usable key exists; translation is then disabled.
    pub fn resolve_api_key(&self) -> Option<String> {
        let from_env = if self.api_key_env.is_empty() {
            None
        } else {
            std::env::var(&self.api_key_env).ok()
        };

        from_env
            .filter(|key| !key.trim().is_empty())
            .or_else(|| Some(self.api_key.clone()).filter(|key| !key.trim().is_empty()))
    }
}

/// External document converter used for PDF output
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ConverterConfig {
    /// Program to invoke (LibreOffice by default)
    #[serde(default = "default_converter_program")]
    pub program: String,

    /// Upper bound for one conversion, in seconds
    #[serde(default = "default_converter_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: default_converter_program(),
            timeout_secs: default_converter_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> Language {
    Language::Spanish
}

fn default_full_name() -> String {
    "FIRST LAST".to_string()
}

fn default_sections_dir() -> PathBuf {
    PathBuf::from("markdown")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_output_basename() -> String {
    "curriculum".to_string()
}

fn default_true() -> bool {
    true
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_retry_count() -> u32 {
    1
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_temperature() -> f32 {
    0.3
}

fn default_converter_program() -> String {
    "soffice".to_string()
}

fn default_converter_timeout_secs() -> u64 {
    120
}

impl Config {
    /// Load the configuration file, writing a default one if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;

            let reader = BufReader::new(file);
            serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))
        } else {
            warn!("Config file not found at {:?}, creating default config.", path);

            let config = Config::default();
            let config_json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize default config to JSON")?;

            std::fs::write(path, config_json)
                .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

            Ok(config)
        }
    }

    /// Validate the configuration for consistency and required values
    ///
    /// A missing API key is not an error: it disables translation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.full_name.trim().is_empty() {
            return Err(ConfigError::Invalid("full_name must not be empty".to_string()));
        }

        if self.output_basename.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "output_basename must not be empty".to_string(),
            ));
        }

        if self.translation.timeout_secs == 0 || self.converter.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeouts must be positive".to_string()));
        }

        if !(0.0..=2.0).contains(&self.translation.temperature) {
            return Err(ConfigError::Invalid(format!(
                "temperature out of range: {}",
                self.translation.temperature
            )));
        }

        Url::parse(&self.translation.get_endpoint()).map_err(|e| {
            ConfigError::Invalid(format!(
                "invalid endpoint '{}': {}",
                self.translation.get_endpoint(),
                e
            ))
        })?;

        self.catalog().map(|_| ())
    }

    /// Build the validated section catalog
    pub fn catalog(&self) -> Result<SectionCatalog, ConfigError> {
        SectionCatalog::new(self.sections.clone())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_source_language(),
            full_name: default_full_name(),
            sections_dir: default_sections_dir(),
            output_dir: default_output_dir(),
            output_basename: default_output_basename(),
            sections: default_sections(),
            translation: TranslationConfig::default(),
            converter: ConverterConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
