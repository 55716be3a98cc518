/*!
 * Error types for the cvforge application.
 *
 * Each stage of the résumé pipeline has its own error family, defined with
 * the thiserror crate. Only `ExportError` ever reaches the caller of a run:
 * section and provider failures are recovered locally (placeholder text and
 * pass-through translation respectively).
 */

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when talking to a remote text-generation service
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting or exhausted quota
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The call did not complete within the configured bound
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered but produced no usable text
    #[error("Provider returned an empty response")]
    EmptyResponse,
}

impl ProviderError {
    /// Whether a retry has a reasonable chance of succeeding.
    ///
    /// Network hiccups, timeouts, throttling and 5xx answers are transient;
    /// authentication problems and malformed answers are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionError(_) | Self::Timeout(_) | Self::RateLimitExceeded(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            Self::RequestFailed(_)
            | Self::ParseError(_)
            | Self::AuthenticationError(_)
            | Self::EmptyResponse => false,
        }
    }

    /// Map a non-success HTTP status to the matching variant
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        // request URLs can carry credentials
        let error = error.without_url();
        if error.is_timeout() || error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors raised while reading section sources
#[derive(Error, Debug)]
pub enum SectionError {
    /// The backing resource of a section does not exist
    #[error("Section '{section}' not found at {resource}")]
    ResourceMissing {
        /// Section identifier
        section: String,
        /// Path or key of the missing resource
        resource: String,
    },

    /// The resource exists but could not be read
    #[error("Section '{section}' could not be read from {resource}: {reason}")]
    Unreadable {
        /// Section identifier
        section: String,
        /// Path or key of the resource
        resource: String,
        /// Underlying failure
        reason: String,
    },
}

impl SectionError {
    /// Path or key of the resource the error refers to
    pub fn resource(&self) -> &str {
        match self {
            Self::ResourceMissing { resource, .. } | Self::Unreadable { resource, .. } => resource,
        }
    }
}

/// Errors that can occur while writing an output artifact
#[derive(Error, Debug)]
pub enum ExportError {
    /// Filesystem failure while writing an artifact
    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),

    /// The word-processor serializer failed
    #[error("Failed to write DOCX package: {0}")]
    Docx(String),

    /// The external converter could not be started
    #[error("Document converter '{program}' is unavailable: {reason}")]
    ConverterUnavailable {
        /// Program that was invoked
        program: String,
        /// Reason reported by the OS
        reason: String,
    },

    /// The converter ran but reported a failure
    #[error("Document conversion failed: {0}")]
    ConversionFailed(String),

    /// The converter exceeded its time bound
    #[error("Document conversion timed out after {0:?}")]
    ConversionTimeout(Duration),

    /// The converter claimed success but produced nothing usable
    #[error("Conversion produced no output at {0}")]
    EmptyOutput(String),
}

impl ExportError {
    /// Whether this error belongs to the conversion stage rather than DOCX writing
    pub fn is_conversion_failure(&self) -> bool {
        matches!(
            self,
            Self::ConverterUnavailable { .. }
                | Self::ConversionFailed(_)
                | Self::ConversionTimeout(_)
                | Self::EmptyOutput(_)
        )
    }
}

/// Startup configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A section has no label for one of the supported languages
    #[error("Section '{section}' has no label for language '{language}'")]
    MissingLabel {
        /// Section identifier
        section: String,
        /// Language code lacking a label
        language: String,
    },

    /// A language code could not be recognised
    #[error("Unsupported language: {0}")]
    InvalidLanguage(String),

    /// Two sections share one identifier
    #[error("Section '{0}' is declared more than once")]
    DuplicateSection(String),

    /// The catalog declares no sections at all
    #[error("No sections are declared")]
    NoSections,

    /// Any other invalid setting
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from a section source
    #[error("Section error: {0}")]
    Section(#[from] SectionError),

    /// Error from an export
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
