/*!
 * # cvforge - multilingual résumé synthesis
 *
 * Builds a one-page résumé from per-section markdown files, translates it with
 * an AI provider and exports it as DOCX and PDF.
 *
 * ## Features
 *
 * - Sections loaded independently; a missing file becomes a placeholder
 * - Translation through various AI providers:
 *   - Google Gemini API
 *   - OpenAI API
 *   - Anthropic API
 * - Memoized translation with pass-through fallback on any failure
 * - DOCX output, PDF through a headless office converter
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `sections`: Section catalog, localized labels and section stores
 * - `translation`: AI-powered translation services:
 *   - `translation::core`: The `Translator` and its result type
 *   - `translation::cache`: Memoization keyed by content hash and language
 *   - `translation::formatting`: Normalization of provider output
 *   - `translation::prompts`: Prompt construction
 * - `document`: Document model and builder
 * - `export`: DOCX and PDF serialization
 * - `pipeline`: The load/translate/build/export orchestrator
 * - `providers`: Client implementations for various LLM providers
 * - `file_utils`: File system operations
 * - `language_utils`: Supported languages and ISO code handling
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod document;
pub mod errors;
pub mod export;
pub mod file_utils;
pub mod language_utils;
pub mod pipeline;
pub mod providers;
pub mod sections;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use document::{BlockKind, Document, DocumentBlock, DocumentBuilder};
pub use errors::{AppError, ConfigError, ExportError, ProviderError, SectionError};
pub use export::{ExportArtifact, ExportFormat, Exporter};
pub use language_utils::Language;
pub use pipeline::{GenerationReport, ResumePipeline, RunStage, TranslationSummary};
pub use translation::{TranslationCache, TranslationResult, Translator};
