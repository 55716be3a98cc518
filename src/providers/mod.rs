/*!
 * Provider implementations for remote text generation.
 *
 * This module contains client implementations for the supported services:
 * - Gemini: Google Generative Language API (default)
 * - OpenAI: chat completions, also used for OpenAI-compatible local servers
 * - Anthropic: messages API
 * - Mock: scripted behaviors for tests
 */

use async_trait::async_trait;
use log::warn;
use std::fmt::Debug;
use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;

/// Common trait for all text-generation providers
///
/// One prompt in, one text out. Implementations map every transport or API
/// failure to a `ProviderError`; the translator decides what to do with it.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short provider name for log messages
    fn name(&self) -> &str;

    /// Complete a prompt and return the generated text
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.complete("Reply with the single word: ok").await.map(|_| ())
    }
}

/// Build the configured provider client
pub fn build_provider(config: &TranslationConfig, api_key: String) -> Box<dyn Provider> {
    let timeout = Duration::from_secs(config.timeout_secs);
    let model = config.get_model();
    let endpoint = config.get_endpoint();

    match config.provider {
        TranslationProvider::Gemini => Box::new(
            gemini::Gemini::new(api_key, endpoint, model, timeout).temperature(config.temperature),
        ),
        TranslationProvider::OpenAI => Box::new(
            openai::OpenAI::new(api_key, endpoint, model, timeout).temperature(config.temperature),
        ),
        TranslationProvider::Anthropic => Box::new(
            anthropic::Anthropic::new(api_key, endpoint, model, timeout)
                .temperature(config.temperature),
        ),
    }
}

/// Build an HTTP client with the given request timeout
pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    finish_client(reqwest::Client::builder().timeout(timeout), timeout)
}

/// Build `builder`, falling back to a plain client that still honours `timeout`
pub(crate) fn finish_client(builder: reqwest::ClientBuilder, timeout: Duration) -> reqwest::Client {
    match builder.build() {
        Ok(client) => client,
        Err(e) => {
            warn!(
                "HTTP client configuration rejected ({}); using defaults with {:?} timeout",
                e, timeout
            );
            reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new())
        }
    }
}

/// Turn a non-success HTTP response into a `ProviderError`
pub(crate) async fn error_from_response(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    ProviderError::from_status(status, error_text)
}

pub mod anthropic;
pub mod gemini;
pub mod mock;
pub mod openai;
