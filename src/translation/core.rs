/*!
 * Core translation service implementation.
 *
 * `Translator::translate` is total: it always yields a `TranslationResult`.
 * Identity requests (target equals source) and disabled translators never
 * reach the provider; every provider failure, timeout or empty answer is
 * turned into a pass-through of the original text.
 */

use std::time::Duration;

use log::{debug, info, warn};

use crate::app_config::Config;
use crate::errors::ProviderError;
use crate::language_utils::Language;
use crate::providers::{Provider, build_provider};

use super::cache::{TranslationCache, TranslationKey};
use super::formatting::strip_code_fences;
use super::prompts::translation_prompt;

/// Outcome of one translation request
///
/// `ok == false` means `text` is the original, returned verbatim.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub text: String,
    pub ok: bool,
}

impl TranslationResult {
    pub fn translated(text: impl Into<String>) -> Self {
        Self { text: text.into(), ok: true }
    }

    pub fn passthrough(text: impl Into<String>) -> Self {
        Self { text: text.into(), ok: false }
    }
}

/// Retry settings for transient provider failures
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub retries: u32,
    /// Base delay, doubled for each further attempt
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self { retries: 0, backoff: Duration::ZERO }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(1u32 << attempt.min(16))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { retries: 1, backoff: Duration::from_millis(1000) }
    }
}

/// Main translation service for section text
pub struct Translator {
    /// `None` when translation is disabled (e.g. no credential)
    provider: Option<Box<dyn Provider>>,
    source_language: Language,
    cache: TranslationCache,
    retry: RetryPolicy,
    timeout: Duration,
}

impl Translator {
    /// Create a translator backed by `provider`
    pub fn new(provider: Box<dyn Provider>, source_language: Language, cache: TranslationCache) -> Self {
        Self {
            provider: Some(provider),
            source_language,
            cache,
            retry: RetryPolicy::default(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Create a translator that passes every non-source request through
    pub fn disabled(source_language: Language, cache: TranslationCache) -> Self {
        Self {
            provider: None,
            source_language,
            cache,
            retry: RetryPolicy::none(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Build from configuration, resolving the credential
    ///
    /// A missing credential disables translation up front; no request is ever attempted.
    pub fn from_config(config: &Config, cache: TranslationCache) -> Self {
        let translation = &config.translation;

        if !translation.enabled {
            info!("Translation disabled in configuration; documents use source text");
            return Self::disabled(config.source_language, cache);
        }

        let Some(api_key) = translation.resolve_api_key() else {
            warn!(
                "No API key found in ${} or the config file; translation disabled",
                translation.api_key_env
            );
            return Self::disabled(config.source_language, cache);
        };

        let provider = build_provider(translation, api_key);
        debug!(
            "Translator using {} model {}",
            translation.provider.display_name(),
            translation.get_model()
        );

        Self::new(provider, config.source_language, cache)
            .with_retry(RetryPolicy {
                retries: translation.retry_count,
                backoff: Duration::from_millis(translation.retry_backoff_ms),
            })
            .with_timeout(Duration::from_secs(translation.timeout_secs))
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub fn source_language(&self) -> Language {
        self.source_language
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Translate `text` into `target`
    pub async fn translate(&self, text: &str, target: Language) -> TranslationResult {
        if target == self.source_language || text.trim().is_empty() {
            return TranslationResult::translated(text);
        }

        let Some(provider) = self.provider.as_deref() else {
            return TranslationResult::passthrough(text);
        };

        let key = TranslationKey::new(text, target);
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        let flight = self.cache.flight_lock(&key);
        let _lock = flight.lock().await;
        let _flight = self.cache.flight_guard(&key);

        // another caller may have finished while we waited
        if let Some(cached) = self.cache.peek(&key) {
            return cached;
        }

        let result = match self.request(provider, text, target).await {
            Ok(translated) => TranslationResult::translated(translated),
            Err(e) => {
                warn!(
                    "Translation to {} failed, using original text: {}",
                    target.english_name(),
                    e
                );
                TranslationResult::passthrough(text)
            }
        };

        self.cache.store(key, result.clone());
        result
    }

    /// One logical remote request, including bounded retries
    async fn request(
        &self,
        provider: &dyn Provider,
        text: &str,
        target: Language,
    ) -> Result<String, ProviderError> {
        let prompt = translation_prompt(text, target);
        let mut attempt = 0;

        loop {
            let outcome = match tokio::time::timeout(self.timeout, provider.complete(&prompt)).await {
                Ok(Ok(raw)) => {
                    let normalized = strip_code_fences(&raw);
                    if normalized.is_empty() {
                        Err(ProviderError::EmptyResponse)
                    } else {
                        Ok(normalized)
                    }
                }
                Ok(Err(e)) => Err(e),
                Err(_) => Err(ProviderError::Timeout(self.timeout)),
            };

            match outcome {
                Err(e) if e.is_transient() && attempt < self.retry.retries => {
                    let delay = self.retry.delay_for(attempt);
                    debug!(
                        "{} attempt {} failed ({}), retrying in {:?}",
                        provider.name(),
                        attempt + 1,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}
