/*!
 * Translation caching functionality.
 *
 * The cache is an explicit object handed to the translator; clones share the
 * same storage. Entries are keyed by a SHA-256 digest of the source text and
 * the target language, so only a change to the text itself can miss an
 * earlier result. A per-key async lock lets the translator keep at most one
 * remote call in flight for each distinct key.
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;
use parking_lot::{Mutex, RwLock};
use sha2::{Digest, Sha256};

use crate::language_utils::Language;

use super::core::TranslationResult;

/// Cache index: digest of the source text plus target language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationKey {
    content_hash: String,
    target: Language,
}

impl TranslationKey {
    pub fn new(text: &str, target: Language) -> Self {
        Self {
            content_hash: format!("{:x}", Sha256::digest(text.as_bytes())),
            target,
        }
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn target(&self) -> Language {
        self.target
    }
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Translation cache for storing and retrieving translations
#[derive(Debug, Clone, Default)]
pub struct TranslationCache {
    entries: Arc<RwLock<HashMap<TranslationKey, TranslationResult>>>,
    in_flight: Arc<Mutex<HashMap<TranslationKey, Arc<tokio::sync::Mutex<()>>>>>,
    hits: Arc<AtomicUsize>,
    misses: Arc<AtomicUsize>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a result, counting the hit or miss
    pub fn get(&self, key: &TranslationKey) -> Option<TranslationResult> {
        match self.peek(key) {
            Some(result) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for {}… -> {}", &key.content_hash[..12], key.target);
                Some(result)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!("Cache miss for {}… -> {}", &key.content_hash[..12], key.target);
                None
            }
        }
    }

    /// Look up a result without touching the counters
    pub fn peek(&self, key: &TranslationKey) -> Option<TranslationResult> {
        self.entries.read().get(key).cloned()
    }

    /// Store a result
    pub fn store(&self, key: TranslationKey, result: TranslationResult) {
        self.entries.write().insert(key, result);
    }

    /// Lock guarding the remote call for `key`; shared by concurrent callers
    pub fn flight_lock(&self, key: &TranslationKey) -> Arc<tokio::sync::Mutex<()>> {
        self.in_flight
            .lock()
            .entry(key.clone())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Drop the flight lock once the result has been stored
    pub fn finish_flight(&self, key: &TranslationKey) {
        self.in_flight.lock().remove(key);
    }

    /// Guard releasing the flight entry for `key` when dropped, even on cancellation
    pub fn flight_guard(&self, key: &TranslationKey) -> FlightGuard<'_> {
        FlightGuard {
            cache: self,
            key: key.clone(),
        }
    }

    /// Number of keys with a remote call in progress
    pub fn in_flight(&self) -> usize {
        self.in_flight.lock().len()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    /// Clear entries and counters
    pub fn clear(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        debug!("Translation cache cleared");
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Releases a key's flight entry on drop
#[derive(Debug)]
pub struct FlightGuard<'a> {
    cache: &'a TranslationCache,
    key: TranslationKey,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.cache.finish_flight(&self.key);
    }
}
