/*!
 * Translation of section text through a remote text-generation service.
 *
 * - `core`: the `Translator` service and its result type
 * - `cache`: memoization keyed by content hash and target language
 * - `formatting`: normalization of raw provider output
 * - `prompts`: instruction prompt construction
 */

pub use self::cache::{CacheStats, FlightGuard, TranslationCache, TranslationKey};
pub use self::core::{RetryPolicy, TranslationResult, Translator};

pub mod cache;
pub mod core;
pub mod formatting;
pub mod prompts;
