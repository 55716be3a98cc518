/*!
 * Tests for language handling
 */

use cvforge::errors::ConfigError;
use cvforge::language_utils::{Language, language_codes_match, normalize_to_part1};

#[test]
fn test_fromStr_withEveryCodeForm_shouldResolveSameLanguage() {
    for input in ["de", "deu", "ger", "Deutsch", "german", "DE"] {
        assert_eq!(input.parse::<Language>().unwrap(), Language::German, "{}", input);
    }
}

#[test]
fn test_fromStr_withUnsupportedLanguage_shouldReturnInvalidLanguage() {
    let err = "it".parse::<Language>().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidLanguage(ref value) if value == "it"));
}

#[test]
fn test_language_shouldExposeNames() {
    assert_eq!(Language::French.code(), "fr");
    assert_eq!(Language::French.native_name(), "Français");
    assert_eq!(Language::French.english_name(), "French");
    assert_eq!(Language::Portuguese.to_string(), "pt");
}

#[test]
fn test_languageAll_shouldRoundTripThroughCodes() {
    for language in Language::ALL {
        assert_eq!(language.code().parse::<Language>().unwrap(), language);
        assert_eq!(language.native_name().parse::<Language>().unwrap(), language);
    }
}

#[test]
fn test_normalizeToPart1_shouldHandleCodeVariants() {
    assert_eq!(normalize_to_part1("fre").as_deref(), Some("fr"));
    assert_eq!(normalize_to_part1("spa").as_deref(), Some("es"));
    assert_eq!(normalize_to_part1("xx"), None);
}

#[test]
fn test_languageCodesMatch_shouldCompareAcrossStandards() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("ger", "de"));
    assert!(!language_codes_match("en", "fr"));
    assert!(!language_codes_match("zz", "zz"));
}
