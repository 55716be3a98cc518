/*!
 * Tests for provider request/response handling
 */

use cvforge::app_config::{TranslationConfig, TranslationProvider};
use cvforge::providers::Provider;
use cvforge::providers::anthropic::{Anthropic, AnthropicRequest, AnthropicResponse};
use cvforge::providers::build_provider;
use cvforge::providers::gemini::{Gemini, GeminiRequest, GeminiResponse};
use cvforge::providers::mock::MockProvider;
use cvforge::providers::openai::{OpenAI, OpenAIRequest, OpenAIResponse};
use cvforge::translation::prompts::{CONTENT_HEADER, extract_content, translation_prompt};
use cvforge::language_utils::Language;

#[test]
fn test_geminiRequest_shouldSerializeCamelCase() {
    let request = GeminiRequest::new("Hola").temperature(0.3);
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["contents"][0]["parts"][0]["text"], "Hola");
    assert!(json["generationConfig"]["temperature"].is_number());
}

#[test]
fn test_gemini_extractText_shouldJoinFirstCandidateParts() {
    let response: GeminiResponse = serde_json::from_str(
        r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"world"}]},"finishReason":"STOP"}]}"#,
    )
    .unwrap();

    assert_eq!(Gemini::extract_text(&response), "Hello world");
}

#[test]
fn test_gemini_extractText_withNoCandidates_shouldBeEmpty() {
    let response: GeminiResponse = serde_json::from_str(r#"{}"#).unwrap();
    assert_eq!(Gemini::extract_text(&response), "");
}

#[test]
fn test_openai_extractText_shouldUseFirstChoice() {
    let response: OpenAIResponse = serde_json::from_str(
        r#"{"choices":[{"message":{"role":"assistant","content":"Bonjour"}}]}"#,
    )
    .unwrap();

    assert_eq!(OpenAI::extract_text(&response), "Bonjour");
}

#[test]
fn test_openaiRequest_shouldCarryMessages() {
    let request = OpenAIRequest::new("gpt-4o-mini")
        .add_message("user", "Hola")
        .temperature(0.2);
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["model"], "gpt-4o-mini");
    assert_eq!(json["messages"][0]["role"], "user");
    assert_eq!(json["messages"][0]["content"], "Hola");
}

#[test]
fn test_anthropic_extractText_shouldKeepTextBlocksOnly() {
    let response: AnthropicResponse = serde_json::from_str(
        r#"{"content":[{"type":"text","text":"Guten "},{"type":"tool_use"},{"type":"text","text":"Tag"}]}"#,
    )
    .unwrap();

    assert_eq!(Anthropic::extract_text(&response), "Guten Tag");
}

#[test]
fn test_anthropicResponse_isTruncated_shouldReadStopReason() {
    let truncated: AnthropicResponse = serde_json::from_str(
        r#"{"content":[{"type":"text","text":"Berufserf"}],"stop_reason":"max_tokens"}"#,
    )
    .unwrap();
    let complete: AnthropicResponse =
        serde_json::from_str(r#"{"content":[],"stop_reason":"end_turn"}"#).unwrap();

    assert!(truncated.is_truncated());
    assert!(!complete.is_truncated());
}

#[test]
fn test_anthropicRequest_shouldSerializeSystemPrompt() {
    let request = AnthropicRequest::new("claude-3-haiku-20240307", 4096)
        .system("Translate")
        .add_message("user", "Hola");
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["system"], "Translate");
    assert_eq!(json["max_tokens"], 4096);
}

#[test]
fn test_buildProvider_shouldDispatchOnConfiguredProvider() {
    let mut config = TranslationConfig::default();

    for (provider, name) in [
        (TranslationProvider::Gemini, "gemini"),
        (TranslationProvider::OpenAI, "openai"),
        (TranslationProvider::Anthropic, "anthropic"),
    ] {
        config.provider = provider;
        assert_eq!(build_provider(&config, "key".to_string()).name(), name);
    }
}

#[test]
fn test_translationPrompt_shouldCarryPreservationRules() {
    let prompt = translation_prompt("- 📞 +34 600 000 000", Language::English);

    assert!(prompt.contains("English"));
    assert!(prompt.contains("emoji"));
    assert!(prompt.contains("URL"));
    assert!(prompt.contains("```"));
    assert!(prompt.contains(CONTENT_HEADER));
    assert_eq!(extract_content(&prompt), "- 📞 +34 600 000 000");
}

#[tokio::test]
async fn test_mockProvider_testConnection_shouldSucceedWhenWorking() {
    let provider = MockProvider::working();

    assert!(provider.test_connection().await.is_ok());
    assert_eq!(provider.call_count(), 1);
    assert!(MockProvider::failing().test_connection().await.is_err());
}

#[tokio::test]
async fn test_gemini_withUnreachableEndpoint_shouldNotExposeApiKey() {
    let gemini = Gemini::new(
        "SUPERSECRETKEY",
        "http://127.0.0.1:9",
        "gemini-2.0-flash",
        std::time::Duration::from_secs(2),
    );

    let err = gemini.complete("Hola").await.unwrap_err();

    assert!(!err.to_string().contains("SUPERSECRETKEY"), "{}", err);
    assert!(!format!("{:?}", err).contains("SUPERSECRETKEY"));
}
