/*!
 * Translation prompt construction.
 *
 * The whole section body is embedded in one instruction prompt together with
 * the target language and the rules that keep its structure intact.
 */

use crate::language_utils::Language;

/// Line introducing the content block; everything after it is the section text
pub const CONTENT_HEADER: &str = "Content to translate:\n";

/// Structure-preservation rules sent with every request
pub const PRESERVATION_RULES: [&str; 8] = [
    "Do NOT wrap the output in code markers such as ``` or markdown blocks",
    "Keep emojis (📞, 🎯, 💫, etc.) exactly as they are",
    "Preserve links and URLs verbatim",
    "Keep list formatting with - or *",
    "Keep headings marked with # and ##",
    "Do not change dates or numbers",
    "Keep proper names unchanged",
    "Reply with the translated content only, without explanations",
];

/// Build the instruction prompt for translating `text` into `target`
pub fn translation_prompt(text: &str, target: Language) -> String {
    let mut prompt = format!(
        "Translate the following content into {} ({}).\nImportant:\n",
        target.english_name(),
        target.native_name()
    );

    for rule in PRESERVATION_RULES {
        prompt.push_str("- ");
        prompt.push_str(rule);
        prompt.push('\n');
    }

    prompt.push('\n');
    prompt.push_str(CONTENT_HEADER);
    prompt.push_str(text);
    prompt
}

/// Recover the embedded content from a prompt built by `translation_prompt`
///
/// Returns the whole input when the header is absent.
pub fn extract_content(prompt: &str) -> &str {
    match prompt.rfind(CONTENT_HEADER) {
        Some(index) => &prompt[index + CONTENT_HEADER.len()..],
        None => prompt,
    }
}
