/*!
 * Post-processing of raw provider output.
 *
 * Language models like to wrap answers in markdown code fences even when told
 * not to. `strip_code_fences` removes a leading fence line (with its language
 * tag) and a trailing fence, then trims. It runs to a fixpoint, so applying it
 * to its own output is always a no-op. Text without fences passes through
 * with only surrounding whitespace removed.
 */

const FENCE: &str = "```";

/// Remove surrounding code fences and whitespace from a provider response
pub fn strip_code_fences(raw: &str) -> String {
    let mut current = raw.trim();

    loop {
        let next = strip_once(current);
        if next.len() == current.len() {
            return current.to_string();
        }
        current = next;
    }
}

fn strip_once(text: &str) -> &str {
    let mut text = text;

    if text.starts_with(FENCE) {
        // the opener line carries the language tag, e.g. "```markdown"
        text = match text.find('\n') {
            Some(newline) => &text[newline + 1..],
            None => "",
        };
    }

    if let Some(stripped) = text.strip_suffix(FENCE) {
        text = stripped;
    }

    text.trim()
}

/// Whether a response still carries fence markers at either end
pub fn has_code_fence(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.starts_with(FENCE) || trimmed.ends_with(FENCE)
}
