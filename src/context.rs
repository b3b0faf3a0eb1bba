//! Turns search results into a bounded context block for the LLM prompt.

use crate::search::WebResult;
use std::fmt::Write;

/// Builds the numbered context block the prompt embeds, clamped to
/// `max_chars`. Empty input yields an empty block.
pub fn build_context(results: &[WebResult], max_chars: usize) -> String {
    let mut block = String::new();
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            block.push('\n');
        }
        let _ = writeln!(&mut block, "[{}] {}", i + 1, result.title);
        let _ = writeln!(&mut block, "Summary: {}", result.snippet);
        let _ = writeln!(&mut block, "URL: {}", result.url);
    }
    clamp(&block, max_chars)
}

/// Truncates to at most `max_chars` characters, appending an ellipsis when
/// anything was cut. Cuts on a `char` boundary, never mid-codepoint.
pub fn clamp(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let keep = max_chars - 3;
    let mut clamped: String = text.chars().take(keep).collect();
    clamped.push_str("...");
    clamped
}
