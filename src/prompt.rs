//! Prompt composition for the outline request.
//!
//! Pure string assembly: topic, context block, and the slide schema are
//! merged deterministically, each inside its own delimiter so the model
//! cannot confuse instruction text with content text.

use crate::schema::{DECK_LEN, Deck};

/// System prompt fixing the model's role and the strict-JSON contract.
pub const SYSTEM_PROMPT: &str = "You are a precise technical writer who produces clean, \
presentation-ready content. Return STRICT JSON with keys: slides -> list of {title, bullets, notes}. \
Do not include any commentary outside the JSON. Keep bullets concise (17 words or fewer each). \
Cite facts conservatively and avoid unverifiable claims.";

/// Example of the exact shape the model must return, embedded verbatim in
/// the user prompt.
const SCHEMA_EXAMPLE: &str = r#"{"slides": [{"title": "<Slide Title>", "bullets": ["bullet 1", "bullet 2"], "notes": "Presenter notes or empty string"}]}"#;

/// Composes the user prompt for a topic and (possibly empty) context block.
pub fn build_user_prompt(topic: &str, web_context: &str) -> String {
    let context_section = if web_context.is_empty() {
        "(no web snippets available; rely on prior knowledge)".to_string()
    } else {
        web_context.to_string()
    };

    let deck_schema = serde_json::to_string(&schemars::schema_for!(Deck))
        .expect("deck schema should serialize");

    format!(
        "Create a concise slide deck on the topic: \"{topic}\" using BOTH prior knowledge \
and the provided web snippets.\n\
\n\
Required slides ({DECK_LEN} total):\n\
1. Title (only the topic as title, no bullets)\n\
2. Overview (5-7 bullets)\n\
3-6. Key Points / Trends / Arguments (each 5-7 bullets)\n\
   - Thematic sections with clear, specific titles (NOT \"Key Point 1\" etc.)\n\
   - Titles should summarize the content (e.g., \"Trends\", \"Arguments\")\n\
7. Conclusion / Takeaways (5-7 bullets)\n\
\n\
Guidelines:\n\
- Use plain language; avoid marketing fluff.\n\
- Bullets should be short, scannable, and factual.\n\
- Prefer recent insights inferred from snippets when relevant.\n\
- If the web data seems conflicting, summarize the consensus.\n\
\n\
Here are the web snippets (search results):\n\
---\n\
{context_section}\n\
---\n\
\n\
Return JSON ONLY in the form:\n\
{SCHEMA_EXAMPLE}\n\
\n\
The output must conform to this JSON Schema:\n\
{deck_schema}"
    )
}
