use autodeck::prompt::{SYSTEM_PROMPT, build_user_prompt};

#[test]
fn test_system_prompt_demands_strict_json() {
    assert!(SYSTEM_PROMPT.contains("STRICT JSON"));
    assert!(SYSTEM_PROMPT.contains("slides"));
}

#[test]
fn test_user_prompt_embeds_topic_and_slide_count() {
    let prompt = build_user_prompt("Climate Change", "");

    assert!(prompt.contains("\"Climate Change\""));
    assert!(prompt.contains("7 total"));
    assert!(prompt.contains("1. Title"));
    assert!(prompt.contains("7. Conclusion"));
}

#[test]
fn test_user_prompt_delimits_context_block() {
    let prompt = build_user_prompt("Rust", "[1] Rust in 2026\nSummary: fast\nURL: x");

    let fence_count = prompt.matches("---").count();
    assert!(fence_count >= 2, "context must be fenced on both sides");
    assert!(prompt.contains("[1] Rust in 2026"));
}

#[test]
fn test_user_prompt_notes_missing_context() {
    let prompt = build_user_prompt("Rust", "");
    assert!(prompt.contains("no web snippets available"));
}

#[test]
fn test_user_prompt_includes_schema_example() {
    let prompt = build_user_prompt("Rust", "");

    assert!(prompt.contains("Return JSON ONLY"));
    assert!(prompt.contains("\"title\""));
    assert!(prompt.contains("\"bullets\""));
    assert!(prompt.contains("\"notes\""));
}

#[test]
fn test_user_prompt_is_deterministic() {
    let a = build_user_prompt("Solar Power", "some context");
    let b = build_user_prompt("Solar Power", "some context");
    assert_eq!(a, b);
}
