use autodeck::config::RetryPolicy;
use autodeck::error::DeckError;
use autodeck::llm::generate_outline;
use autodeck::prompt::SYSTEM_PROMPT;
use std::time::Duration;

#[path = "test_utils.rs"]
mod test_utils;
use test_utils::MockChat;

fn fast_policy(max_attempts: usize) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        base_delay: Duration::from_millis(2),
    }
}

#[tokio::test]
async fn test_transient_failure_is_retried_until_success() {
    let chat = MockChat::with_responses(vec![
        Err(DeckError::transient("rate limited")),
        Ok("{\"slides\": []}".to_string()),
    ]);

    let result = generate_outline(&chat, fast_policy(3), SYSTEM_PROMPT, "prompt").await;

    assert_eq!(result.expect("second attempt should succeed"), "{\"slides\": []}");
    assert_eq!(chat.calls(), 2);
}

#[tokio::test]
async fn test_transient_failures_exhaust_attempt_budget() {
    let chat = MockChat::with_responses(vec![
        Err(DeckError::transient("timeout")),
        Err(DeckError::transient("timeout")),
        Err(DeckError::transient("timeout")),
    ]);

    let result = generate_outline(&chat, fast_policy(3), SYSTEM_PROMPT, "prompt").await;

    let err = result.expect_err("budget exhaustion must surface the error");
    assert!(err.is_transient());
    assert_eq!(chat.calls(), 3, "exactly max_attempts calls, no more");
}

#[tokio::test]
async fn test_permanent_failure_is_not_retried() {
    let chat = MockChat::with_responses(vec![
        Err(DeckError::permanent("invalid API key")),
        Ok("should never be reached".to_string()),
    ]);

    let result = generate_outline(&chat, fast_policy(5), SYSTEM_PROMPT, "prompt").await;

    let err = result.expect_err("permanent error must surface immediately");
    assert!(!err.is_transient());
    assert_eq!(chat.calls(), 1, "a permanent error must not burn the budget");
}

#[tokio::test]
async fn test_single_attempt_policy_never_retries() {
    let chat = MockChat::with_responses(vec![Err(DeckError::transient("rate limited"))]);

    let result = generate_outline(&chat, fast_policy(1), SYSTEM_PROMPT, "prompt").await;

    assert!(result.is_err());
    assert_eq!(chat.calls(), 1);
}

#[test]
fn test_error_classification_helpers() {
    assert!(DeckError::transient("x").is_transient());
    assert!(!DeckError::permanent("x").is_transient());
    assert!(!DeckError::MissingCredential.is_transient());
}

#[test]
fn test_error_kinds_have_distinct_exit_codes() {
    let errors = [
        DeckError::MissingCredential,
        DeckError::EmptyTopic,
        DeckError::permanent("x"),
        DeckError::Schema(autodeck::error::SchemaError::MissingSlidesField),
        DeckError::FileWrite {
            path: "out.pptx".into(),
            source: std::io::Error::other("disk full"),
        },
    ];

    let mut codes: Vec<i32> = errors.iter().map(DeckError::exit_code).collect();
    assert!(codes.iter().all(|&c| c != 0));
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len(), "exit codes must be distinct");
}

#[test]
fn test_errors_name_their_stage() {
    assert_eq!(DeckError::MissingCredential.stage(), "configuration");
    assert_eq!(DeckError::transient("x").stage(), "llm");
    assert_eq!(
        DeckError::Schema(autodeck::error::SchemaError::MissingSlidesField).stage(),
        "validation"
    );
}
