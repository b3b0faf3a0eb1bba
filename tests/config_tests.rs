use autodeck::config::{
    API_KEY_ENV, Config, DEFAULT_MODEL, MAX_CONTEXT_CHARS, MODEL_ENV, RetryPolicy,
};
use autodeck::error::DeckError;
use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn lookup(map: &HashMap<String, String>) -> impl Fn(&str) -> Option<String> + '_ {
    |name| map.get(name).cloned()
}

#[test]
fn test_missing_api_key_is_a_preflight_failure() {
    let vars = env(&[]);
    let err = Config::from_lookup(lookup(&vars), None).expect_err("missing key must fail");
    assert!(matches!(err, DeckError::MissingCredential));
}

#[test]
fn test_blank_api_key_is_rejected() {
    let vars = env(&[(API_KEY_ENV, "   ")]);
    let err = Config::from_lookup(lookup(&vars), None).expect_err("blank key must fail");
    assert!(matches!(err, DeckError::MissingCredential));
}

#[test]
fn test_default_model_used_without_overrides() {
    let vars = env(&[(API_KEY_ENV, "sk-test")]);
    let config = Config::from_lookup(lookup(&vars), None).expect("config should build");
    assert_eq!(config.model, DEFAULT_MODEL);
    assert_eq!(config.api_key, "sk-test");
}

#[test]
fn test_env_model_override() {
    let vars = env(&[(API_KEY_ENV, "sk-test"), (MODEL_ENV, "gpt-4o")]);
    let config = Config::from_lookup(lookup(&vars), None).expect("config should build");
    assert_eq!(config.model, "gpt-4o");
}

#[test]
fn test_flag_takes_precedence_over_env_model() {
    let vars = env(&[(API_KEY_ENV, "sk-test"), (MODEL_ENV, "gpt-4o")]);
    let config =
        Config::from_lookup(lookup(&vars), Some("gpt-4.1-mini")).expect("config should build");
    assert_eq!(config.model, "gpt-4.1-mini");
}

#[test]
fn test_fixed_knob_defaults() {
    let config = Config::with_api_key("sk-test");
    assert!((config.temperature - 0.3).abs() < f32::EPSILON);
    assert_eq!(config.max_context_chars, MAX_CONTEXT_CHARS);
    assert_eq!(config.retry.max_attempts, 3);
}

#[test]
fn test_retry_policy_default() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 3);
    assert!(policy.base_delay.as_millis() > 0);
}
