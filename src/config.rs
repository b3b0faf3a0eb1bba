//! Run configuration, built once at startup and passed explicitly.
//!
//! Nothing below the CLI layer reads environment variables: the credential
//! and model override are resolved here, before any network call is made.

use crate::error::DeckError;
use crate::log_debug;
use std::time::Duration;

/// Environment variable holding the LLM provider credential. Required.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the default model identifier. Optional.
pub const MODEL_ENV: &str = "AUTODECK_MODEL";

/// Default chat model when neither the flag nor the env override is set.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Character budget for the concatenated web context block.
pub const MAX_CONTEXT_CHARS: usize = 6000;

/// Low temperature to favor deterministic, schema-shaped output.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Configuration for one deck generation run.
#[derive(Debug, Clone)]
pub struct Config {
    /// LLM provider API key, sourced from [`API_KEY_ENV`].
    pub api_key: String,
    /// Chat model identifier.
    pub model: String,
    /// Sampling temperature for the chat call.
    pub temperature: f32,
    /// Character budget applied to the web context block.
    pub max_context_chars: usize,
    /// Request timeout for outbound HTTP calls.
    pub request_timeout: Duration,
    /// Retry policy for the LLM call.
    pub retry: RetryPolicy,
}

/// Backoff policy for the LLM call: exponential delay, fixed attempt
/// ceiling, transient failures only.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: usize,
    /// Delay before the first retry; doubles each attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl Config {
    /// Builds the configuration from the environment. Fails pre-flight with
    /// [`DeckError::MissingCredential`] when the API key is absent, before
    /// any collaborator is contacted.
    pub fn from_env(model_flag: Option<&str>) -> Result<Self, DeckError> {
        Self::from_lookup(|name| std::env::var(name).ok(), model_flag)
    }

    /// Same as [`Config::from_env`] but with an injectable variable lookup,
    /// so the pre-flight credential check is testable without touching the
    /// process environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        model_flag: Option<&str>,
    ) -> Result<Self, DeckError> {
        let api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.trim().is_empty())
            .ok_or(DeckError::MissingCredential)?;

        let model = model_flag
            .map(str::to_string)
            .or_else(|| lookup(MODEL_ENV).filter(|m| !m.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        log_debug!("Configuration loaded: model={model}");

        Ok(Self {
            api_key,
            model,
            ..Self::defaults()
        })
    }

    /// A config with the given key and defaults for everything else.
    /// Intended for tests and embedding.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::defaults()
        }
    }

    fn defaults() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_context_chars: MAX_CONTEXT_CHARS,
            request_timeout: Duration::from_secs(60),
            retry: RetryPolicy::default(),
        }
    }
}
