//! LLM client wrapper: one chat call, retried under backoff.
//!
//! The [`ChatModel`] trait is the mockable seam between the pipeline and the
//! provider. Failures are classified transient or permanent up front so the
//! retry loop never burns attempts on an error that cannot succeed.

use crate::config::{Config, RetryPolicy};
use crate::error::DeckError;
use crate::log_debug;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::ExponentialBackoff;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Chat collaborator interface: prompts in, raw completion text out.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
    -> Result<String, DeckError>;
}

/// OpenAI chat completions client. Requests JSON-object output at low
/// temperature; the schema validator still treats the response as untrusted.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self, DeckError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DeckError::permanent(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, DeckError> {
        log_debug!("Requesting completion from model {}", self.model);

        let body = json!({
            "model": self.model,
            "temperature": self.temperature,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt },
            ],
        });

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &detail));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| DeckError::permanent(format!("malformed provider response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| DeckError::permanent("empty response from LLM"))
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Transport-level failures (timeout, refused connection) are transient.
fn classify_request_error(error: reqwest::Error) -> DeckError {
    if error.is_timeout() || error.is_connect() || error.is_request() {
        DeckError::transient(format!("request failed: {error}"))
    } else {
        DeckError::permanent(format!("request failed: {error}"))
    }
}

/// Rate limits and server-side errors are transient; auth and request-shape
/// errors are permanent.
fn classify_status(status: StatusCode, detail: &str) -> DeckError {
    let summary = crate::context::clamp(detail.trim(), 200);
    let message = format!("provider returned {status}: {summary}");
    if status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
    {
        DeckError::transient(message)
    } else {
        DeckError::permanent(message)
    }
}

/// Runs the chat call under the retry policy: exponential backoff, fixed
/// attempt ceiling, sequential attempts, transient errors only. The last
/// error is surfaced when the budget is exhausted.
pub async fn generate_outline(
    model: &dyn ChatModel,
    policy: RetryPolicy,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<String, DeckError> {
    // Delays double per attempt starting from base_delay.
    let factor = (u64::try_from(policy.base_delay.as_millis()).unwrap_or(500) / 2).max(1);
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(factor)
        .take(policy.max_attempts.saturating_sub(1));

    RetryIf::spawn(
        strategy,
        || async move {
            log_debug!("Attempting outline generation");
            model.complete(system_prompt, user_prompt).await
        },
        |error: &DeckError| {
            let retry = error.is_transient();
            if retry {
                log_debug!("Transient LLM failure, will retry: {error}");
            }
            retry
        },
    )
    .await
}
