//! Base trait and shared state for hosted model clients.
//!
//! Each provider embeds a [`BaseLLMState`] and implements [`BaseLLM`].
//! Transport concerns common to every provider (client construction,
//! status classification, retry with exponential backoff) live here so
//! providers only describe their request and response shapes.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::LlmError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Default cap on generated tokens.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 500;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Delay before the first retry; doubled for each further retry.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Speaker of a [`ChatMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message in a model conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// BaseLLM trait
// ---------------------------------------------------------------------------

/// A hosted text-generation model.
///
/// Implementations must be cheap to share (`Arc<dyn BaseLLM>`) and must
/// report every failure through [`LlmError`]; callers decide what to do
/// about it.
#[async_trait]
pub trait BaseLLM: Send + Sync + fmt::Debug {
    /// The model identifier sent to the provider.
    fn model(&self) -> &str;

    /// Short provider name used in logs and `/health`.
    fn provider(&self) -> &'static str;

    /// Send `messages` and return the generated text.
    async fn acall(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

// ---------------------------------------------------------------------------
// BaseLLMState - shared state for LLM implementations
// ---------------------------------------------------------------------------

/// Settings every provider needs.
#[derive(Clone)]
pub struct BaseLLMState {
    /// The model identifier/name.
    pub model: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    /// Server-side credential. Never logged.
    pub api_key: Option<String>,
    /// Overrides the provider's default endpoint base.
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_backoff: Duration,
}

impl fmt::Debug for BaseLLMState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseLLMState")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl BaseLLMState {
    /// Create a new `BaseLLMState` with the given model name.
    ///
    /// # Panics
    ///
    /// Panics if `model` is empty.
    pub fn new(model: impl Into<String>) -> Self {
        let model = model.into();
        assert!(!model.is_empty(), "Model name is required and cannot be empty");

        Self {
            model,
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            api_key: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }

    /// The configured key, or [`LlmError::MissingApiKey`].
    pub fn require_api_key(&self, provider: &'static str) -> Result<&str, LlmError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(LlmError::MissingApiKey { provider })
    }

    /// `base_url` without a trailing slash, or `default`.
    pub fn base_url_or(&self, default: &str) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn http_client(&self) -> Result<reqwest::Client, LlmError> {
        Ok(reqwest::Client::builder().timeout(self.timeout).build()?)
    }

    /// Run `attempt` until it succeeds, fails with a non-retryable error, or
    /// the retry budget is spent. Backoff doubles after every retry.
    pub async fn with_retries<F, Fut>(&self, provider: &'static str, mut attempt: F) -> Result<String, LlmError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<String, LlmError>>,
    {
        let mut retries = 0;
        let mut delay = self.retry_backoff;

        loop {
            match attempt().await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() && retries < self.max_retries => {
                    retries += 1;
                    log::warn!(
                        "{} API retry attempt {} after {:?}: {}",
                        provider,
                        retries,
                        delay,
                        err
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Read a response body and map non-success statuses to [`LlmError`].
pub async fn read_success_body(provider: &'static str, response: reqwest::Response) -> Result<String, LlmError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(LlmError::RateLimited { provider });
    }
    if status.is_server_error() {
        return Err(LlmError::Server {
            provider,
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;

    if status.is_client_error() {
        return Err(LlmError::Client {
            provider,
            status: status.as_u16(),
            body: truncate_chars(&body, 500),
        });
    }

    Ok(body)
}

/// At most `max` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
