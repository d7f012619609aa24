//! Fireworks AI completion provider.
//!
//! Fireworks serves open models behind an OpenAI-compatible Chat
//! Completions API, authenticated with a bearer token.

use async_trait::async_trait;
use serde_json::Value;

use crate::llms::base_llm::{read_success_body, truncate_chars, BaseLLM, BaseLLMState, ChatMessage};
use crate::llms::error::LlmError;

/// Model used when none is configured.
pub const FIREWORKS_DEFAULT_MODEL: &str = "accounts/fireworks/models/llama-v3p1-8b-instruct";

/// Public Fireworks inference base.
pub const FIREWORKS_API_BASE: &str = "https://api.fireworks.ai/inference/v1";

const PROVIDER: &str = "fireworks";

/// Fireworks chat-completions client.
#[derive(Debug, Clone)]
pub struct FireworksCompletion {
    /// Shared base LLM state.
    pub state: BaseLLMState,
}

impl FireworksCompletion {
    pub fn new(model: impl Into<String>, api_key: Option<String>) -> Self {
        let mut state = BaseLLMState::new(model);
        state.api_key = api_key;
        Self::from_state(state)
    }

    pub fn from_state(state: BaseLLMState) -> Self {
        Self { state }
    }

    pub fn api_endpoint(&self) -> String {
        format!("{}/chat/completions", self.state.base_url_or(FIREWORKS_API_BASE))
    }

    /// Build the request body for the Chat Completions API.
    pub fn build_request_body(&self, messages: &[ChatMessage]) -> Value {
        serde_json::json!({
            "model": self.state.model,
            "messages": messages,
            "max_tokens": self.state.max_output_tokens,
            "temperature": self.state.temperature,
        })
    }

    /// Extract `choices[0].message.content`.
    pub fn parse_response(response: &Value) -> Result<String, LlmError> {
        let message = response
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .ok_or_else(|| invalid("no choices[0].message"))?;

        let content = message
            .get("content")
            .and_then(|c| c.as_str())
            .unwrap_or("");

        if let Some(usage) = response.get("usage") {
            log::debug!(
                "Fireworks token usage: prompt={}, completion={}, total={}",
                usage.get("prompt_tokens").and_then(|v| v.as_i64()).unwrap_or(0),
                usage.get("completion_tokens").and_then(|v| v.as_i64()).unwrap_or(0),
                usage.get("total_tokens").and_then(|v| v.as_i64()).unwrap_or(0),
            );
        }

        if content.trim().is_empty() {
            return Err(LlmError::EmptyReply { provider: PROVIDER });
        }
        Ok(content.to_string())
    }

    async fn attempt(&self, client: &reqwest::Client, api_key: &str, body: &Value) -> Result<String, LlmError> {
        let response = client
            .post(self.api_endpoint())
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", api_key))
            .json(body)
            .send()
            .await?;

        let text = read_success_body(PROVIDER, response).await?;
        let json: Value = serde_json::from_str(&text).map_err(|e| {
            invalid(format!("{} - Body: {}", e, truncate_chars(&text, 500)))
        })?;
        Self::parse_response(&json)
    }
}

fn invalid(reason: impl Into<String>) -> LlmError {
    LlmError::InvalidResponse {
        provider: PROVIDER,
        reason: reason.into(),
    }
}

#[async_trait]
impl BaseLLM for FireworksCompletion {
    fn model(&self) -> &str {
        &self.state.model
    }

    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn acall(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        log::debug!(
            "FireworksCompletion.acall: model={}, messages={}",
            self.state.model,
            messages.len(),
        );

        let api_key = self.state.require_api_key(PROVIDER)?;
        let body = self.build_request_body(messages);
        let client = self.state.http_client()?;

        self.state
            .with_retries(PROVIDER, || self.attempt(&client, api_key, &body))
            .await
    }
}
