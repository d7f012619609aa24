//! Google Gemini completion provider.
//!
//! Talks to the `generateContent` endpoint of the Gemini API. The API key
//! travels in the `x-goog-api-key` header so it never appears in a URL;
//! the persona goes into `systemInstruction` and the user turn into
//! `contents`.

use async_trait::async_trait;
use serde_json::Value;

use crate::llms::base_llm::{read_success_body, truncate_chars, BaseLLM, BaseLLMState, ChatMessage, Role};
use crate::llms::error::LlmError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Model used when none is configured.
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Public Gemini API base.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const PROVIDER: &str = "gemini";

// ---------------------------------------------------------------------------
// GeminiCompletion provider
// ---------------------------------------------------------------------------

/// Google Gemini completion client.
///
/// # Example
///
/// ```ignore
/// let provider = GeminiCompletion::new("gemini-1.5-flash", Some(api_key));
/// let text = provider.acall(&prompts::build_messages(kind, input)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct GeminiCompletion {
    /// Shared base LLM state.
    pub state: BaseLLMState,
}

impl GeminiCompletion {
    pub fn new(model: impl Into<String>, api_key: Option<String>) -> Self {
        let mut state = BaseLLMState::new(model);
        state.api_key = api_key;
        Self::from_state(state)
    }

    pub fn from_state(state: BaseLLMState) -> Self {
        Self { state }
    }

    /// Get the API endpoint URL.
    pub fn api_endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.state.base_url_or(GEMINI_API_BASE),
            self.state.model
        )
    }

    /// Build generation config for the Gemini API.
    pub fn generation_config(&self) -> Value {
        let mut config = serde_json::Map::new();
        config.insert("temperature".to_string(), serde_json::json!(self.state.temperature));
        config.insert(
            "maxOutputTokens".to_string(),
            serde_json::json!(self.state.max_output_tokens),
        );
        Value::Object(config)
    }

    /// Split messages into the system instruction and Gemini `contents`.
    ///
    /// System messages are joined into one instruction; assistant turns map
    /// to the `model` role.
    fn format_messages(&self, messages: &[ChatMessage]) -> (Option<String>, Vec<Value>) {
        let mut system_parts: Vec<&str> = Vec::new();
        let mut contents: Vec<Value> = Vec::new();

        for msg in messages {
            let role = match msg.role {
                Role::System => {
                    system_parts.push(&msg.content);
                    continue;
                }
                Role::User => "user",
                Role::Assistant => "model",
            };
            contents.push(serde_json::json!({
                "role": role,
                "parts": [{ "text": msg.content }],
            }));
        }

        let system = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };

        (system, contents)
    }

    /// Build the complete request body.
    pub fn build_request_body(&self, messages: &[ChatMessage]) -> Value {
        let (system, contents) = self.format_messages(messages);

        let mut body = serde_json::json!({
            "contents": contents,
            "generationConfig": self.generation_config(),
        });

        if let Some(system_text) = system {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": system_text }]
            });
        }

        body
    }

    /// Extract the reply text from a `generateContent` response.
    pub fn parse_response(response: &Value) -> Result<String, LlmError> {
        if let Some(error) = response.get("error") {
            let msg = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown Gemini API error");
            return Err(invalid(format!("API error: {}", msg)));
        }

        let parts = response
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
            .ok_or_else(|| invalid("no candidates[0].content.parts"))?;

        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect();

        if text.trim().is_empty() {
            return Err(LlmError::EmptyReply { provider: PROVIDER });
        }
        Ok(text)
    }

    fn log_token_usage(response: &Value) {
        if let Some(usage) = response.get("usageMetadata") {
            log::debug!(
                "Gemini token usage: prompt={}, completion={}",
                usage.get("promptTokenCount").and_then(|v| v.as_i64()).unwrap_or(0),
                usage.get("candidatesTokenCount").and_then(|v| v.as_i64()).unwrap_or(0),
            );
        }
    }

    async fn attempt(&self, client: &reqwest::Client, api_key: &str, body: &Value) -> Result<String, LlmError> {
        let response = client
            .post(self.api_endpoint())
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;

        let text = read_success_body(PROVIDER, response).await?;
        let json: Value = serde_json::from_str(&text).map_err(|e| {
            invalid(format!("{} - Body: {}", e, truncate_chars(&text, 500)))
        })?;

        Self::log_token_usage(&json);
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
impl BaseLLM for GeminiCompletion {
    fn model(&self) -> &str {
        &self.state.model
    }

    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn acall(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        log::debug!(
            "GeminiCompletion.acall: model={}, messages={}",
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
