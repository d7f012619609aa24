//! Live model call errors.

use thiserror::Error;

/// Why a live model call produced no usable text.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key configured for the provider.
    #[error("{provider} API key not set")]
    MissingApiKey { provider: &'static str },

    /// Connection, timeout or body read failure. The request URL is
    /// stripped before wrapping.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    /// HTTP 429 from the provider.
    #[error("rate limited by {provider} API (429)")]
    RateLimited { provider: &'static str },

    /// HTTP 5xx from the provider.
    #[error("{provider} API server error: {status}")]
    Server { provider: &'static str, status: u16 },

    /// HTTP 4xx (other than 429) from the provider.
    #[error("{provider} API error ({status}): {body}")]
    Client {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The body was not JSON or lacked the expected fields.
    #[error("invalid {provider} response: {reason}")]
    InvalidResponse {
        provider: &'static str,
        reason: String,
    },

    /// The provider answered with no text.
    #[error("{provider} returned an empty reply")]
    EmptyReply { provider: &'static str },
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Transport(err.without_url())
    }
}

impl LlmError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LlmError::Transport(_) | LlmError::RateLimited { .. } | LlmError::Server { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_classification() {
        assert!(LlmError::RateLimited { provider: "gemini" }.is_retryable());
        assert!(LlmError::Server {
            provider: "gemini",
            status: 503
        }
        .is_retryable());
        assert!(!LlmError::Client {
            provider: "fireworks",
            status: 401,
            body: "bad key".into()
        }
        .is_retryable());
        assert!(!LlmError::MissingApiKey { provider: "gemini" }.is_retryable());
        assert!(!LlmError::EmptyReply { provider: "gemini" }.is_retryable());
    }

    #[test]
    fn test_display_includes_provider() {
        let err = LlmError::Client {
            provider: "fireworks",
            status: 400,
            body: "nope".into(),
        };
        assert_eq!(err.to_string(), "fireworks API error (400): nope");
    }
}
