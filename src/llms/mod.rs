//! Live model clients.
//!
//! - [`base_llm`] - The trait every hosted model client implements, plus shared state
//! - [`error`] - Failure classification for live calls
//! - [`providers`] - Google Gemini and Fireworks implementations

pub mod base_llm;
pub mod error;
pub mod providers;

// Re-exports for convenience
pub use base_llm::{BaseLLM, BaseLLMState, ChatMessage, Role};
pub use error::LlmError;
pub use providers::{FireworksCompletion, GeminiCompletion};
