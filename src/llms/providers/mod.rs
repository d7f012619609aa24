//! Hosted model provider implementations.
//!
//! | Provider | Module | API |
//! |----------|--------|-----|
//! | Google Gemini | [`gemini`] | `generateContent`, `x-goog-api-key` header |
//! | Fireworks AI | [`fireworks`] | OpenAI-compatible chat completions, bearer token |

pub mod fireworks;
pub mod gemini;

#[cfg(test)]
pub(crate) mod mock_upstream;

pub use fireworks::FireworksCompletion;
pub use gemini::GeminiCompletion;
