//! # Dobby
//!
//! A kid-friendly question-answering service. Questions arrive as a topic
//! plus a response type (explain, joke, riddle, solve). A hosted language
//! model answers when one is configured and reachable; otherwise a
//! keyword-matched fallback engine produces a canned but on-topic reply.
//!
//! - [`fallback`] - Offline answer engine (topic catalog + generic templates)
//! - [`llms`] - Hosted model clients (Gemini, Fireworks)
//! - [`responder`] - Live/fallback strategy and the [`Dobby`] service
//! - [`server`] - Axum HTTP front end
//! - [`config`] - Environment configuration

pub mod config;
pub mod fallback;
pub mod llms;
pub mod prompts;
pub mod responder;
pub mod server;
pub mod types;

pub use config::DobbyConfig;
pub use fallback::FallbackResponder;
pub use responder::{Answer, AnswerSource, Dobby, ResponseStrategy};
pub use types::ResponseType;

/// Crate version reported by `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
