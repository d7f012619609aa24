//! Offline answer engine.
//!
//! When no live model call is possible, Dobby still answers: the input is
//! matched against a small keyword catalog, and a canned answer for the
//! requested [`ResponseType`] is returned. Inputs that match no topic get
//! one of a few generic templates, picked at random, with the caller's
//! text interpolated verbatim.
//!
//! # Example
//!
//! ```
//! use dobby::fallback::FallbackResponder;
//! use dobby::types::ResponseType;
//!
//! let responder = FallbackResponder::new();
//! let answer = responder.respond(ResponseType::Riddle, "  The color PURPLE ");
//! assert!(answer.contains("*Answer: Colors!*"));
//! ```
//!
//! Matched answers are fully canned and never include the input. Generic
//! answers embed it unescaped; callers rendering into markup must escape.

pub mod catalog;
pub mod templates;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::ResponseType;

pub use catalog::{find_topic, TopicContent, TopicEntry, TOPIC_CATALOG};
pub use templates::{render, GenericTemplatePool, GENERIC_TEMPLATES, INPUT_PLACEHOLDER};

/// Lead-in placed before a topic's explanation for `solve` requests.
pub const SOLVE_PREFIX: &str = "🔧 Let me help! ";
/// Closing sentence placed after a topic's explanation for `solve` requests.
pub const SOLVE_SUFFIX: &str = " Now let's break this down step by step!";

/// Picks a canned answer for a `(type, input)` pair.
///
/// Holds only references to static tables, so it is `Copy` and can be
/// shared across tasks freely.
#[derive(Debug, Clone, Copy)]
pub struct FallbackResponder {
    catalog: &'static [TopicEntry],
    pool: &'static GenericTemplatePool,
}

impl Default for FallbackResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackResponder {
    /// Responder backed by the built-in catalog and templates.
    pub fn new() -> Self {
        Self::with_tables(&TOPIC_CATALOG, &GENERIC_TEMPLATES)
    }

    pub fn with_tables(catalog: &'static [TopicEntry], pool: &'static GenericTemplatePool) -> Self {
        Self { catalog, pool }
    }

    /// Answer using the thread-local RNG for generic template selection.
    ///
    /// Callers holding a raw type name should map it with
    /// [`ResponseType::from_request`], which defaults unknown names to explain.
    pub fn respond(&self, kind: ResponseType, input: &str) -> String {
        self.respond_with(kind, input, &mut rand::thread_rng())
    }

    /// Answer drawing from `rng` when a generic template has to be chosen.
    ///
    /// Topic-matched answers never touch `rng`.
    pub fn respond_with<R: Rng + ?Sized>(&self, kind: ResponseType, input: &str, rng: &mut R) -> String {
        if let Some(answer) = self.topic_answer(kind, input) {
            return answer;
        }

        let templates = self.pool.templates_for(kind);
        match templates.choose(rng) {
            Some(template) => render(template, input),
            // Only reachable with a custom pool whose explain sequence is empty.
            None => render(GENERIC_TEMPLATES.templates_for(ResponseType::Explain)[0], input),
        }
    }

    /// The deterministic part of [`respond_with`](Self::respond_with):
    /// `Some` when a topic matches and has content for `kind`.
    pub fn topic_answer(&self, kind: ResponseType, input: &str) -> Option<String> {
        let normalized = input.trim().to_lowercase();
        let entry = find_topic(self.catalog, &normalized)?;
        log::debug!("fallback matched topic '{}' for {}", entry.name, kind);

        match kind {
            ResponseType::Solve => entry
                .content
                .explain
                .map(|explain| format!("{SOLVE_PREFIX}{explain}{SOLVE_SUFFIX}")),
            other => entry.content.get(other).map(str::to_string),
        }
    }
}
