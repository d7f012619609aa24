//! Answering strategy: live model first, fallback engine otherwise.
//!
//! A [`Dobby`] owns an optional live provider and the
//! [`FallbackResponder`]. For each question [`select_strategy`] decides,
//! from whether a provider is configured and how recent live calls went,
//! whether to try the model at all. Any live failure is absorbed: the
//! caller still gets a fallback answer.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::DobbyConfig;
use crate::fallback::FallbackResponder;
use crate::llms::BaseLLM;
use crate::prompts::build_messages;
use crate::types::ResponseType;

/// How to answer one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStrategy {
    /// Ask the hosted model, falling back on failure.
    Live,
    /// Answer from the fallback engine without a network call.
    Fallback,
}

/// When to stop calling a failing provider for a while.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthPolicy {
    /// Consecutive failures that trigger a cooldown. `0` disables cooldowns.
    pub failure_threshold: u32,
    pub cooldown: Duration,
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            cooldown: Duration::from_secs(30),
        }
    }
}

/// Outcome record of recent live calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveHealth {
    pub consecutive_failures: u32,
    pub last_failure: Option<Instant>,
}

impl LiveHealth {
    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
        self.last_failure = None;
    }

    pub fn record_failure(&mut self, at: Instant) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.last_failure = Some(at);
    }
}

/// Pick a strategy for the next question.
///
/// Fallback when there is no provider, or when the provider has failed
/// `failure_threshold` times in a row and the last failure is younger
/// than `cooldown`. Live otherwise.
pub fn select_strategy(
    has_provider: bool,
    health: &LiveHealth,
    policy: &HealthPolicy,
    now: Instant,
) -> ResponseStrategy {
    if !has_provider {
        return ResponseStrategy::Fallback;
    }
    let cooling_down = policy.failure_threshold > 0
        && health.consecutive_failures >= policy.failure_threshold
        && health
            .last_failure
            .is_some_and(|at| now.saturating_duration_since(at) < policy.cooldown);

    if cooling_down {
        ResponseStrategy::Fallback
    } else {
        ResponseStrategy::Live
    }
}

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Live { provider: &'static str },
    Fallback,
}

/// A reply ready to hand to the caller. `text` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

/// The answering service shared by all request handlers.
pub struct Dobby {
    provider: Option<Arc<dyn BaseLLM>>,
    fallback: FallbackResponder,
    policy: HealthPolicy,
    health: Mutex<LiveHealth>,
    /// Fixed-seed RNG for reproducible fallback selection; thread RNG when `None`.
    rng: Option<Mutex<StdRng>>,
}

impl std::fmt::Debug for Dobby {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dobby")
            .field("provider", &self.live_provider())
            .field("policy", &self.policy)
            .field("seeded", &self.rng.is_some())
            .finish()
    }
}

impl Dobby {
    pub fn new(provider: Option<Arc<dyn BaseLLM>>) -> Self {
        Self {
            provider,
            fallback: FallbackResponder::new(),
            policy: HealthPolicy::default(),
            health: Mutex::new(LiveHealth::default()),
            rng: None,
        }
    }

    /// A service that never calls a live model.
    pub fn fallback_only() -> Self {
        Self::new(None)
    }

    pub fn from_config(config: &DobbyConfig) -> Self {
        let mut dobby = Self::new(config.build_provider()).with_policy(config.health_policy());
        if let Some(seed) = config.fallback_seed {
            dobby = dobby.with_seed(seed);
        }
        dobby
    }

    pub fn with_policy(mut self, policy: HealthPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    /// Name of the configured live provider.
    pub fn live_provider(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|p| p.provider())
    }

    pub fn health(&self) -> LiveHealth {
        *self.health.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The strategy the next question would use.
    pub fn strategy(&self) -> ResponseStrategy {
        select_strategy(
            self.provider.is_some(),
            &self.health(),
            &self.policy,
            Instant::now(),
        )
    }

    /// Answer a question. Never fails.
    pub async fn ask(&self, kind: ResponseType, input: &str) -> Answer {
        if let (ResponseStrategy::Live, Some(provider)) = (self.strategy(), &self.provider) {
            match provider.acall(&build_messages(kind, input)).await {
                Ok(text) if !text.trim().is_empty() => {
                    self.update_health(|h| h.record_success());
                    tracing::info!(provider = provider.provider(), %kind, "Successfully generated response");
                    return Answer {
                        text,
                        source: AnswerSource::Live {
                            provider: provider.provider(),
                        },
                    };
                }
                Ok(_) => {
                    self.update_health(|h| h.record_failure(Instant::now()));
                    tracing::warn!(provider = provider.provider(), "Live model returned blank text, using fallback response");
                }
                Err(err) => {
                    self.update_health(|h| h.record_failure(Instant::now()));
                    tracing::warn!(provider = provider.provider(), error = %err, "Live model call failed, using fallback response");
                }
            }
        } else {
            tracing::debug!(%kind, "Answering from fallback engine");
        }

        Answer {
            text: self.fallback_text(kind, input),
            source: AnswerSource::Fallback,
        }
    }

    /// Fallback answer using the service's RNG.
    pub fn fallback_text(&self, kind: ResponseType, input: &str) -> String {
        match &self.rng {
            Some(rng) => {
                let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
                self.fallback.respond_with(kind, input, &mut *rng)
            }
            None => self.fallback.respond(kind, input),
        }
    }

    fn update_health(&self, f: impl FnOnce(&mut LiveHealth)) {
        let mut health = self.health.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut health);
    }
}
