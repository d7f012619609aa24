//! Environment-driven configuration.
//!
//! Every setting has a default, so an empty environment yields a server
//! that answers from the fallback engine only. Credentials are read here
//! and nowhere else; they stay on the server.
//!
//! # Environment Variables
//!
//! - `HOST` / `PORT` — bind address (default `0.0.0.0:8080`)
//! - `DOBBY_PROVIDER` — `gemini` (default), `fireworks` or `none`
//! - `GOOGLE_AI_API_KEY` (alias `GEMINI_API_KEY`) — Gemini credential
//! - `FIREWORKS_API_KEY` — Fireworks credential
//! - `DOBBY_MODEL`, `DOBBY_BASE_URL` — provider overrides
//! - `DOBBY_TEMPERATURE`, `DOBBY_MAX_TOKENS` — generation settings
//! - `DOBBY_TIMEOUT_SECS`, `DOBBY_MAX_RETRIES` — live call budget
//! - `DOBBY_FAILURE_THRESHOLD`, `DOBBY_COOLDOWN_SECS` — live cooldown
//! - `DOBBY_FALLBACK_SEED` — fixed seed for fallback template selection

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::llms::base_llm::{
    BaseLLMState, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MAX_RETRIES, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT,
};
use crate::llms::providers::fireworks::FIREWORKS_DEFAULT_MODEL;
use crate::llms::providers::gemini::GEMINI_DEFAULT_MODEL;
use crate::llms::{BaseLLM, FireworksCompletion, GeminiCompletion};
use crate::responder::HealthPolicy;

/// Invalid configuration value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Which hosted model answers live requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Fireworks,
    /// Never call a live model.
    Disabled,
}

impl FromStr for ProviderKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "fireworks" => Ok(ProviderKind::Fireworks),
            "none" | "off" | "fallback" => Ok(ProviderKind::Disabled),
            _ => Err(()),
        }
    }
}

/// Server configuration.
#[derive(Clone)]
pub struct DobbyConfig {
    pub host: String,
    pub port: u16,
    pub provider: ProviderKind,
    pub google_api_key: Option<String>,
    pub fireworks_api_key: Option<String>,
    /// Overrides the provider's default model.
    pub model: Option<String>,
    /// Overrides the provider's default endpoint base.
    pub base_url: Option<String>,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub timeout: Duration,
    pub max_retries: u32,
    pub failure_threshold: u32,
    pub cooldown: Duration,
    pub fallback_seed: Option<u64>,
}

impl Default for DobbyConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            provider: ProviderKind::Gemini,
            google_api_key: None,
            fireworks_api_key: None,
            model: None,
            base_url: None,
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            failure_threshold: HealthPolicy::default().failure_threshold,
            cooldown: HealthPolicy::default().cooldown,
            fallback_seed: None,
        }
    }
}

impl fmt::Debug for DobbyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("DobbyConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("provider", &self.provider)
            .field("google_api_key", &redact(&self.google_api_key))
            .field("fireworks_api_key", &redact(&self.fireworks_api_key))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("failure_threshold", &self.failure_threshold)
            .field("cooldown", &self.cooldown)
            .field("fallback_seed", &self.fallback_seed)
            .finish()
    }
}

impl DobbyConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let provider = match get("DOBBY_PROVIDER") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "DOBBY_PROVIDER",
                value: raw.clone(),
                reason: "expected gemini, fireworks or none",
            })?,
            None => defaults.provider,
        };

        let temperature: f64 = parse(&get, "DOBBY_TEMPERATURE", defaults.temperature)?;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::Invalid {
                key: "DOBBY_TEMPERATURE",
                value: temperature.to_string(),
                reason: "must be between 0.0 and 2.0",
            });
        }

        let max_output_tokens: u32 = parse(&get, "DOBBY_MAX_TOKENS", defaults.max_output_tokens)?;
        require_positive("DOBBY_MAX_TOKENS", max_output_tokens.into())?;

        let timeout_secs: u64 = parse(&get, "DOBBY_TIMEOUT_SECS", defaults.timeout.as_secs())?;
        require_positive("DOBBY_TIMEOUT_SECS", timeout_secs)?;

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse(&get, "PORT", defaults.port)?,
            provider,
            google_api_key: get("GOOGLE_AI_API_KEY").or_else(|| get("GEMINI_API_KEY")),
            fireworks_api_key: get("FIREWORKS_API_KEY"),
            model: get("DOBBY_MODEL"),
            base_url: get("DOBBY_BASE_URL"),
            temperature,
            max_output_tokens,
            timeout: Duration::from_secs(timeout_secs),
            max_retries: parse(&get, "DOBBY_MAX_RETRIES", defaults.max_retries)?,
            failure_threshold: parse(&get, "DOBBY_FAILURE_THRESHOLD", defaults.failure_threshold)?,
            cooldown: Duration::from_secs(parse(
                &get,
                "DOBBY_COOLDOWN_SECS",
                defaults.cooldown.as_secs(),
            )?),
            fallback_seed: get("DOBBY_FALLBACK_SEED")
                .map(|raw| {
                    raw.parse().map_err(|_| ConfigError::Invalid {
                        key: "DOBBY_FALLBACK_SEED",
                        value: raw.clone(),
                        reason: "expected an unsigned integer",
                    })
                })
                .transpose()?,
        })
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Credential for the selected provider, if any.
    pub fn api_key(&self) -> Option<&str> {
        match self.provider {
            ProviderKind::Gemini => self.google_api_key.as_deref(),
            ProviderKind::Fireworks => self.fireworks_api_key.as_deref(),
            ProviderKind::Disabled => None,
        }
    }

    pub fn health_policy(&self) -> HealthPolicy {
        HealthPolicy {
            failure_threshold: self.failure_threshold,
            cooldown: self.cooldown,
        }
    }

    /// The live model client, or `None` when the provider is disabled or
    /// has no credential.
    pub fn build_provider(&self) -> Option<Arc<dyn BaseLLM>> {
        let api_key = self.api_key()?.to_string();
        let default_model = match self.provider {
            ProviderKind::Gemini => GEMINI_DEFAULT_MODEL,
            ProviderKind::Fireworks => FIREWORKS_DEFAULT_MODEL,
            ProviderKind::Disabled => return None,
        };

        let mut state = BaseLLMState::new(self.model.as_deref().unwrap_or(default_model));
        state.api_key = Some(api_key);
        state.base_url = self.base_url.clone();
        state.temperature = self.temperature;
        state.max_output_tokens = self.max_output_tokens;
        state.timeout = self.timeout;
        state.max_retries = self.max_retries;

        let provider: Arc<dyn BaseLLM> = match self.provider {
            ProviderKind::Fireworks => Arc::new(FireworksCompletion::from_state(state)),
            _ => Arc::new(GeminiCompletion::from_state(state)),
        };
        Some(provider)
    }
}

fn parse<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw,
            reason: "not a valid number",
        }),
        None => Ok(default),
    }
}

fn require_positive(key: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "must be greater than zero",
        });
    }
    Ok(())
}
