// ABOUTME: Process configuration loaded from the environment (and .env).
// ABOUTME: Resolves trace store endpoints, model settings, and credentials.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default base URL of the trace store when `PHOENIX_HOST` is unset.
pub const DEFAULT_PHOENIX_HOST: &str = "http://localhost:6006";

/// Default model used by the greeting agent.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default chat-completions API base.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration shared by the binaries.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the trace store (GraphQL lives under `/graphql`).
    pub phoenix_host: String,

    /// Where span exports are sent.
    pub collector_endpoint: String,

    /// Model provider credential, if present. Never logged.
    pub openai_api_key: Option<SecretString>,

    /// Model name bound to the agent.
    pub model: String,

    /// Chat-completions API base.
    pub openai_base_url: String,

    /// Per-request timeout for outbound HTTP.
    pub timeout: Duration,
}

impl Config {
    /// Load `.env` if present, then read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let phoenix_host = get("PHOENIX_HOST")
            .map(|h| h.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_PHOENIX_HOST.to_string());

        let collector_endpoint = get("PHOENIX_COLLECTOR_ENDPOINT")
            .unwrap_or_else(|| format!("{}/v1/traces", phoenix_host));

        let timeout = match get("PHOENIX_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    key: "PHOENIX_TIMEOUT_SECS",
                    message: format!("'{}' is not a whole number of seconds", raw),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            phoenix_host,
            collector_endpoint,
            openai_api_key: get("OPENAI_API_KEY").map(SecretString::from),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url: get("OPENAI_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            timeout,
        })
    }

    /// Override the trace store base URL (e.g. from `--endpoint`).
    pub fn with_phoenix_host(mut self, host: impl Into<String>) -> Self {
        self.phoenix_host = host.into().trim_end_matches('/').to_string();
        self
    }

    /// The model credential, or a configuration error if it is absent.
    pub fn require_openai_key(&self) -> Result<SecretString, ConfigError> {
        self.openai_api_key
            .clone()
            .ok_or(ConfigError::Missing("OPENAI_API_KEY"))
    }
}
