//! Service configuration, read from the environment.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::funnel::trial::DEFAULT_MAX_MESSAGES;

/// Funnel service configuration.
#[derive(Debug, Clone)]
pub struct FunnelConfig {
    /// Port for the REST server.
    pub port: u16,
    /// Path to the durable store.
    pub db_path: String,
    /// Chatbot inference backend endpoint.
    pub backend_endpoint: String,
    /// Optional bearer token for the backend.
    pub backend_api_key: Option<SecretString>,
    /// Per-request timeout against the backend.
    pub backend_timeout: Duration,
    /// Trial message ceiling.
    pub trial_max_messages: u32,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            db_path: "./data/funnel.db".to_string(),
            backend_endpoint: "http://localhost:9000/v1/chat".to_string(),
            backend_api_key: None,
            backend_timeout: Duration::from_secs(30),
            trial_max_messages: DEFAULT_MAX_MESSAGES,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("could not parse {raw:?}"),
        }),
        Err(_) => Ok(default),
    }
}

impl FunnelConfig {
    /// Build configuration from environment variables.
    ///
    /// `CHATBOT_BACKEND_URL` is required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let backend_endpoint = std::env::var("CHATBOT_BACKEND_URL")
            .map_err(|_| ConfigError::MissingEnvVar("CHATBOT_BACKEND_URL".to_string()))?;

        let backend_api_key = std::env::var("CHATBOT_BACKEND_API_KEY")
            .ok()
            .map(SecretString::from);

        Ok(Self {
            port: parse_env("CHATFUNNEL_PORT", defaults.port)?,
            db_path: std::env::var("CHATFUNNEL_DB_PATH").unwrap_or(defaults.db_path),
            backend_endpoint,
            backend_api_key,
            backend_timeout: Duration::from_secs(parse_env(
                "CHATBOT_BACKEND_TIMEOUT_SECS",
                defaults.backend_timeout.as_secs(),
            )?),
            trial_max_messages: parse_env("CHATFUNNEL_TRIAL_MAX", defaults.trial_max_messages)?,
        })
    }
}
