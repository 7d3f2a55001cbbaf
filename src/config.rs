//! Configuration management for toolpilot.
//!
//! Configuration can be set via environment variables:
//! - `OPENROUTER_API_KEY` - Required. Your OpenRouter API key.
//! - `OPENROUTER_BASE_URL` - Optional. Base URL of the OpenAI-compatible API.
//!   Defaults to `https://openrouter.ai/api/v1`.
//! - `OPENROUTER_BASE_MODEL` - Optional. The model to use. Defaults to
//!   `anthropic/claude-haiku-4.5`.
//! - `MAX_ITERATIONS` - Optional. Maximum agent loop iterations. Defaults to `10`.

use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "anthropic/claude-haiku-4.5";
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenRouter API key
    pub api_key: String,

    /// Base URL of the chat-completion API
    pub base_url: String,

    /// Model identifier (OpenRouter format)
    pub model: String,

    /// Maximum number of requests the agent loop may send
    pub max_iterations: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENROUTER_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = var("OPENROUTER_API_KEY")
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))?;

        let base_url = var("OPENROUTER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidValue("OPENROUTER_BASE_URL".to_string(), e.to_string()))?;

        let model = var("OPENROUTER_BASE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let max_iterations = var("MAX_ITERATIONS")
            .map(|v| parse_iterations(&v))
            .transpose()?
            .unwrap_or(DEFAULT_MAX_ITERATIONS);

        Ok(Self {
            api_key,
            base_url,
            model,
            max_iterations,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            api_key,
            base_url,
            model,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

fn parse_iterations(value: &str) -> Result<usize, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidValue("MAX_ITERATIONS".to_string(), msg);
    match value.trim().parse::<usize>() {
        Ok(0) => Err(invalid("must be at least 1".to_string())),
        Ok(n) => Ok(n),
        Err(e) => Err(invalid(e.to_string())),
    }
}
