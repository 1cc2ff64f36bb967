//! Configuration management for the aijournal application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `AIJOURNAL_DB`: Path to the SQLite database (defaults to ~/.local/share/aijournal/journal.db)
//! - `AIJOURNAL_API_KEY`: API key for the chat completion service
//! - `OPENAI_API_KEY`: Fallback API key if AIJOURNAL_API_KEY is not set
//! - `AIJOURNAL_API_BASE`: Base URL of the chat API (defaults to https://api.openai.com/v1)
//! - `AIJOURNAL_MODEL`: Chat model (defaults to gpt-4o-mini)
//! - `AIJOURNAL_TIMEOUT_SECS`: Per-request timeout (defaults to 30)
//! - `AIJOURNAL_AI_RETRIES`: Retries after a failed chat call (defaults to 1)
//! - `AIJOURNAL_CONTEXT_CHARS`: Context budget for questions (defaults to 12000)

use crate::ai::RetryPolicy;
use crate::constants::{
    DEFAULT_AI_RETRIES, DEFAULT_API_BASE, DEFAULT_CHAT_MODEL, DEFAULT_CONTEXT_CHARS,
    DEFAULT_DB_PATH, DEFAULT_RETRY_BACKOFF_MS, DEFAULT_TIMEOUT_SECS, ENV_VAR_AI_RETRIES,
    ENV_VAR_API_BASE, ENV_VAR_API_KEY, ENV_VAR_CONTEXT_CHARS, ENV_VAR_DB_PATH, ENV_VAR_MODEL,
    ENV_VAR_OPENAI_API_KEY, ENV_VAR_TIMEOUT_SECS, MAX_AI_RETRIES, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Configuration for the aijournal application.
///
/// # Examples
///
/// ```
/// use aijournal::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     db_path: PathBuf::from("/tmp/journal.db"),
///     api_key: "sk-test".to_string(),
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct Config {
    /// SQLite database file.
    pub db_path: PathBuf,

    /// Bearer token for the chat API.
    ///
    /// Loaded from AIJOURNAL_API_KEY, then OPENAI_API_KEY.
    pub api_key: String,

    /// Base URL of the chat API, without the `/chat/completions` suffix.
    pub api_base: String,

    /// Chat model name.
    pub model: String,

    /// Per-request timeout for chat calls.
    pub timeout: Duration,

    /// Retries after a failed chat call.
    pub ai_retries: u32,

    /// Maximum characters of prior-entry context sent with a question.
    pub context_chars: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_path", &self.db_path)
            .field("api_key", &REDACTED_PLACEHOLDER)
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("ai_retries", &self.ai_retries)
            .field("context_chars", &self.context_chars)
            .finish()
    }
}

impl Default for Config {
    /// Creates a Config with default values and no database path or API key.
    fn default() -> Self {
        Config {
            db_path: PathBuf::new(),
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            ai_retries: DEFAULT_AI_RETRIES,
            context_chars: DEFAULT_CONTEXT_CHARS,
        }
    }
}

/// Reads a non-empty environment variable.
fn env_non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Reads and parses a numeric environment variable, falling back to `default`.
fn env_parsed<T: FromStr>(name: &str, default: T) -> AppResult<T> {
    match env_non_empty(name) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            AppError::Config(format!("{} must be a non-negative integer, got '{}'", name, raw))
        }),
        None => Ok(default),
    }
}

/// Expands `~` and environment variables in a path.
pub fn expand_path(raw: &str) -> AppResult<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The API key is not required here; [`Config::validate`] rejects a
    /// missing one.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The database path expansion fails
    /// - A numeric variable is not a valid non-negative integer
    pub fn load() -> AppResult<Self> {
        let db_path_raw =
            env_non_empty(ENV_VAR_DB_PATH).unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let db_path = expand_path(&db_path_raw)?;

        let api_key = env_non_empty(ENV_VAR_API_KEY)
            .or_else(|| env_non_empty(ENV_VAR_OPENAI_API_KEY))
            .unwrap_or_default();

        let api_base =
            env_non_empty(ENV_VAR_API_BASE).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let model = env_non_empty(ENV_VAR_MODEL).unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string());

        let timeout = Duration::from_secs(env_parsed(ENV_VAR_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS)?);
        let ai_retries = env_parsed(ENV_VAR_AI_RETRIES, DEFAULT_AI_RETRIES)?;
        let context_chars = env_parsed(ENV_VAR_CONTEXT_CHARS, DEFAULT_CONTEXT_CHARS)?;

        Ok(Config {
            db_path,
            api_key,
            api_base,
            model,
            timeout,
            ai_retries,
            context_chars,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The API key is empty
    /// - The database path is empty or relative
    /// - The API base URL is not http(s)
    /// - The model name is empty
    /// - The timeout is zero
    /// - More than `MAX_AI_RETRIES` retries are requested
    pub fn validate(&self) -> AppResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Config(format!(
                "API key is missing. Set {} or {}",
                ENV_VAR_API_KEY, ENV_VAR_OPENAI_API_KEY
            )));
        }

        if self.db_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }

        if !self.db_path.is_absolute() {
            return Err(AppError::Config(
                "Database path must be an absolute path".to_string(),
            ));
        }

        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "API base URL must start with http:// or https://, got '{}'",
                self.api_base
            )));
        }

        if self.model.trim().is_empty() {
            return Err(AppError::Config("Model name is empty".to_string()));
        }

        if self.timeout.is_zero() {
            return Err(AppError::Config(
                "Request timeout must be at least one second".to_string(),
            ));
        }

        if self.ai_retries > MAX_AI_RETRIES {
            return Err(AppError::Config(format!(
                "{} must be at most {}, got {}",
                ENV_VAR_AI_RETRIES, MAX_AI_RETRIES, self.ai_retries
            )));
        }

        Ok(())
    }

    /// The retry schedule for chat calls.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.ai_retries,
            backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
        }
    }
}
