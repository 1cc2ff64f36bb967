//! Constants used throughout the application.
//!
//! This module contains all constants used in the aijournal application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "aijournal";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A personal journal with AI-generated insights and prompts";

// Logging
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";

// Configuration Keys & Environment Variables
/// Environment variable for the SQLite database path.
pub const ENV_VAR_DB_PATH: &str = "AIJOURNAL_DB";
/// Environment variable for the chat API key (takes precedence over `OPENAI_API_KEY`).
pub const ENV_VAR_API_KEY: &str = "AIJOURNAL_API_KEY";
/// Standard environment variable for the OpenAI API key.
pub const ENV_VAR_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable for the chat API base URL.
pub const ENV_VAR_API_BASE: &str = "AIJOURNAL_API_BASE";
/// Environment variable for the chat model name.
pub const ENV_VAR_MODEL: &str = "AIJOURNAL_MODEL";
/// Environment variable for the per-request timeout in seconds.
pub const ENV_VAR_TIMEOUT_SECS: &str = "AIJOURNAL_TIMEOUT_SECS";
/// Environment variable for the number of retries after a failed chat call.
pub const ENV_VAR_AI_RETRIES: &str = "AIJOURNAL_AI_RETRIES";
/// Environment variable for the question context budget in characters.
pub const ENV_VAR_CONTEXT_CHARS: &str = "AIJOURNAL_CONTEXT_CHARS";
/// Default database location, shell-expanded at load time.
pub const DEFAULT_DB_PATH: &str = "~/.local/share/aijournal/journal.db";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// AI Defaults
/// Default base URL of the chat completion API.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
/// Default chat model.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default number of retries after a failed chat call.
pub const DEFAULT_AI_RETRIES: u32 = 1;
/// Upper bound on retries after a failed chat call.
pub const MAX_AI_RETRIES: u32 = 5;
/// Delay before the first retry, multiplied by the attempt number afterwards.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;
/// Default number of characters of prior-entry context sent with a question.
pub const DEFAULT_CONTEXT_CHARS: usize = 12_000;

// Entry Limits
/// Maximum length of an entry title, in characters.
pub const MAX_TITLE_CHARS: usize = 200;
/// Maximum length of an entry mood, in characters.
pub const MAX_MOOD_CHARS: usize = 50;
/// Maximum length of an entry's tags, in characters.
pub const MAX_TAGS_CHARS: usize = 500;

// Display
/// Timestamp format used when listing entries.
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Number of content characters shown in entry listings.
pub const PREVIEW_CHARS: usize = 100;
