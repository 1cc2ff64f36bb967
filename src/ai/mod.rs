//! AI operations for journal insights and prompts.
//!
//! This module provides integration with an OpenAI-compatible chat completion
//! API for analysing entries and suggesting journal prompts.
//!
//! # Module Structure
//!
//! - `chat`: HTTP client and retry policy
//! - `insights`: Fallback-on-failure wrapper used by the journal
//! - `prompts`: System prompts, fallback texts and message builders
//!
//! # Example
//!
//! ```no_run
//! use aijournal::ai::{ChatClient, InsightClient};
//! use std::time::Duration;
//!
//! let chat = ChatClient::new("https://api.openai.com/v1", "sk-...", "gpt-4o-mini", Duration::from_secs(30))?;
//! let insights = InsightClient::new(chat);
//! println!("{}", insights.generate_prompts("tired", "work"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod chat;
pub mod insights;
pub mod prompts;

// Re-export commonly used types
pub use chat::{ChatClient, Message, RetryPolicy};
pub use insights::InsightClient;
