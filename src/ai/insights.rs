//! Best-effort AI enrichment for journal entries.
//!
//! [`InsightClient`] never fails: every error from the chat API is logged and
//! replaced by a fixed fallback text, so the operation it is attached to
//! always completes.

use super::chat::{ChatClient, Message};
use super::prompts::{
    insights_messages, prompts_messages, INSIGHTS_EMPTY_FALLBACK, INSIGHTS_ERROR_FALLBACK,
    PROMPTS_FALLBACK,
};
use crate::errors::{AIError, AppError};
use tracing::{error, info, warn};

/// Generates insights and journal prompts through a chat client.
pub struct InsightClient {
    chat: ChatClient,
}

impl InsightClient {
    /// Wraps a configured chat client.
    pub fn new(chat: ChatClient) -> Self {
        Self { chat }
    }

    /// Asks for an analysis of `prompt`, optionally informed by prior-entry `context`.
    ///
    /// Returns the trimmed response text, or a fallback sentence if the call
    /// fails or yields nothing.
    pub fn get_insights(&self, prompt: &str, context: &str) -> String {
        info!(
            "Requesting insights ({} prompt chars, {} context chars)",
            prompt.chars().count(),
            context.chars().count()
        );

        let messages = insights_messages(prompt, context);
        self.complete_or(&messages, INSIGHTS_EMPTY_FALLBACK, INSIGHTS_ERROR_FALLBACK)
    }

    /// Asks for 3-5 journal prompts tailored to an optional `mood` and `topic`.
    ///
    /// Returns the trimmed response text, or a fixed list of general prompts if
    /// the call fails or yields nothing.
    pub fn generate_prompts(&self, mood: &str, topic: &str) -> String {
        info!("Requesting journal prompts");

        let messages = prompts_messages(mood, topic);
        self.complete_or(&messages, PROMPTS_FALLBACK, PROMPTS_FALLBACK)
    }

    fn complete_or(&self, messages: &[Message], empty: &str, failed: &str) -> String {
        match self.chat.complete(messages) {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    warn!("Chat API returned blank text");
                    empty.to_string()
                } else {
                    text.to_string()
                }
            }
            Err(AppError::AI(AIError::EmptyResponse)) => {
                warn!("Chat API returned no content");
                empty.to_string()
            }
            Err(e) => {
                error!("An error occurred while calling the chat API: {}", e);
                failed.to_string()
            }
        }
    }
}
