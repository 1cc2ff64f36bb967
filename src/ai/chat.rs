//! HTTP client for OpenAI-compatible chat completion APIs.
//!
//! The client speaks the `POST {base_url}/chat/completions` shape: an ordered
//! list of role-tagged messages in, a list of choices out. Failed calls can be
//! retried a bounded number of times via [`RetryPolicy`].

use crate::errors::{AIError, AppResult};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// A message in a chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender (system, user, assistant)
    pub role: String,
    /// The content of the message
    pub content: String,
}

impl Message {
    /// Creates a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for chat completion.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

/// Response from chat completion.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Bounded retry schedule for a single chat call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts made after the first failure.
    pub max_retries: u32,
    /// Delay before the first retry; the n-th retry waits n times this.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }

    /// Runs `op` until it succeeds or the retries are spent, returning the last error.
    pub fn run<T>(&self, mut op: impl FnMut() -> AppResult<T>) -> AppResult<T> {
        let mut attempt = 0;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "Chat call failed (attempt {} of {}): {}",
                        attempt,
                        self.max_retries + 1,
                        e
                    );
                    thread::sleep(self.backoff * attempt);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Client for a chat completion endpoint.
pub struct ChatClient {
    base_url: String,
    api_key: String,
    model: String,
    retry: RetryPolicy,
    client: Client,
}

impl ChatClient {
    /// Creates a new chat client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the API (e.g., "https://api.openai.com/v1")
    /// * `api_key` - Bearer token sent with every request
    /// * `model` - Model name (e.g., "gpt-4o-mini")
    /// * `timeout` - Per-request timeout covering connect and read
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AIError::Request)?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            retry: RetryPolicy::none(),
            client,
        })
    }

    /// Replaces the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The model requests are sent to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a chat completion request, retrying per the configured policy.
    ///
    /// Returns the text of the first choice, untrimmed. Whitespace-only text
    /// counts as no content and yields `AIError::EmptyResponse`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API is not reachable or the request times out
    /// - The API returns a non-success status
    /// - The response cannot be parsed or carries no content
    pub fn complete(&self, messages: &[Message]) -> AppResult<String> {
        self.retry.run(|| self.complete_once(messages))
    }

    fn complete_once(&self, messages: &[Message]) -> AppResult<String> {
        debug!(
            "Sending chat request with model {} ({} messages)",
            self.model,
            messages.len()
        );

        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(AIError::Request)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(AIError::Status { status, body }.into());
        }

        let chat_response: ChatResponse = response.json().map_err(|e| {
            AIError::InvalidResponse(format!("Failed to parse chat response: {}", e))
        })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AIError::EmptyResponse)?;

        debug!("Received chat response ({} chars)", content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use std::cell::Cell;

    #[test]
    fn test_message_constructors() {
        let system = Message::system("You are a helpful assistant");
        assert_eq!(system.role, "system");
        assert_eq!(system.content, "You are a helpful assistant");

        let user = Message::user("Hello");
        assert_eq!(user.role, "user");
        assert_eq!(user.content, "Hello");
    }

    #[test]
    fn test_chat_client_trims_trailing_slash() {
        let client =
            ChatClient::new("http://localhost:8080/v1/", "key", "gpt-4o-mini", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/v1");
        assert_eq!(client.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_request_serialization() {
        let messages = vec![Message::system("sys"), Message::user("hi")];
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: &messages,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[test]
    fn test_retry_policy_stops_after_success() {
        let calls = Cell::new(0);
        let policy = RetryPolicy {
            max_retries: 3,
            backoff: Duration::ZERO,
        };

        let result = policy.run(|| {
            calls.set(calls.get() + 1);
            if calls.get() < 2 {
                Err(AIError::EmptyResponse.into())
            } else {
                Ok("done")
            }
        });

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_retry_policy_caps_attempts() {
        let calls = Cell::new(0);
        let policy = RetryPolicy {
            max_retries: 2,
            backoff: Duration::ZERO,
        };

        let result: AppResult<()> = policy.run(|| {
            calls.set(calls.get() + 1);
            Err(AIError::EmptyResponse.into())
        });

        assert!(matches!(result, Err(AppError::AI(AIError::EmptyResponse))));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_no_retry_policy_makes_one_attempt() {
        let calls = Cell::new(0);
        let result: AppResult<()> = RetryPolicy::none().run(|| {
            calls.set(calls.get() + 1);
            Err(AIError::EmptyResponse.into())
        });
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }
}
