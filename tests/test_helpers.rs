#![allow(dead_code)]

use aijournal::ai::{ChatClient, InsightClient, RetryPolicy};
use aijournal::db::Database;
use aijournal::journal::JournalService;
use assert_cmd::Command;
use mockito::{Matcher, Mock, ServerGuard};
use std::time::Duration;
use tempfile::TempDir;

pub const TEST_API_KEY: &str = "sk-test-key";

/// An address nothing listens on, for simulating network failure.
pub const UNREACHABLE_BASE: &str = "http://127.0.0.1:1";

/// Builds a chat client for `base_url` that makes a single attempt.
pub fn chat_client(base_url: &str) -> ChatClient {
    ChatClient::new(base_url, TEST_API_KEY, "test-model", Duration::from_secs(5))
        .expect("build chat client")
        .with_retry(RetryPolicy::none())
}

/// A journal backed by a fresh database in a temp dir and a chat API at `base_url`.
///
/// Keep the returned `TempDir` alive for as long as the journal is used.
pub fn journal_at(base_url: &str, context_chars: usize) -> (TempDir, JournalService) {
    let temp_dir = TempDir::new().expect("create temp dir");
    let db = Database::open(&temp_dir.path().join("journal.db")).expect("open database");
    db.initialize_schema().expect("initialize schema");

    let journal = JournalService::new(db, InsightClient::new(chat_client(base_url)), context_chars);
    (temp_dir, journal)
}

/// A JSON body in the shape the chat completions endpoint returns.
pub fn completion_body(text: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

/// Mocks a successful completion answering any chat request.
pub fn mock_completion(server: &mut ServerGuard, text: &str) -> Mock {
    server
        .mock("POST", "/chat/completions")
        .match_header("authorization", format!("Bearer {}", TEST_API_KEY).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(text))
        .create()
}

/// Mocks a successful completion only for requests whose body matches `matcher`.
pub fn mock_completion_matching(server: &mut ServerGuard, matcher: Matcher, text: &str) -> Mock {
    server
        .mock("POST", "/chat/completions")
        .match_body(matcher)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(text))
        .create()
}

/// Creates a `Command` for the `aijournal` binary with a clean, non-interactive environment.
pub fn base_command(db_path: &std::path::Path, api_base: &str) -> Command {
    let mut cmd = Command::cargo_bin("aijournal").expect("aijournal binary not built");
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    cmd.env("HOME", std::env::temp_dir())
        .env("AIJOURNAL_API_KEY", TEST_API_KEY)
        .env("AIJOURNAL_API_BASE", api_base)
        .env("AIJOURNAL_AI_RETRIES", "0")
        .env("AIJOURNAL_DB", db_path);
    cmd
}
