//! Integration tests for journal operations over a real database and a mocked chat API.

mod test_helpers;

use aijournal::ai::prompts::{INSIGHTS_ERROR_FALLBACK, INSIGHTS_SYSTEM_PROMPT, PROMPTS_FALLBACK};
use aijournal::db::NewEntry;
use aijournal::errors::{AppError, DatabaseError};
use aijournal::journal::{InsightSource, JournalService};
use chrono::{TimeZone, Utc};
use mockito::Matcher;
use serde_json::json;
use test_helpers::{journal_at, mock_completion, mock_completion_matching, UNREACHABLE_BASE};

/// Stores an entry directly, bypassing the AI call, created at the given hour.
fn seed(journal: &JournalService, content: &str, hour: u32) -> i64 {
    let entry = NewEntry {
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
        ..NewEntry::new(format!("Entry at {}", hour), content)
    };
    journal.database().create_entry(&entry).unwrap()
}

#[test]
fn test_day_one_scenario() {
    let mut server = mockito::Server::new();
    mock_completion(&mut server, "A bright start.");
    let (_dir, journal) = journal_at(&server.url(), 1000);

    let (id, insight) = journal
        .add_entry("Day One", "Felt good today.", Some("happy"))
        .unwrap();
    assert_eq!(id, 1);
    assert_eq!(insight, "A bright start.");

    let mut entry = journal.get_entry_by_id(1).unwrap().unwrap();
    assert_eq!(entry.title, "Day One");
    assert_eq!(entry.content, "Felt good today.");
    assert_eq!(entry.mood.as_deref(), Some("happy"));
    assert_eq!(entry.ai_insights.as_deref(), Some("A bright start."));
    assert!(entry.updated_at.is_none());
    let created_at = entry.created_at;

    entry.content = "Felt even better by evening.".to_string();
    assert!(journal.update_entry(&mut entry));

    let stored = journal.get_entry_by_id(1).unwrap().unwrap();
    assert_eq!(stored.content, "Felt even better by evening.");
    assert_eq!(stored.created_at, created_at);
    let updated_at = stored.updated_at.expect("updated_at set by update");
    assert!(updated_at >= created_at);
}

#[test]
fn test_add_entry_completes_when_ai_is_down() {
    let (_dir, journal) = journal_at(UNREACHABLE_BASE, 1000);

    let (id, insight) = journal.add_entry("Offline", "No network today.", None).unwrap();
    assert_eq!(insight, INSIGHTS_ERROR_FALLBACK);

    let entry = journal.get_entry_by_id(id).unwrap().unwrap();
    assert_eq!(entry.ai_insights.as_deref(), Some(INSIGHTS_ERROR_FALLBACK));
    assert!(entry.mood.is_none());
}

#[test]
fn test_add_entry_rejects_invalid_input_without_calling_ai() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create();
    let (_dir, journal) = journal_at(&server.url(), 1000);

    let result = journal.add_entry("", "Content without a title", None);
    assert!(matches!(
        result,
        Err(AppError::Database(DatabaseError::Validation(_)))
    ));
    assert!(journal.get_entries().unwrap().is_empty());
    mock.assert();
}

#[test]
fn test_add_entry_sends_content_without_context() {
    let mut server = mockito::Server::new();
    let mock = mock_completion_matching(
        &mut server,
        Matcher::PartialJson(json!({
            "messages": [
                { "role": "system", "content": INSIGHTS_SYSTEM_PROMPT },
                { "role": "user", "content": "Quiet morning." }
            ]
        })),
        "Calm.",
    );
    let (_dir, journal) = journal_at(&server.url(), 1000);

    journal.add_entry("Morning", "  Quiet morning.  ", Some("  ")).unwrap();
    mock.assert();

    let entry = &journal.get_entries().unwrap()[0];
    assert_eq!(entry.content, "Quiet morning.");
    assert!(entry.mood.is_none());
}

#[test]
fn test_get_insight_sends_newest_entries_within_budget() {
    let mut server = mockito::Server::new();
    let mock = mock_completion_matching(
        &mut server,
        Matcher::PartialJson(json!({
            "messages": [
                { "role": "system", "content": INSIGHTS_SYSTEM_PROMPT },
                { "role": "user", "content": "Here's some context from previous entries: third\nsecond" },
                { "role": "user", "content": "What changed?" }
            ]
        })),
        "Things got better.",
    );
    // Budget fits the two newest entries plus the separator: "third\nsecond".
    let (_dir, journal) = journal_at(&server.url(), 12);

    seed(&journal, "first", 8);
    seed(&journal, "third", 20);
    seed(&journal, "second", 12);

    assert_eq!(journal.get_insight("What changed?").unwrap(), "Things got better.");
    mock.assert();
}

#[test]
fn test_get_insight_without_entries_sends_no_context() {
    let mut server = mockito::Server::new();
    let mock = mock_completion_matching(
        &mut server,
        Matcher::PartialJson(json!({
            "messages": [
                { "role": "system", "content": INSIGHTS_SYSTEM_PROMPT },
                { "role": "user", "content": "Anything yet?" }
            ]
        })),
        "Nothing to go on yet.",
    );
    let (_dir, journal) = journal_at(&server.url(), 1000);

    assert_eq!(journal.get_insight("Anything yet?").unwrap(), "Nothing to go on yet.");
    mock.assert();
}

#[test]
fn test_search_and_delete_pass_through() {
    let mut server = mockito::Server::new();
    mock_completion(&mut server, "ok");
    let (_dir, journal) = journal_at(&server.url(), 1000);

    let (beach, _) = journal.add_entry("Beach", "Sand and sun", Some("relaxed")).unwrap();
    let (office, _) = journal.add_entry("Office", "Meetings", Some("tired")).unwrap();

    let results = journal.search_entries("relax").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, beach);

    let all = journal.get_entries().unwrap();
    assert!(results.iter().all(|r| all.contains(r)));

    assert!(!journal.delete_entry(999));
    assert_eq!(journal.get_entries().unwrap().len(), 2);

    assert!(journal.delete_entry(office));
    assert!(journal.get_entry_by_id(office).unwrap().is_none());
}

#[test]
fn test_update_missing_entry_returns_false() {
    let mut server = mockito::Server::new();
    mock_completion(&mut server, "ok");
    let (_dir, journal) = journal_at(&server.url(), 1000);

    let (id, _) = journal.add_entry("Real", "entry", None).unwrap();
    let mut ghost = journal.get_entry_by_id(id).unwrap().unwrap();
    ghost.id = 4242;

    assert!(!journal.update_entry(&mut ghost));
}

#[test]
fn test_entry_insight_uses_cache_then_refresh_regenerates() {
    let mut server = mockito::Server::new();
    let mock = mock_completion_matching(
        &mut server,
        Matcher::PartialJson(json!({
            "messages": [
                { "role": "system", "content": INSIGHTS_SYSTEM_PROMPT },
                { "role": "user", "content": "Please analyze this journal entry: Some thoughts." }
            ]
        })),
        "Fresh insight.",
    );
    let (_dir, journal) = journal_at(&server.url(), 1000);
    let id = journal
        .database()
        .create_entry(&NewEntry {
            ai_insights: Some("Stored insight.".to_string()),
            ..NewEntry::new("Cached", "Some thoughts.")
        })
        .unwrap();

    let cached = journal.entry_insight(id).unwrap().unwrap();
    assert_eq!(cached.source, InsightSource::Cached);
    assert_eq!(cached.insight, "Stored insight.");
    assert!(cached.entry.updated_at.is_none());

    let refreshed = journal.refresh_insight(id).unwrap().unwrap();
    assert_eq!(refreshed.source, InsightSource::Generated);
    assert_eq!(refreshed.insight, "Fresh insight.");
    mock.assert();

    let stored = journal.get_entry_by_id(id).unwrap().unwrap();
    assert_eq!(stored.ai_insights.as_deref(), Some("Fresh insight."));
    assert!(stored.updated_at.unwrap() >= stored.created_at);
}

#[test]
fn test_entry_insight_generates_when_missing() {
    let (_dir, journal) = journal_at(UNREACHABLE_BASE, 1000);
    let id = seed(&journal, "Written offline.", 9);

    let result = journal.entry_insight(id).unwrap().unwrap();
    assert_eq!(result.source, InsightSource::Generated);
    assert_eq!(result.insight, INSIGHTS_ERROR_FALLBACK);

    let stored = journal.get_entry_by_id(id).unwrap().unwrap();
    assert_eq!(stored.ai_insights.as_deref(), Some(INSIGHTS_ERROR_FALLBACK));
    assert!(stored.updated_at.is_some());
}

#[test]
fn test_entry_insight_missing_entry() {
    let (_dir, journal) = journal_at(UNREACHABLE_BASE, 1000);
    assert!(journal.entry_insight(7).unwrap().is_none());
    assert!(journal.refresh_insight(7).unwrap().is_none());
}

#[test]
fn test_generate_prompts_falls_back_when_ai_is_down() {
    let (_dir, journal) = journal_at(UNREACHABLE_BASE, 1000);
    assert_eq!(journal.generate_prompts(Some("sad"), None), PROMPTS_FALLBACK);
}
