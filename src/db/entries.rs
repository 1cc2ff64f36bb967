//! Entry CRUD operations.
//!
//! This module provides functions for creating, reading, updating, deleting and
//! searching journal entries in the database.
//!
//! Reads and inserts propagate errors. `update_entry` and `delete_entry` report
//! a plain `bool` instead: `false` means nothing changed, whatever the cause.

use crate::constants::{MAX_MOOD_CHARS, MAX_TAGS_CHARS, MAX_TITLE_CHARS};
use crate::errors::{AppResult, DatabaseError};
use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, warn};

/// Storage format for timestamps. Fixed width, so text order is time order.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

const SELECT_COLUMNS: &str =
    "SELECT id, title, content, created_at, updated_at, mood, tags, ai_insights FROM journal_entries";

/// Newest first; entries created in the same instant keep insertion order.
const ORDER_NEWEST_FIRST: &str = "ORDER BY created_at DESC, id ASC";

/// A journal entry as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub mood: Option<String>,
    pub tags: Option<String>,
    pub ai_insights: Option<String>,
}

/// A journal entry that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub mood: Option<String>,
    pub tags: Option<String>,
    pub ai_insights: Option<String>,
}

impl NewEntry {
    /// Creates an entry with the required fields, stamped with the current time.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            created_at: timestamp_now(),
            updated_at: None,
            mood: None,
            tags: None,
            ai_insights: None,
        }
    }

    /// Checks the field constraints without touching the database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` describing the first violated constraint.
    pub fn validate(&self) -> Result<(), DatabaseError> {
        validate_fields(
            &self.title,
            &self.content,
            self.mood.as_deref(),
            self.tags.as_deref(),
        )?;
        if self.updated_at.is_some_and(|u| u < self.created_at) {
            return Err(DatabaseError::Validation(
                "updated_at cannot precede created_at".to_string(),
            ));
        }
        Ok(())
    }

    /// Attaches the id the store assigned.
    pub fn with_id(self, id: i64) -> JournalEntry {
        JournalEntry {
            id,
            title: self.title,
            content: self.content,
            created_at: self.created_at,
            updated_at: self.updated_at,
            mood: self.mood,
            tags: self.tags,
            ai_insights: self.ai_insights,
        }
    }
}

/// Returns the current time at the precision the store keeps.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<JournalEntry> {
    let created_at = parse_timestamp(3, &row.get::<_, String>(3)?)?;
    let updated_at = match row.get::<_, Option<String>>(4)? {
        Some(raw) => Some(parse_timestamp(4, &raw)?),
        None => None,
    };

    Ok(JournalEntry {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at,
        updated_at,
        mood: row.get(5)?,
        tags: row.get(6)?,
        ai_insights: row.get(7)?,
    })
}

/// Checks the field constraints shared by inserts and updates.
fn validate_fields(
    title: &str,
    content: &str,
    mood: Option<&str>,
    tags: Option<&str>,
) -> Result<(), DatabaseError> {
    if title.trim().is_empty() {
        return Err(DatabaseError::Validation("title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(DatabaseError::Validation(format!(
            "title exceeds {} characters",
            MAX_TITLE_CHARS
        )));
    }
    if content.trim().is_empty() {
        return Err(DatabaseError::Validation("content is required".to_string()));
    }
    if mood.is_some_and(|m| m.chars().count() > MAX_MOOD_CHARS) {
        return Err(DatabaseError::Validation(format!(
            "mood exceeds {} characters",
            MAX_MOOD_CHARS
        )));
    }
    if tags.is_some_and(|t| t.chars().count() > MAX_TAGS_CHARS) {
        return Err(DatabaseError::Validation(format!(
            "tags exceed {} characters",
            MAX_TAGS_CHARS
        )));
    }
    Ok(())
}

/// Inserts a new entry and returns the id assigned to it.
///
/// # Errors
///
/// Returns `DatabaseError::Validation` if a required field is empty or a length
/// limit is exceeded, or `DatabaseError::Sqlite` if the insert fails.
pub fn create_entry(conn: &Connection, entry: &NewEntry) -> AppResult<i64> {
    entry.validate()?;

    conn.execute(
        r#"
        INSERT INTO journal_entries (title, content, created_at, updated_at, mood, tags, ai_insights)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
        params![
            entry.title,
            entry.content,
            format_timestamp(&entry.created_at),
            entry.updated_at.as_ref().map(format_timestamp),
            entry.mood,
            entry.tags,
            entry.ai_insights,
        ],
    )
    .map_err(DatabaseError::Sqlite)?;

    let id = conn.last_insert_rowid();
    debug!("Entry created with id {}", id);
    Ok(id)
}

/// Retrieves an entry by id.
///
/// # Errors
///
/// Returns an error if the database operation fails.
/// Returns `Ok(None)` if no entry has the given id.
pub fn get_entry(conn: &Connection, id: i64) -> AppResult<Option<JournalEntry>> {
    debug!("Getting entry {}", id);

    let entry = conn
        .query_row(
            &format!("{} WHERE id = ?1", SELECT_COLUMNS),
            params![id],
            entry_from_row,
        )
        .optional()
        .map_err(DatabaseError::Sqlite)?;

    Ok(entry)
}

/// Lists every entry, newest first.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_entries(conn: &Connection) -> AppResult<Vec<JournalEntry>> {
    let mut stmt = conn
        .prepare(&format!("{} {}", SELECT_COLUMNS, ORDER_NEWEST_FIRST))
        .map_err(DatabaseError::Sqlite)?;

    let entries = stmt
        .query_map([], entry_from_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    debug!("Listed {} entries", entries.len());
    Ok(entries)
}

/// Finds entries whose title, content or mood contains `term`.
///
/// Matching is a case-sensitive substring test. Entries without a mood are
/// matched on title and content only. Results are ordered like
/// [`list_entries`].
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn search_entries(conn: &Connection, term: &str) -> AppResult<Vec<JournalEntry>> {
    debug!("Searching entries for {:?}", term);

    let mut stmt = conn
        .prepare(&format!(
            "{} WHERE instr(title, ?1) > 0 OR instr(content, ?1) > 0 \
             OR (mood IS NOT NULL AND instr(mood, ?1) > 0) {}",
            SELECT_COLUMNS, ORDER_NEWEST_FIRST
        ))
        .map_err(DatabaseError::Sqlite)?;

    let entries = stmt
        .query_map(params![term], entry_from_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    debug!("Search matched {} entries", entries.len());
    Ok(entries)
}

/// Replaces the mutable fields of an existing entry.
///
/// `created_at` is never written. Returns `false` without raising when the id
/// does not exist, the fields are invalid, `updated_at` precedes the stored
/// `created_at`, or the database reports an error.
pub fn update_entry(conn: &Connection, entry: &JournalEntry) -> bool {
    if let Err(e) = validate_fields(
        &entry.title,
        &entry.content,
        entry.mood.as_deref(),
        entry.tags.as_deref(),
    ) {
        warn!("Rejected update of entry {}: {}", entry.id, e);
        return false;
    }

    let updated_at = entry.updated_at.as_ref().map(format_timestamp);
    let result = conn.execute(
        r#"
        UPDATE journal_entries
        SET title = ?2, content = ?3, updated_at = ?4, mood = ?5, tags = ?6, ai_insights = ?7
        WHERE id = ?1 AND (?4 IS NULL OR ?4 >= created_at)
        "#,
        params![
            entry.id,
            entry.title,
            entry.content,
            updated_at,
            entry.mood,
            entry.tags,
            entry.ai_insights,
        ],
    );

    match result {
        Ok(0) => {
            warn!("No entry updated for id {}", entry.id);
            false
        }
        Ok(_) => {
            debug!("Entry {} updated", entry.id);
            true
        }
        Err(e) => {
            warn!("Failed to update entry {}: {}", entry.id, e);
            false
        }
    }
}

/// Deletes an entry by id.
///
/// Returns `true` if a row was removed, `false` if the id did not exist or the
/// database reported an error.
pub fn delete_entry(conn: &Connection, id: i64) -> bool {
    match conn.execute("DELETE FROM journal_entries WHERE id = ?1", params![id]) {
        Ok(0) => {
            debug!("No entry to delete for id {}", id);
            false
        }
        Ok(_) => {
            debug!("Entry {} deleted", id);
            true
        }
        Err(e) => {
            warn!("Failed to delete entry {}: {}", id, e);
            false
        }
    }
}

/// Counts stored entries.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn count_entries(conn: &Connection) -> AppResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM journal_entries", [], |row| row.get(0))
        .map_err(DatabaseError::Sqlite)?;
    Ok(count as usize)
}
