//! Database schema definitions and initialization.
//!
//! The store has a single table, `journal_entries`. Timestamps are stored as
//! fixed-width UTC text so that ordering by the column is chronological.

use crate::errors::{AppResult, DatabaseError};
use rusqlite::Connection;
use tracing::debug;

/// Current schema version.
///
/// Increment this whenever schema changes are made to support future migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Creates the journal table and its indexes.
///
/// This function is idempotent - it uses `CREATE TABLE IF NOT EXISTS`
/// so it's safe to call multiple times.
///
/// # Errors
///
/// Returns an error if any DDL statement fails.
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    debug!("Creating database tables");

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS journal_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL CHECK(length(title) > 0 AND length(title) <= 200),
            content TEXT NOT NULL CHECK(length(content) > 0),
            created_at TEXT NOT NULL,
            updated_at TEXT,
            mood TEXT CHECK(mood IS NULL OR length(mood) <= 50),
            tags TEXT CHECK(tags IS NULL OR length(tags) <= 500),
            ai_insights TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_journal_entries_created_at
            ON journal_entries(created_at DESC);
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)
        .map_err(DatabaseError::Sqlite)?;

    debug!("Database tables created");
    Ok(())
}
