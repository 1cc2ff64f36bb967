//! Database operations for journal entries.
//!
//! This module provides SQLite storage for journal entries. It uses connection
//! pooling via r2d2 so the handle can be shared freely.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `entries`: Entry CRUD and search operations
//!
//! # Example
//!
//! ```no_run
//! use aijournal::db::{Database, NewEntry};
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/journal.db"))?;
//! db.initialize_schema()?;
//! let id = db.create_entry(&NewEntry::new("Day One", "Felt good today."))?;
//! assert!(db.get_entry(id)?.is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod entries;
pub mod schema;

pub use entries::{timestamp_now, JournalEntry, NewEntry};

use crate::errors::{AppResult, DatabaseError};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database handle with connection pooling.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens or creates a SQLite database, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - Database file cannot be opened
    /// - Connection pool cannot be initialized
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(4)
            .connection_customizer(Box::new(ConnectionPragmas))
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        // Test the connection
        let conn = pool.get().map_err(DatabaseError::Pool)?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0))
            .map_err(DatabaseError::Sqlite)?;
        drop(conn);

        info!("Database opened successfully");
        Ok(Database { pool })
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::Pool(e).into())
    }

    /// Initializes the database schema.
    ///
    /// Idempotent, safe to call on every startup.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        info!("Database schema initialized");
        Ok(())
    }

    /// Inserts an entry; see [`entries::create_entry`].
    pub fn create_entry(&self, entry: &NewEntry) -> AppResult<i64> {
        let conn = self.get_conn()?;
        entries::create_entry(&conn, entry)
    }

    /// Fetches an entry by id; see [`entries::get_entry`].
    pub fn get_entry(&self, id: i64) -> AppResult<Option<JournalEntry>> {
        let conn = self.get_conn()?;
        entries::get_entry(&conn, id)
    }

    /// Lists all entries newest first; see [`entries::list_entries`].
    pub fn list_entries(&self) -> AppResult<Vec<JournalEntry>> {
        let conn = self.get_conn()?;
        entries::list_entries(&conn)
    }

    /// Substring search; see [`entries::search_entries`].
    pub fn search_entries(&self, term: &str) -> AppResult<Vec<JournalEntry>> {
        let conn = self.get_conn()?;
        entries::search_entries(&conn, term)
    }

    /// Replaces an entry's mutable fields. `false` means nothing changed.
    pub fn update_entry(&self, entry: &JournalEntry) -> bool {
        match self.get_conn() {
            Ok(conn) => entries::update_entry(&conn, entry),
            Err(e) => {
                warn!("Failed to update entry {}: {}", entry.id, e);
                false
            }
        }
    }

    /// Deletes an entry. `false` means nothing was removed.
    pub fn delete_entry(&self, id: i64) -> bool {
        match self.get_conn() {
            Ok(conn) => entries::delete_entry(&conn, id),
            Err(e) => {
                warn!("Failed to delete entry {}: {}", id, e);
                false
            }
        }
    }

    /// Counts stored entries.
    pub fn count_entries(&self) -> AppResult<usize> {
        let conn = self.get_conn()?;
        entries::count_entries(&conn)
    }
}

/// Connection customizer applied to every pooled connection.
#[derive(Debug)]
struct ConnectionPragmas;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
        Ok(())
    }
}
