//! Journal operations composed from the entry store and the insight client.
//!
//! [`JournalService`] is the single entry point used by the menu. Storage
//! errors on the read and create paths propagate; AI failures never do.
//!
//! # Example
//!
//! ```no_run
//! use aijournal::ai::{ChatClient, InsightClient};
//! use aijournal::db::Database;
//! use aijournal::journal::JournalService;
//! use std::path::Path;
//! use std::time::Duration;
//!
//! let db = Database::open(Path::new("/tmp/journal.db"))?;
//! db.initialize_schema()?;
//! let chat = ChatClient::new("https://api.openai.com/v1", "sk-...", "gpt-4o-mini", Duration::from_secs(30))?;
//! let journal = JournalService::new(db, InsightClient::new(chat), 12_000);
//!
//! let (id, insight) = journal.add_entry("Day One", "Felt good today.", Some("happy"))?;
//! println!("Entry {}: {}", id, insight);
//! println!("{}", journal.get_insight("What lifts my mood?")?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod context;

use crate::ai::prompts::analyze_entry_prompt;
use crate::ai::InsightClient;
use crate::db::{timestamp_now, Database, JournalEntry, NewEntry};
use crate::errors::AppResult;
use context::build_context;
use tracing::{debug, info, warn};

/// Where the insight returned by [`JournalService::entry_insight`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightSource {
    /// Previously stored on the entry.
    Cached,
    /// Freshly generated and saved to the entry.
    Generated,
    /// Freshly generated, but saving it to the entry failed.
    GeneratedUnsaved,
}

/// An entry together with its AI insight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInsight {
    pub entry: JournalEntry,
    pub insight: String,
    pub source: InsightSource,
}

/// High-level journal operations.
pub struct JournalService {
    db: Database,
    insights: InsightClient,
    context_chars: usize,
}

/// Trims optional text, treating blank input as absent.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl JournalService {
    /// Builds the service from its collaborators.
    ///
    /// `context_chars` caps the prior-entry context sent by [`Self::get_insight`].
    pub fn new(db: Database, insights: InsightClient, context_chars: usize) -> Self {
        Self {
            db,
            insights,
            context_chars,
        }
    }

    /// The underlying store.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Creates an entry with an AI insight for its content.
    ///
    /// Returns the new id and the insight stored with it. The entry is
    /// validated before the AI call, so invalid input costs no request. A
    /// failed AI call stores the fallback text instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is invalid or cannot be stored.
    pub fn add_entry(
        &self,
        title: &str,
        content: &str,
        mood: Option<&str>,
    ) -> AppResult<(i64, String)> {
        let mut entry = NewEntry {
            mood: non_blank(mood),
            ..NewEntry::new(title.trim(), content.trim())
        };
        entry.validate()?;

        let insight = self.insights.get_insights(&entry.content, "");
        entry.ai_insights = Some(insight.clone());
        let id = self.db.create_entry(&entry)?;

        info!("Added entry {}", id);
        Ok((id, insight))
    }

    /// All entries, newest first.
    pub fn get_entries(&self) -> AppResult<Vec<JournalEntry>> {
        self.db.list_entries()
    }

    /// The entry with `id`, if any.
    pub fn get_entry_by_id(&self, id: i64) -> AppResult<Option<JournalEntry>> {
        self.db.get_entry(id)
    }

    /// Entries whose title, content or mood contains `term`.
    pub fn search_entries(&self, term: &str) -> AppResult<Vec<JournalEntry>> {
        self.db.search_entries(term)
    }

    /// Answers `question` using the journal's entries as context.
    ///
    /// Context is limited to the configured number of characters, keeping the
    /// newest entries.
    ///
    /// # Errors
    ///
    /// Returns an error only if the entries cannot be read.
    pub fn get_insight(&self, question: &str) -> AppResult<String> {
        let entries = self.db.list_entries()?;
        let context = build_context(&entries, self.context_chars);
        debug!(
            "Answering question with {} entries available",
            entries.len()
        );
        Ok(self.insights.get_insights(question, &context))
    }

    /// Saves an edited entry, stamping `updated_at` with the current time.
    ///
    /// Returns `false` if nothing was saved.
    pub fn update_entry(&self, entry: &mut JournalEntry) -> bool {
        entry.updated_at = Some(timestamp_now());
        self.db.update_entry(entry)
    }

    /// Deletes the entry with `id`. Returns `false` if nothing was removed.
    pub fn delete_entry(&self, id: i64) -> bool {
        let deleted = self.db.delete_entry(id);
        if deleted {
            info!("Deleted entry {}", id);
        }
        deleted
    }

    /// Suggests journal prompts for an optional mood and topic.
    pub fn generate_prompts(&self, mood: Option<&str>, topic: Option<&str>) -> String {
        self.insights.generate_prompts(
            non_blank(mood).as_deref().unwrap_or(""),
            non_blank(topic).as_deref().unwrap_or(""),
        )
    }

    /// Returns the stored insight for an entry, generating and saving one if
    /// the entry has none.
    ///
    /// Returns `Ok(None)` if no entry has `id`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the entry cannot be read.
    pub fn entry_insight(&self, id: i64) -> AppResult<Option<EntryInsight>> {
        let Some(entry) = self.db.get_entry(id)? else {
            return Ok(None);
        };

        if let Some(insight) = entry.ai_insights.clone().filter(|i| !i.trim().is_empty()) {
            debug!("Using stored insight for entry {}", id);
            return Ok(Some(EntryInsight {
                entry,
                insight,
                source: InsightSource::Cached,
            }));
        }

        Ok(Some(self.generate_entry_insight(entry)))
    }

    /// Regenerates and saves the insight for an entry, replacing any stored one.
    ///
    /// Returns `Ok(None)` if no entry has `id`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the entry cannot be read.
    pub fn refresh_insight(&self, id: i64) -> AppResult<Option<EntryInsight>> {
        Ok(self
            .db
            .get_entry(id)?
            .map(|entry| self.generate_entry_insight(entry)))
    }

    fn generate_entry_insight(&self, mut entry: JournalEntry) -> EntryInsight {
        let insight = self.insights.get_insights(&analyze_entry_prompt(&entry.content), "");
        entry.ai_insights = Some(insight.clone());

        let source = if self.update_entry(&mut entry) {
            InsightSource::Generated
        } else {
            warn!("Generated insight for entry {} could not be saved", entry.id);
            InsightSource::GeneratedUnsaved
        };

        EntryInsight {
            entry,
            insight,
            source,
        }
    }
}
