/*!
# aijournal

aijournal is a personal journal for the terminal. Entries are stored in a local
SQLite database, and an OpenAI-compatible chat API supplies insights on what you
write and suggests prompts when you don't know where to start.

## Core Features

- Create entries with an optional mood; each gets an AI insight on save
- List and search entries by title, content or mood
- Ask questions answered from your recent entries
- Generate reflective journal prompts for a mood or topic

## Architecture

- `db`: Entry store (SQLite via r2d2/rusqlite)
- `ai`: Chat completion client and the fallback-on-failure insight client
- `journal`: Operations composing the store and the insight client
- `menu`: Interactive text menu
- `cli`: Command-line flags
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure

AI failures never abort an operation: they are logged and replaced with a
fixed fallback text.

## Usage Example

```rust,no_run
use aijournal::ai::{ChatClient, InsightClient};
use aijournal::db::Database;
use aijournal::journal::JournalService;
use aijournal::Config;

fn main() -> aijournal::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;
    let chat = ChatClient::new(&config.api_base, &config.api_key, &config.model, config.timeout)?
        .with_retry(config.retry_policy());
    let journal = JournalService::new(db, InsightClient::new(chat), config.context_chars);

    for entry in journal.search_entries("grateful")? {
        println!("[{}] {}", entry.id, entry.title);
    }
    Ok(())
}
```
*/

/// Chat completion client, prompts and insight generation
pub mod ai;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Entry storage
pub mod db;
/// Error types and utilities for error handling
pub mod errors;
/// Journal operations
pub mod journal;
/// Interactive menu
pub mod menu;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use journal::JournalService;
