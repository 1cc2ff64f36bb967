/*!
# aijournal - A Personal AI Journal

This file contains the main application flow: it sets up logging, loads the
configuration, wires the database, chat client and journal service together,
and hands control to the interactive menu.

## Usage

```
aijournal [OPTIONS]

Options:
      --db <PATH>             Path to the journal database (overrides AIJOURNAL_DB)
      --log-format <FORMAT>   Log output format [default: text] [possible values: text, json]
  -v, --verbose               Enable debug logging
  -h, --help                  Print help
  -V, --version               Print version
```

## Configuration

- `AIJOURNAL_API_KEY` or `OPENAI_API_KEY`: API key for the chat service (required)
- `AIJOURNAL_DB`: Database path (defaults to ~/.local/share/aijournal/journal.db)
- `AIJOURNAL_API_BASE`, `AIJOURNAL_MODEL`: Chat endpoint and model
- `AIJOURNAL_TIMEOUT_SECS`, `AIJOURNAL_AI_RETRIES`: Request timeout and retries
- `AIJOURNAL_CONTEXT_CHARS`: Characters of past entries sent with a question
- `RUST_LOG`: Log filter (overrides --verbose)
*/

use aijournal::ai::{ChatClient, InsightClient};
use aijournal::cli::CliArgs;
use aijournal::config::{expand_path, Config};
use aijournal::constants::{DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME};
use aijournal::db::Database;
use aijournal::errors::AppResult;
use aijournal::journal::JournalService;
use aijournal::menu::Menu;
use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber, writing to stderr.
fn init_logging(args: &CliArgs) {
    let default_level = if args.verbose { "debug" } else { DEFAULT_LOG_LEVEL };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr);

    if args.log_format == LOG_FORMAT_JSON {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Loads configuration, builds the services and runs the menu.
fn run(args: &CliArgs) -> AppResult<()> {
    info!("Loading configuration");
    let mut config = Config::load()?;
    if let Some(db) = args.db.as_deref() {
        config.db_path = expand_path(db)?;
    }
    config.validate()?;
    debug!("Configuration: {:?}", config);

    info!("Initializing database");
    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;
    info!("Database ready with {} entries", db.count_entries()?);

    let chat = ChatClient::new(
        &config.api_base,
        &config.api_key,
        &config.model,
        config.timeout,
    )?
    .with_retry(config.retry_policy());
    let journal = JournalService::new(db, InsightClient::new(chat), config.context_chars);

    println!("=== AI Enhanced Journal ===");
    println!("Welcome to your personal AI-powered journal!");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&journal, stdin.lock(), stdout.lock()).run()
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(&args);

    let correlation_id = uuid::Uuid::new_v4();
    let span = info_span!(TRACING_ROOT_SPAN_NAME, correlation_id = %correlation_id);
    let _guard = span.enter();

    info!("Starting aijournal");
    match run(&args) {
        Ok(()) => {
            info!("Exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Fatal error: {}", e);
            eprintln!("Error starting application: {}", e);
            ExitCode::FAILURE
        }
    }
}
