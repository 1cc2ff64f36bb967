//! Command-line interface for the aijournal application.
//!
//! Flags only adjust startup; all journaling happens in the interactive menu.

use crate::constants::{APP_DESCRIPTION, APP_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use clap::Parser;

/// A personal journal with AI-generated insights and prompts
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION)]
#[command(author, version, long_about = None)]
pub struct CliArgs {
    /// Path to the journal database (overrides AIJOURNAL_DB)
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Log output format
    #[arg(long, value_name = "FORMAT", default_value = LOG_FORMAT_TEXT, value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON])]
    pub log_format: String,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
