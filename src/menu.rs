//! Interactive text menu over the journal.
//!
//! The menu reads from any `BufRead` and writes to any `Write`, so it can be
//! driven by a terminal or by a script. Storage errors from an action are shown
//! to the operator and the loop continues; end of input exits cleanly.

use crate::constants::{DISPLAY_DATE_FORMAT, PREVIEW_CHARS};
use crate::db::JournalEntry;
use crate::errors::{AppError, AppResult};
use crate::journal::{EntryInsight, InsightSource, JournalService};
use chrono::Local;
use std::io::{BufRead, Write};
use tracing::{debug, error};

const MENU: &str = "\n--- Main Menu ---
1. Create new journal entry
2. View all entries
3. Search entries
4. Get AI insights for an entry
5. Generate journal prompts
6. Ask a question about your journal
7. Delete an entry
8. Exit";

const SEPARATOR_WIDTH: usize = 50;

/// Reads one line without its terminator. `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> AppResult<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> AppResult<String> {
    write!(output, "{}", label)?;
    output.flush()?;
    Ok(read_line(input)?.unwrap_or_default())
}

fn optional(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

fn format_date(entry: &JournalEntry) -> String {
    entry
        .created_at
        .with_timezone(&Local)
        .format(DISPLAY_DATE_FORMAT)
        .to_string()
}

/// Drives the journal menu until the operator exits or input ends.
pub struct Menu<'a, R, W> {
    journal: &'a JournalService,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(journal: &'a JournalService, input: R, output: W) -> Self {
        Self {
            journal,
            input,
            output,
        }
    }

    /// Runs the menu loop.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> AppResult<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            write!(self.output, "Choose an option (1-8): ")?;
            self.output.flush()?;

            let Some(choice) = read_line(&mut self.input)? else {
                writeln!(self.output)?;
                return Ok(());
            };
            debug!("Menu choice: {:?}", choice);

            let result = match choice.trim() {
                "1" => self.create_entry(),
                "2" => self.view_entries(),
                "3" => self.search_entries(),
                "4" => self.entry_insight(),
                "5" => self.generate_prompts(),
                "6" => self.ask_question(),
                "7" => self.delete_entry(),
                "8" => {
                    writeln!(
                        self.output,
                        "Thank you for using AI Enhanced Journal. Goodbye!"
                    )?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Invalid option. Please try again.")?;
                    Ok(())
                }
            };

            match result {
                Err(AppError::Io(e)) => return Err(AppError::Io(e)),
                Err(e) => {
                    error!("Menu action failed: {}", e);
                    writeln!(self.output, "Error: {}", e)?;
                }
                Ok(()) => {}
            }
        }
    }

    fn read_entry_id(&mut self, label: &str) -> AppResult<Option<i64>> {
        let raw = prompt(&mut self.input, &mut self.output, label)?;
        match raw.trim().parse::<i64>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.output, "Invalid entry ID.")?;
                Ok(None)
            }
        }
    }

    fn write_entry_summary(&mut self, entry: &JournalEntry) -> AppResult<()> {
        writeln!(self.output, "\n[{}] {}", entry.id, entry.title)?;
        writeln!(self.output, "Date: {}", format_date(entry))?;
        if let Some(mood) = entry.mood.as_deref().filter(|m| !m.is_empty()) {
            writeln!(self.output, "Mood: {}", mood)?;
        }
        writeln!(self.output, "Content: {}", preview(&entry.content))?;
        Ok(())
    }

    fn create_entry(&mut self) -> AppResult<()> {
        writeln!(self.output, "\n--- Create New Journal Entry ---")?;
        let title = prompt(&mut self.input, &mut self.output, "Enter title: ")?;
        let mood = prompt(
            &mut self.input,
            &mut self.output,
            "Enter your mood (optional): ",
        )?;

        writeln!(
            self.output,
            "Enter your journal content (press Enter twice to finish):"
        )?;
        let mut lines = Vec::new();
        let mut empty_run = 0;
        while empty_run < 2 {
            let Some(line) = read_line(&mut self.input)? else {
                break;
            };
            empty_run = if line.is_empty() { empty_run + 1 } else { 0 };
            lines.push(line);
        }
        let content = lines.join("\n");

        writeln!(self.output, "Generating AI insights...")?;
        let (id, insight) = self
            .journal
            .add_entry(&title, &content, optional(&mood))?;

        writeln!(self.output, "\nEntry created successfully with ID: {}", id)?;
        writeln!(self.output, "\nAI Insights:\n{}", insight)?;
        Ok(())
    }

    fn view_entries(&mut self) -> AppResult<()> {
        writeln!(self.output, "\n--- All Journal Entries ---")?;
        let entries = self.journal.get_entries()?;

        if entries.is_empty() {
            writeln!(self.output, "No entries found.")?;
            return Ok(());
        }

        for entry in &entries {
            self.write_entry_summary(entry)?;
            writeln!(self.output, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        }
        Ok(())
    }

    fn search_entries(&mut self) -> AppResult<()> {
        let term = prompt(&mut self.input, &mut self.output, "\nEnter search term: ")?;
        let entries = self.journal.search_entries(&term)?;

        if entries.is_empty() {
            writeln!(self.output, "No entries found matching your search.")?;
            return Ok(());
        }

        writeln!(self.output, "\nFound {} entries:", entries.len())?;
        for entry in &entries {
            self.write_entry_summary(entry)?;
        }
        Ok(())
    }

    fn entry_insight(&mut self) -> AppResult<()> {
        let Some(id) = self.read_entry_id("\nEnter entry ID to get insights for: ")? else {
            return Ok(());
        };

        writeln!(self.output, "Looking up entry {}...", id)?;
        let Some(result) = self.journal.entry_insight(id)? else {
            writeln!(self.output, "Entry not found.")?;
            return Ok(());
        };

        writeln!(self.output, "\nEntry: {}", result.entry.title)?;
        writeln!(self.output, "Content: {}", result.entry.content)?;
        self.write_insight(&result)?;

        if result.source != InsightSource::Cached {
            return Ok(());
        }
        let answer = prompt(&mut self.input, &mut self.output, "\nRegenerate? (y/N): ")?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            return Ok(());
        }

        writeln!(self.output, "Generating AI insights...")?;
        let Some(refreshed) = self.journal.refresh_insight(id)? else {
            writeln!(self.output, "Entry not found.")?;
            return Ok(());
        };
        self.write_insight(&refreshed)
    }

    fn write_insight(&mut self, result: &EntryInsight) -> AppResult<()> {
        match result.source {
            InsightSource::Cached => writeln!(self.output, "\nExisting AI Insights:")?,
            InsightSource::Generated => writeln!(self.output, "\nAI Insights:")?,
            InsightSource::GeneratedUnsaved => {
                writeln!(self.output, "\nAI Insights (could not be saved):")?
            }
        }
        writeln!(self.output, "{}", result.insight)?;
        Ok(())
    }

    fn generate_prompts(&mut self) -> AppResult<()> {
        let mood = prompt(
            &mut self.input,
            &mut self.output,
            "\nEnter your current mood (optional): ",
        )?;
        let topic = prompt(
            &mut self.input,
            &mut self.output,
            "Enter a topic you'd like to explore (optional): ",
        )?;

        writeln!(self.output, "\nGenerating journal prompts...")?;
        let prompts = self
            .journal
            .generate_prompts(optional(&mood), optional(&topic));

        writeln!(self.output, "\nHere are some journal prompts for you:")?;
        writeln!(self.output, "{}", prompts)?;
        Ok(())
    }

    fn ask_question(&mut self) -> AppResult<()> {
        let question = prompt(&mut self.input, &mut self.output, "\nWhat would you like to know? ")?;
        if question.trim().is_empty() {
            writeln!(self.output, "No question entered.")?;
            return Ok(());
        }

        writeln!(self.output, "\nThinking about your entries...")?;
        let answer = self.journal.get_insight(question.trim())?;
        writeln!(self.output, "\n{}", answer)?;
        Ok(())
    }

    fn delete_entry(&mut self) -> AppResult<()> {
        let Some(id) = self.read_entry_id("\nEnter entry ID to delete: ")? else {
            return Ok(());
        };

        if self.journal.delete_entry(id) {
            writeln!(self.output, "Entry {} deleted.", id)?;
        } else {
            writeln!(self.output, "Entry not found.")?;
        }
        Ok(())
    }
}
