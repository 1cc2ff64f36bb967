//! Assembling prior-entry context for questions about the journal.

use crate::db::JournalEntry;
use tracing::debug;

/// Joins entry contents with newlines, newest first, within `budget` characters.
///
/// Whole entries are added in the order given while they fit, separators
/// included. If the first entry alone is over budget, its content is cut at the
/// budget. Older entries are dropped once one does not fit, so the context is
/// always a contiguous run of the most recent writing.
pub fn build_context(entries: &[JournalEntry], budget: usize) -> String {
    let mut context = String::new();
    let mut used = 0;

    for (included, entry) in entries.iter().enumerate() {
        let separator = usize::from(included > 0);
        let len = entry.content.chars().count();

        if used + separator + len <= budget {
            if separator == 1 {
                context.push('\n');
            }
            context.push_str(&entry.content);
            used += separator + len;
            continue;
        }

        if included == 0 {
            context.extend(entry.content.chars().take(budget));
            used = budget;
        }

        debug!(
            "Context budget of {} chars reached after {} of {} entries",
            budget,
            included.max(1),
            entries.len()
        );
        break;
    }

    debug!("Built {} chars of context", used);
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::NewEntry;

    fn entries(contents: &[&str]) -> Vec<JournalEntry> {
        contents
            .iter()
            .enumerate()
            .map(|(i, content)| NewEntry::new("t", *content).with_id(i as i64 + 1))
            .collect()
    }

    #[test]
    fn test_everything_fits() {
        let entries = entries(&["newest", "middle", "oldest"]);
        assert_eq!(build_context(&entries, 1000), "newest\nmiddle\noldest");
    }

    #[test]
    fn test_exact_budget_includes_separators() {
        let entries = entries(&["abc", "def"]);
        assert_eq!(build_context(&entries, 7), "abc\ndef");
        assert_eq!(build_context(&entries, 6), "abc");
    }

    #[test]
    fn test_stops_at_first_entry_that_does_not_fit() {
        let entries = entries(&["short", "this one is far too long", "tiny"]);
        assert_eq!(build_context(&entries, 12), "short");
    }

    #[test]
    fn test_truncates_oversized_newest_entry() {
        let entries = entries(&["ééééééé", "older"]);
        let context = build_context(&entries, 3);
        assert_eq!(context, "ééé");
        assert_eq!(context.chars().count(), 3);
    }

    #[test]
    fn test_zero_budget_and_no_entries() {
        assert_eq!(build_context(&entries(&["anything"]), 0), "");
        assert_eq!(build_context(&[], 100), "");
    }
}
