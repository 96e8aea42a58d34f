//! Recent mood history as text.

use crate::constants::{
    HISTORY_EMPTY_MESSAGE, HISTORY_HEADER, HISTORY_LIMIT, STORAGE_UNAVAILABLE_MESSAGE,
};
use crate::mood;
use crate::store::{ByteStore, MoodEntry, MoodEntryStore};
use std::fmt;
use std::fmt::Write as _;

/// What the history report has to say.
///
/// `Unavailable` and `Empty` are informational states, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryReport {
    /// There is no backing store.
    Unavailable,
    /// The store holds no entries.
    Empty,
    /// The rendered report.
    Entries(String),
}

impl fmt::Display for HistoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryReport::Unavailable => f.write_str(STORAGE_UNAVAILABLE_MESSAGE),
            HistoryReport::Empty => f.write_str(HISTORY_EMPTY_MESSAGE),
            HistoryReport::Entries(text) => f.write_str(text),
        }
    }
}

/// Reports the most recent entries in the store.
pub fn render_history<S: ByteStore>(store: &MoodEntryStore<S>) -> HistoryReport {
    match store.try_get_all() {
        Err(_) => HistoryReport::Unavailable,
        Ok(entries) => render_entries(entries),
    }
}

/// Sorts newest first and renders up to ten entries.
///
/// The sort is stable, so entries sharing a date keep their stored order.
pub fn render_entries(mut entries: Vec<MoodEntry>) -> HistoryReport {
    if entries.is_empty() {
        return HistoryReport::Empty;
    }

    entries.sort_by(|a, b| b.date.cmp(&a.date));

    let mut message = format!("{}\n\n", HISTORY_HEADER);
    for entry in entries.iter().take(HISTORY_LIMIT) {
        let key = Some(entry.mood.as_str());
        let _ = writeln!(
            message,
            "📅 {} — {} {}",
            entry.date,
            mood::emoji_of(key),
            mood::label_of(key)
        );
        if let Some(note) = &entry.note {
            let _ = writeln!(message, "   💭 {}", note);
        }
        message.push('\n');
    }

    HistoryReport::Entries(message)
}
