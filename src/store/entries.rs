//! Date-indexed mood entries.
//!
//! The whole entry set is one JSON array under a single storage key. Every
//! mutation is a read-modify-write of that array, done through
//! `ByteStore::update` so the backend can hold its lock across it. Within a
//! process mutations take `&mut self` and are serialized by the borrow checker.

use crate::constants::{DELETE_CONFIRMATION_PROMPT, MOOD_ENTRIES_KEY};
use crate::errors::StorageError;
use crate::store::ByteStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// One day's mood.
///
/// Serialized as `{"date":"2024-03-01","mood":"happy","note":"..."}` with the
/// note omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub mood: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MoodEntry {
    /// Builds an entry with the note normalized: trimmed, and `None` when blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use moodjournal::store::MoodEntry;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    /// let entry = MoodEntry::new(date, "happy", Some("   "));
    /// assert!(entry.note.is_none());
    ///
    /// let entry = MoodEntry::new(date, "happy", Some("  walked the dog "));
    /// assert_eq!(entry.note.as_deref(), Some("walked the dog"));
    /// ```
    pub fn new(date: NaiveDate, mood: impl Into<String>, note: Option<&str>) -> Self {
        MoodEntry {
            date,
            mood: mood.into(),
            note: normalize_note(note),
        }
    }
}

fn normalize_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

/// Why a mutation did not touch the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The backing store does not exist.
    StorageUnavailable,
    /// The backing store exists but could not be read or written.
    StorageFailed,
    /// An upsert was given no mood.
    MissingMood,
    /// The user answered "no" to the delete confirmation.
    Declined,
}

/// Result of a store mutation.
///
/// None of these are errors; callers refresh their views either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The entry was written.
    Saved,
    /// The entry was removed.
    Deleted,
    /// There was no entry for the date; nothing was written.
    NotFound,
    /// Nothing was changed.
    Skipped(SkipReason),
}

/// A yes/no question put to the user before a destructive operation.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Owner of the canonical set of mood entries.
///
/// At most one entry exists per date. Reads always go to the backing store,
/// so a successful mutation is visible to the very next read.
///
/// # Examples
///
/// ```
/// use moodjournal::store::{MemoryStore, MoodEntry, MoodEntryStore, MutationOutcome};
/// use chrono::NaiveDate;
///
/// let mut store = MoodEntryStore::new(MemoryStore::new());
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
///
/// assert_eq!(store.upsert(MoodEntry::new(date, "happy", None)), MutationOutcome::Saved);
/// assert_eq!(store.upsert(MoodEntry::new(date, "sad", None)), MutationOutcome::Saved);
///
/// let all = store.get_all();
/// assert_eq!(all.len(), 1);
/// assert_eq!(all[0].mood, "sad");
/// ```
#[derive(Debug)]
pub struct MoodEntryStore<S> {
    backend: S,
}

impl<S: ByteStore> MoodEntryStore<S> {
    pub fn new(backend: S) -> Self {
        MoodEntryStore { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// Returns every entry, in stored order.
    ///
    /// Missing, unreadable or malformed data all read as an empty journal.
    pub fn get_all(&self) -> Vec<MoodEntry> {
        self.try_get_all().unwrap_or_default()
    }

    /// Like `get_all`, but reports an unavailable store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` when there is no backing store.
    /// Every other storage problem still reads as an empty journal.
    pub fn try_get_all(&self) -> Result<Vec<MoodEntry>, StorageError> {
        match self.read_entries() {
            Ok(entries) => Ok(entries),
            Err(StorageError::Unavailable) => Err(StorageError::Unavailable),
            Err(e) => {
                warn!(error = %e, "Failed to read mood entries, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Returns the entry recorded for `date`, if any.
    pub fn find_by_date(&self, date: NaiveDate) -> Option<MoodEntry> {
        self.get_all().into_iter().find(|e| e.date == date)
    }

    /// Inserts the entry, replacing any existing entry for the same date.
    pub fn upsert(&mut self, entry: MoodEntry) -> MutationOutcome {
        let mood = entry.mood.trim();
        if mood.is_empty() {
            debug!(date = %entry.date, "Ignoring upsert without a mood");
            return MutationOutcome::Skipped(SkipReason::MissingMood);
        }
        let entry = MoodEntry {
            date: entry.date,
            mood: mood.to_string(),
            note: normalize_note(entry.note.as_deref()),
        };

        let date = entry.date;
        let result = self.modify(|entries| {
            match entries.iter().position(|e| e.date == date) {
                Some(index) => entries[index] = entry.clone(),
                None => entries.push(entry.clone()),
            }
            true
        });

        match result {
            Ok(_) => {
                info!(date = %date, "Saved mood entry");
                MutationOutcome::Saved
            }
            Err(e) => skipped_by(&e),
        }
    }

    /// Removes the entry for `date`. Deleting a date with no entry is a no-op.
    pub fn delete(&mut self, date: NaiveDate) -> MutationOutcome {
        let result = self.modify(|entries| {
            let before = entries.len();
            entries.retain(|e| e.date != date);
            entries.len() != before
        });

        match result {
            Ok(true) => {
                info!(date = %date, "Deleted mood entry");
                MutationOutcome::Deleted
            }
            Ok(false) => {
                debug!(date = %date, "No mood entry to delete");
                MutationOutcome::NotFound
            }
            Err(e) => skipped_by(&e),
        }
    }

    /// Removes the entry for `date` after the user confirms.
    ///
    /// The user is only asked when there is an entry to remove.
    pub fn delete_confirmed<C: Confirm + ?Sized>(
        &mut self,
        date: NaiveDate,
        confirm: &mut C,
    ) -> MutationOutcome {
        if self.find_by_date(date).is_none() {
            return MutationOutcome::NotFound;
        }
        if !confirm.confirm(DELETE_CONFIRMATION_PROMPT) {
            debug!(date = %date, "Delete declined");
            return MutationOutcome::Skipped(SkipReason::Declined);
        }
        self.delete(date)
    }

    fn read_entries(&self) -> Result<Vec<MoodEntry>, StorageError> {
        let raw = self.backend.get(MOOD_ENTRIES_KEY)?;
        Ok(decode_entries(raw.as_deref()))
    }

    /// Runs `change` over the current entries under the backend's lock and
    /// writes them back when it returns true.
    fn modify<F>(&mut self, mut change: F) -> Result<bool, StorageError>
    where
        F: FnMut(&mut Vec<MoodEntry>) -> bool,
    {
        self.backend.update(MOOD_ENTRIES_KEY, &mut |raw| {
            let mut entries = decode_entries(raw.as_deref());
            if !change(&mut entries) {
                return Ok(None);
            }
            serde_json::to_string(&entries)
                .map(Some)
                .map_err(|source| StorageError::Encode {
                    key: MOOD_ENTRIES_KEY.to_string(),
                    source,
                })
        })
    }
}

/// Missing data is an empty journal, and so is malformed data, with a warning.
fn decode_entries(raw: Option<&str>) -> Vec<MoodEntry> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    serde_json::from_str(raw).unwrap_or_else(|source| {
        let e = StorageError::Malformed {
            key: MOOD_ENTRIES_KEY.to_string(),
            source,
        };
        warn!(error = %e, "Discarding malformed mood entries");
        Vec::new()
    })
}

fn skipped_by(error: &StorageError) -> MutationOutcome {
    match error {
        StorageError::Unavailable => {
            debug!("Storage unavailable, mutation skipped");
            MutationOutcome::Skipped(SkipReason::StorageUnavailable)
        }
        other => {
            warn!(error = %other, "Storage failure, mutation skipped");
            MutationOutcome::Skipped(SkipReason::StorageFailed)
        }
    }
}
