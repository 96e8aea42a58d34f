//! The mood journal as a whole.
//!
//! `MoodJournal` owns the entry store and the calendar position. It caches no
//! derived state: the calendar grid and the weekly trend are recomputed from
//! the store on every call, so they are current after any mutation.

use crate::calendar::{CalendarDate, CalendarGenerator, MonthCursor};
use crate::history::{self, HistoryReport};
use crate::store::{theme, ByteStore, Confirm, MoodEntry, MoodEntryStore, MutationOutcome};
use crate::trend::{self, WeeklyDataPoint};
use chrono::NaiveDate;
use tracing::warn;

/// A mood journal over a byte store, anchored at a fixed "today".
///
/// # Examples
///
/// ```
/// use moodjournal::journal::MoodJournal;
/// use moodjournal::store::MemoryStore;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let mut journal = MoodJournal::new(MemoryStore::new(), today);
///
/// journal.record_today("happy", Some("first entry"));
///
/// assert_eq!(journal.weekly_trend()[6].score, 4.0);
/// assert!(journal.calendar().iter().any(|c| c.mood.as_deref() == Some("happy")));
/// ```
#[derive(Debug)]
pub struct MoodJournal<S> {
    store: MoodEntryStore<S>,
    calendar: CalendarGenerator,
    today: NaiveDate,
}

impl<S: ByteStore> MoodJournal<S> {
    /// Opens the journal with the calendar on the month containing `today`.
    pub fn new(backend: S, today: NaiveDate) -> Self {
        MoodJournal {
            store: MoodEntryStore::new(backend),
            calendar: CalendarGenerator::new(today),
            today,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn store(&self) -> &MoodEntryStore<S> {
        &self.store
    }

    pub fn cursor(&self) -> MonthCursor {
        self.calendar.cursor()
    }

    pub fn month_name(&self) -> &'static str {
        self.calendar.month_name()
    }

    /// Records a mood for today.
    pub fn record_today(&mut self, mood: &str, note: Option<&str>) -> MutationOutcome {
        self.set_mood_for(self.today, mood, note)
    }

    /// Records (or replaces) the mood for `date`.
    pub fn set_mood_for(
        &mut self,
        date: NaiveDate,
        mood: &str,
        note: Option<&str>,
    ) -> MutationOutcome {
        self.store.upsert(MoodEntry::new(date, mood, note))
    }

    /// Deletes the entry for `date` once `confirm` agrees.
    pub fn delete_for<C: Confirm + ?Sized>(
        &mut self,
        date: NaiveDate,
        confirm: &mut C,
    ) -> MutationOutcome {
        self.store.delete_confirmed(date, confirm)
    }

    pub fn entry_for(&self, date: NaiveDate) -> Option<MoodEntry> {
        self.store.find_by_date(date)
    }

    /// Grid for the month currently shown.
    pub fn calendar(&self) -> Vec<CalendarDate> {
        self.calendar.generate(&self.store)
    }

    /// Jumps to the month at `cursor`.
    pub fn show_month(&mut self, cursor: MonthCursor) -> Vec<CalendarDate> {
        self.calendar = CalendarGenerator::at(cursor);
        self.calendar()
    }

    pub fn previous_month(&mut self) -> Vec<CalendarDate> {
        self.calendar.previous_month(&self.store)
    }

    pub fn next_month(&mut self) -> Vec<CalendarDate> {
        self.calendar.next_month(&self.store)
    }

    /// The seven days ending today.
    pub fn weekly_trend(&self) -> Vec<WeeklyDataPoint> {
        trend::weekly_trend_from(&self.store, self.today)
    }

    pub fn history(&self) -> HistoryReport {
        history::render_history(&self.store)
    }

    pub fn dark_theme(&self) -> bool {
        theme::load(self.store.backend())
    }

    /// Flips the theme flag and returns the new value.
    ///
    /// When the flag cannot be stored the flipped value is still returned; it
    /// just won't survive the process.
    pub fn toggle_theme(&mut self) -> bool {
        match theme::toggle(self.store.backend_mut()) {
            Ok(dark) => dark,
            Err(e) => {
                warn!(error = %e, "Theme preference not saved");
                !self.dark_theme()
            }
        }
    }
}
