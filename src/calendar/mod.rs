//! Month grid generation and navigation.
//!
//! A month is laid out Sunday-first: blank cells pad the first week up to the
//! weekday of the 1st, followed by one cell per day. Month lengths come from
//! chrono's calendar rather than a table, so leap years need no special case.
//! Grids are rebuilt from a store snapshot every time they are asked for.

use crate::constants::{DATE_FORMAT_LONG, MONTHS_PER_YEAR};
use crate::mood;
use crate::store::{ByteStore, MoodEntry, MoodEntryStore};
use chrono::{Datelike, Month, NaiveDate};
use std::collections::HashMap;
use std::fmt::Write as _;
use tracing::debug;

/// Column headers for a Sunday-first grid.
pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One cell of the month grid.
///
/// `day == 0` marks a leading blank cell, which never carries a date, mood or
/// note.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalendarDate {
    pub day: u32,
    pub full_date: Option<NaiveDate>,
    pub mood: Option<String>,
    pub note: Option<String>,
}

impl CalendarDate {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.day == 0
    }
}

/// A (year, zero-based month) position in the calendar.
///
/// Only months chrono can represent are valid cursors, so every cursor has a
/// first day and navigation stops at either end of that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// Creates a cursor; `month` is zero-based and must be below 12.
    ///
    /// Returns `None` for a year outside chrono's supported range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let cursor = MonthCursor { year, month };
        (month < MONTHS_PER_YEAR && cursor.first_day().is_some()).then_some(cursor)
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        MonthCursor {
            year: date.year(),
            month: date.month0(),
        }
    }

    /// The earliest month chrono can represent.
    pub fn earliest() -> Self {
        Self::containing(NaiveDate::MIN)
    }

    /// The latest month chrono can represent.
    pub fn latest() -> Self {
        Self::containing(NaiveDate::MAX)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month, 0 = January.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month before, wrapping December of the previous year.
    ///
    /// # Examples
    ///
    /// ```
    /// use moodjournal::calendar::MonthCursor;
    ///
    /// let january = MonthCursor::new(2024, 0).unwrap();
    /// assert_eq!(january.previous(), MonthCursor::new(2023, 11).unwrap());
    /// ```
    pub fn previous(self) -> Self {
        self.shift(-1)
    }

    /// The month after, wrapping to January of the next year.
    pub fn next(self) -> Self {
        self.shift(1)
    }

    /// Moves by `months`, which may be negative.
    ///
    /// Stops at the earliest or latest supported month instead of running
    /// past it.
    pub fn shift(self, months: i64) -> Self {
        let index = self.index().saturating_add(months);
        let index = index.clamp(Self::earliest().index(), Self::latest().index());
        let per_year = i64::from(MONTHS_PER_YEAR);
        MonthCursor {
            // Both fit: the index lies within chrono's range.
            year: index.div_euclid(per_year) as i32,
            month: index.rem_euclid(per_year) as u32,
        }
    }

    fn index(&self) -> i64 {
        i64::from(self.year) * i64::from(MONTHS_PER_YEAR) + i64::from(self.month)
    }

    /// The 1st of the month, or `None` outside chrono's supported range.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
    }

    /// Full English month name, e.g. "February".
    pub fn month_name(&self) -> &'static str {
        Month::try_from((self.month + 1) as u8)
            .map(|m| m.name())
            .unwrap_or("")
    }

    /// Month name and year, e.g. "February 2024".
    pub fn label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }
}

/// Number of days in the cursor's month: its last day chrono accepts.
pub fn days_in_month(cursor: MonthCursor) -> u32 {
    (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(cursor.year, cursor.month + 1, day).is_some())
        .unwrap_or(0)
}

/// Lays out the grid for `cursor` and annotates it from `entries`.
///
/// # Examples
///
/// ```
/// use moodjournal::calendar::{generate_month, MonthCursor};
///
/// // February 2024 starts on a Thursday and has 29 days.
/// let grid = generate_month(MonthCursor::new(2024, 1).unwrap(), &[]);
/// assert_eq!(grid.iter().filter(|c| c.is_blank()).count(), 4);
/// assert_eq!(grid.len(), 4 + 29);
/// ```
pub fn generate_month(cursor: MonthCursor, entries: &[MoodEntry]) -> Vec<CalendarDate> {
    let Some(first) = cursor.first_day() else {
        return Vec::new();
    };

    let by_date: HashMap<NaiveDate, &MoodEntry> = entries.iter().map(|e| (e.date, e)).collect();
    let start_day = first.weekday().num_days_from_sunday() as usize;
    let total_days = days_in_month(cursor);

    let mut cells = Vec::with_capacity(start_day + total_days as usize);
    cells.extend(std::iter::repeat_with(CalendarDate::blank).take(start_day));

    for date in (1..=total_days).filter_map(|day| first.with_day(day)) {
        let entry = by_date.get(&date);
        cells.push(CalendarDate {
            day: date.day(),
            full_date: Some(date),
            mood: entry.map(|e| e.mood.clone()),
            note: entry.and_then(|e| e.note.clone()),
        });
    }

    cells
}

/// True for the non-blank cell holding `today`.
pub fn is_today(cell: &CalendarDate, today: NaiveDate) -> bool {
    !cell.is_blank() && cell.full_date == Some(today)
}

/// Formats a date as "Thursday, February 1, 2024".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT_LONG).to_string()
}

/// Renders a grid as plain text, one row per week.
///
/// Each recorded day shows its mood emoji (`*` for a mood outside the
/// catalog) and today is marked with `<`. The recorded moods and notes are
/// listed below the grid.
pub fn render_month(cursor: MonthCursor, cells: &[CalendarDate], today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:^42}", cursor.label());
    for header in WEEKDAY_HEADERS {
        let _ = write!(out, " {:<5}", header);
    }
    out.push('\n');

    for week in cells.chunks(7) {
        for cell in week {
            if cell.is_blank() {
                out.push_str("      ");
                continue;
            }
            // Catalog emojis are two columns wide; pad the fallbacks to match.
            let mood_mark = match cell.mood.as_deref() {
                None => "  ",
                Some(key) if mood::is_known(key) => mood::emoji_of(Some(key)),
                Some(_) => "* ",
            };
            let today_mark = if is_today(cell, today) { '<' } else { ' ' };
            let _ = write!(out, " {:>2}{}{}", cell.day, mood_mark, today_mark);
        }
        out.push('\n');
    }

    let recorded: Vec<&CalendarDate> = cells.iter().filter(|c| c.mood.is_some()).collect();
    if !recorded.is_empty() {
        out.push('\n');
        for cell in recorded {
            let key = cell.mood.as_deref();
            let _ = write!(
                out,
                "{:>3} {} {}",
                cell.day,
                mood::emoji_of(key),
                mood::label_of(key)
            );
            if let Some(note) = &cell.note {
                let _ = write!(out, " — {}", note);
            }
            out.push('\n');
        }
    }

    out
}

/// Produces month grids for a movable month.
#[derive(Debug, Clone)]
pub struct CalendarGenerator {
    cursor: MonthCursor,
}

impl CalendarGenerator {
    /// Starts at the month containing `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self::at(MonthCursor::containing(today))
    }

    pub fn at(cursor: MonthCursor) -> Self {
        CalendarGenerator { cursor }
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn month_name(&self) -> &'static str {
        self.cursor.month_name()
    }

    /// Builds the grid for the current month from a fresh store snapshot.
    pub fn generate<S: ByteStore>(&self, store: &MoodEntryStore<S>) -> Vec<CalendarDate> {
        debug!(
            year = self.cursor.year(),
            month = self.cursor.month(),
            "Generating calendar"
        );
        generate_month(self.cursor, &store.get_all())
    }

    /// Moves back one month and regenerates.
    pub fn previous_month<S: ByteStore>(&mut self, store: &MoodEntryStore<S>) -> Vec<CalendarDate> {
        self.cursor = self.cursor.previous();
        self.generate(store)
    }

    /// Moves forward one month and regenerates.
    pub fn next_month<S: ByteStore>(&mut self, store: &MoodEntryStore<S>) -> Vec<CalendarDate> {
        self.cursor = self.cursor.next();
        self.generate(store)
    }
}
