/*!
# moodjournal

moodjournal is a tiny personal mood journal: one mood, and an optional note, per
calendar day. Entries can be browsed as a month calendar and summarized as a
seven-day trend.

## Core Features

- Record, replace and delete the mood for any day (one entry per day)
- Month calendar grids with leading blank cells and per-day moods
- A trailing-week trend of wellbeing scores
- A history report of the ten most recent entries
- A persisted dark theme preference

## Architecture

- `mood`: The fixed mood catalog and its fallbacks
- `store`: The injectable byte store and the date-indexed entry store
- `calendar`: Month grid generation and navigation
- `trend`: The seven-day trend
- `history`: The recent history report
- `journal`: A facade recomputing every view from the store on demand
- `cli`, `config`, `errors`, `constants`: The application shell

## Usage Example

```rust
use moodjournal::journal::MoodJournal;
use moodjournal::store::MemoryStore;
use chrono::NaiveDate;

let today = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
let mut journal = MoodJournal::new(MemoryStore::new(), today);

journal.record_today("grateful", Some("flowers"));

let grid = journal.calendar();
assert_eq!(grid.iter().filter(|c| !c.is_blank()).count(), 29);
assert_eq!(journal.weekly_trend().len(), 7);
println!("{}", journal.history());
```
*/

/// Month grid generation and navigation
pub mod calendar;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
/// Recent history report
pub mod history;
/// The journal facade
pub mod journal;
/// The mood catalog
pub mod mood;
/// Byte stores and the mood entry store
pub mod store;
/// Seven-day trend
pub mod trend;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use journal::MoodJournal;
