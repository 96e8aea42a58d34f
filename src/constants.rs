//! Constants used throughout the application.
//!
//! This module contains all constants used in the moodjournal application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "moodjournal";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A tiny daily mood journal with a month calendar and weekly trend";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the data directory.
pub const ENV_VAR_MOODJOURNAL_DIR: &str = "MOODJOURNAL_DIR";
/// Environment variable for choosing the log output format.
pub const ENV_VAR_MOODJOURNAL_LOG_FORMAT: &str = "MOODJOURNAL_LOG_FORMAT";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory for the data files within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".local/share/moodjournal";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Storage Keys
/// Key of the JSON array holding every mood entry.
pub const MOOD_ENTRIES_KEY: &str = "moodEntries";
/// Key of the JSON boolean holding the dark theme preference.
pub const DARK_THEME_KEY: &str = "darkTheme";

// File System Parameters
/// File extension for stored blobs.
pub const STORE_FILE_EXTENSION: &str = "json";
/// File extension for the advisory lock file next to each blob.
pub const LOCK_FILE_EXTENSION: &str = "lock";
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Long, human readable date format ("Thursday, February 1, 2024").
pub const DATE_FORMAT_LONG: &str = "%A, %B %-d, %Y";
/// Short weekday label format ("Mon").
pub const WEEKDAY_FORMAT_SHORT: &str = "%a";
/// Number of months in a year.
pub const MONTHS_PER_YEAR: u32 = 12;
/// Earliest year the calendar command accepts.
pub const MIN_CALENDAR_YEAR: i64 = 1;
/// Latest year the calendar command accepts.
pub const MAX_CALENDAR_YEAR: i64 = 9999;
/// Largest `--prev`/`--next` step, enough to cross the whole accepted range.
pub const MAX_MONTH_STEP: i64 = 120_000;
/// Number of days in the trailing trend window, today included.
pub const TREND_DAYS: i64 = 7;
/// Maximum number of entries shown by the history report.
pub const HISTORY_LIMIT: usize = 10;

// Mood Fallbacks
/// Score used for a mood key that is not in the catalog.
pub const UNKNOWN_MOOD_SCORE: f64 = 3.0;
/// Color used for a mood key that is not in the catalog.
pub const UNKNOWN_MOOD_COLOR: &str = "#bdc3c7";
/// Score used for a day without an entry.
pub const ABSENT_MOOD_SCORE: f64 = 0.0;
/// Color used for a day without an entry.
pub const ABSENT_MOOD_COLOR: &str = "#ecf0f1";

// User-facing Messages
/// Prompt shown before deleting an entry.
pub const DELETE_CONFIRMATION_PROMPT: &str = "Are you sure you want to delete this mood entry?";
/// Header of the history report.
pub const HISTORY_HEADER: &str = "🗓️ Your Mood History:";
/// Message when there is nothing to report.
pub const HISTORY_EMPTY_MESSAGE: &str = "No mood history found 🥺";
/// Message when the backing store is not available.
pub const STORAGE_UNAVAILABLE_MESSAGE: &str = "Local storage not available 🥺";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "moodjournal";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
