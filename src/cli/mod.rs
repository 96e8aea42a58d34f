use crate::constants::{
    DATE_FORMAT_COMPACT, DATE_FORMAT_ISO, MAX_CALENDAR_YEAR, MAX_MONTH_STEP, MIN_CALENDAR_YEAR,
    REDACTED_PLACEHOLDER,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::fmt;

/// A tiny daily mood journal with a month calendar and weekly trend
#[derive(Parser, Debug)]
#[command(name = "moodjournal", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format (text or json); overrides MOODJOURNAL_LOG_FORMAT
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands. `Debug` output never contains note text.
#[derive(Subcommand, PartialEq)]
pub enum Command {
    /// Records a mood, replacing any entry for that day
    Log {
        /// Mood key (see `moodjournal moods`)
        mood: String,

        /// Optional note for the day
        #[arg(short = 'n', long)]
        note: Option<String>,

        /// Day to record (format: YYYY-MM-DD or YYYYMMDD); defaults to today
        #[arg(short = 'd', long)]
        date: Option<String>,
    },

    /// Deletes the entry for a day
    Delete {
        /// Day to delete (format: YYYY-MM-DD or YYYYMMDD)
        #[arg(short = 'd', long)]
        date: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Shows the entry for a day
    Show {
        /// Day to show (format: YYYY-MM-DD or YYYYMMDD); defaults to today
        #[arg(short = 'd', long)]
        date: Option<String>,
    },

    /// Prints a month calendar
    Calendar(CalendarArgs),

    /// Prints the mood trend of the last seven days
    Trend,

    /// Prints the ten most recent entries
    History,

    /// Lists the available moods
    Moods,

    /// Shows or toggles the stored dark theme preference
    Theme {
        /// Flip the stored preference
        #[arg(long)]
        toggle: bool,
    },
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Log { mood, note, date } => f
                .debug_struct("Log")
                .field("mood", mood)
                .field("note", &note.as_ref().map(|_| REDACTED_PLACEHOLDER))
                .field("date", date)
                .finish(),
            Command::Delete { date, yes } => f
                .debug_struct("Delete")
                .field("date", date)
                .field("yes", yes)
                .finish(),
            Command::Show { date } => f.debug_struct("Show").field("date", date).finish(),
            Command::Calendar(args) => f.debug_tuple("Calendar").field(args).finish(),
            Command::Trend => f.write_str("Trend"),
            Command::History => f.write_str("History"),
            Command::Moods => f.write_str("Moods"),
            Command::Theme { toggle } => f.debug_struct("Theme").field("toggle", toggle).finish(),
        }
    }
}

#[derive(Args, Debug, PartialEq)]
pub struct CalendarArgs {
    /// Year to show, 1-9999; defaults to the current year
    #[arg(
        long,
        requires = "month",
        value_parser = clap::value_parser!(i32).range(MIN_CALENDAR_YEAR..=MAX_CALENDAR_YEAR)
    )]
    pub year: Option<i32>,

    /// Month to show, 1-12; defaults to the current month
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Step back this many months from the shown month
    #[arg(
        long,
        conflicts_with = "next",
        value_parser = clap::value_parser!(u32).range(0..=MAX_MONTH_STEP)
    )]
    pub prev: Option<u32>,

    /// Step forward this many months from the shown month
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=MAX_MONTH_STEP))]
    pub next: Option<u32>,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        <CliArgs as Parser>::parse()
    }
}

/// Parses a date in YYYY-MM-DD or YYYYMMDD format.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, DATE_FORMAT_ISO)
        .or_else(|_| NaiveDate::parse_from_str(date_str, DATE_FORMAT_COMPACT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_log_command() {
        let args = CliArgs::parse_from(["moodjournal", "log", "happy"]);
        assert_eq!(
            args.command,
            Command::Log {
                mood: "happy".to_string(),
                note: None,
                date: None
            }
        );
        assert!(!args.verbose);

        let args = CliArgs::parse_from([
            "moodjournal",
            "log",
            "sad",
            "-n",
            "rainy",
            "--date",
            "2024-03-01",
        ]);
        assert_eq!(
            args.command,
            Command::Log {
                mood: "sad".to_string(),
                note: Some("rainy".to_string()),
                date: Some("2024-03-01".to_string())
            }
        );
    }

    #[test]
    fn test_debug_output_redacts_note() {
        let args = CliArgs::parse_from([
            "moodjournal",
            "--verbose",
            "log",
            "sad",
            "--note",
            "nobody should read this",
        ]);

        let debug_output = format!("{:?}", args);
        assert!(debug_output.contains("\"sad\""));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("nobody should read this"));

        let args = CliArgs::parse_from(["moodjournal", "log", "sad"]);
        assert!(format!("{:?}", args).contains("note: None"));
    }

    #[test]
    fn test_log_requires_mood() {
        assert!(CliArgs::try_parse_from(["moodjournal", "log"]).is_err());
    }

    #[test]
    fn test_delete_requires_date() {
        assert!(CliArgs::try_parse_from(["moodjournal", "delete"]).is_err());

        let args = CliArgs::parse_from(["moodjournal", "delete", "-d", "20240301", "-y"]);
        assert_eq!(
            args.command,
            Command::Delete {
                date: "20240301".to_string(),
                yes: true
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(["moodjournal", "trend", "--verbose", "--log-format", "json"]);
        assert!(args.verbose);
        assert_eq!(args.log_format.as_deref(), Some("json"));
        assert_eq!(args.command, Command::Trend);
    }

    #[test]
    fn test_calendar_args() {
        let args = CliArgs::parse_from(["moodjournal", "calendar", "--year", "2024", "--month", "2"]);
        match args.command {
            Command::Calendar(cal) => {
                assert_eq!(cal.year, Some(2024));
                assert_eq!(cal.month, Some(2));
            }
            other => panic!("Expected calendar command, got {:?}", other),
        }

        assert!(CliArgs::try_parse_from(["moodjournal", "calendar", "--month", "13"]).is_err());
        assert!(CliArgs::try_parse_from(["moodjournal", "calendar", "--year", "2024"]).is_err());
        assert!(
            CliArgs::try_parse_from(["moodjournal", "calendar", "--prev", "1", "--next", "1"])
                .is_err()
        );
    }

    #[test]
    fn test_calendar_args_are_bounded() {
        for args in [
            ["moodjournal", "calendar", "--year", "200000000", "--month", "1"],
            ["moodjournal", "calendar", "--year", "0", "--month", "1"],
            ["moodjournal", "calendar", "--year", "10000", "--month", "1"],
        ] {
            assert!(CliArgs::try_parse_from(args).is_err());
        }

        assert!(CliArgs::try_parse_from(["moodjournal", "calendar", "--prev", "4294967295"]).is_err());
        assert!(CliArgs::try_parse_from(["moodjournal", "calendar", "--next", "120001"]).is_err());

        let args = CliArgs::parse_from(["moodjournal", "calendar", "--prev", "120000"]);
        match args.command {
            Command::Calendar(cal) => assert_eq!(cal.prev, Some(120_000)),
            other => panic!("Expected calendar command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_date() {
        let parsed = parse_date("2023-01-15").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2023, 1, 15));

        let parsed = parse_date("20230115").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2023, 1, 15));

        assert!(parse_date("invalid-date").is_err());
        assert!(parse_date("2023-02-30").is_err());
    }
}
