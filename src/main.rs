/*!
# moodjournal - A Tiny Daily Mood Journal

This file contains the main application flow, wiring configuration, logging and
storage to the journal engine and printing its views.

## Usage

```
moodjournal [OPTIONS] <COMMAND>

Commands:
  log       Records a mood, replacing any entry for that day
  delete    Deletes the entry for a day
  show      Shows the entry for a day
  calendar  Prints a month calendar
  trend     Prints the mood trend of the last seven days
  history   Prints the ten most recent entries
  moods     Lists the available moods
  theme     Shows or toggles the stored dark theme preference

Options:
  -v, --verbose              Print verbose output
      --log-format <FORMAT>  Log output format (text or json)
```

## Configuration

- `MOODJOURNAL_DIR`: The directory holding the data files (defaults to "~/.local/share/moodjournal")
- `MOODJOURNAL_LOG_FORMAT`: `text` or `json`
- `RUST_LOG`: Overrides the log filter
*/

use chrono::{Datelike, Local, NaiveDate};
use moodjournal::calendar::{self, MonthCursor};
use moodjournal::cli::{self, CalendarArgs, CliArgs, Command};
use moodjournal::config::Config;
use moodjournal::constants::{
    DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, STORAGE_UNAVAILABLE_MESSAGE, TRACING_ROOT_SPAN_NAME,
    TRACING_SERVICE_NAME, VERBOSE_LOG_LEVEL,
};
use moodjournal::errors::{AppError, AppResult};
use moodjournal::journal::MoodJournal;
use moodjournal::mood;
use moodjournal::store::{ByteStore, FileStore, MutationOutcome, SkipReason, UnavailableStore};
use moodjournal::trend;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> AppResult<()> {
    // Obtain the current date once at the beginning
    let today = Local::now().date_naive();

    let args = CliArgs::parse();

    let mut config = Config::load()?;
    if let Some(format) = &args.log_format {
        config.log_format = format.trim().to_lowercase();
    }
    config.validate()?;

    init_tracing(&config.log_format, args.verbose);

    let span = tracing::info_span!(
        TRACING_ROOT_SPAN_NAME,
        service = TRACING_SERVICE_NAME,
        invocation_id = %uuid::Uuid::new_v4()
    );
    let _enter = span.enter();

    info!("Starting moodjournal");
    debug!("CLI arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    let backend: Box<dyn ByteStore> = match FileStore::open(&config.data_dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "Data directory unusable, continuing without storage");
            Box::new(UnavailableStore)
        }
    };

    let mut journal = MoodJournal::new(backend, today);
    run(&mut journal, args.command)
}

fn init_tracing(log_format: &str, verbose: bool) {
    let default_level = if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if log_format == LOG_FORMAT_JSON {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run<S: ByteStore>(journal: &mut MoodJournal<S>, command: Command) -> AppResult<()> {
    let today = journal.today();

    match command {
        Command::Log {
            mood: mood_key,
            note,
            date,
        } => {
            let date = resolve_date(date.as_deref(), today)?;
            if !mood::is_known(mood_key.trim()) {
                warn!(mood = %mood_key, "Unknown mood key, saving anyway");
            }
            let outcome = journal.set_mood_for(date, &mood_key, note.as_deref());
            match outcome {
                MutationOutcome::Saved => {
                    let key = Some(mood_key.trim());
                    println!(
                        "Saved {} {} for {}",
                        mood::emoji_of(key),
                        mood::label_of(key),
                        date
                    );
                    println!();
                    print!("{}", trend::render_trend(&journal.weekly_trend()));
                }
                other => report_skipped(other),
            }
        }
        Command::Delete { date, yes } => {
            let date = resolve_date(Some(&date), today)?;
            let outcome = if yes {
                journal.delete_for(date, &mut |_: &str| true)
            } else {
                journal.delete_for(date, &mut prompt_yes_no)
            };
            match outcome {
                MutationOutcome::Deleted => println!("Deleted the entry for {}", date),
                MutationOutcome::NotFound => println!("No entry for {}", date),
                other => report_skipped(other),
            }
        }
        Command::Show { date } => {
            let date = resolve_date(date.as_deref(), today)?;
            let long_date = calendar::format_long_date(date);
            match journal.entry_for(date) {
                Some(entry) => {
                    let key = Some(entry.mood.as_str());
                    println!(
                        "{}: {} {}",
                        long_date,
                        mood::emoji_of(key),
                        mood::label_of(key)
                    );
                    if let Some(note) = entry.note {
                        println!("   💭 {}", note);
                    }
                }
                None => println!("No entry for {}", long_date),
            }
        }
        Command::Calendar(args) => {
            let cursor = resolve_month(&args, today)?;
            let grid = journal.show_month(cursor);
            print!("{}", calendar::render_month(cursor, &grid, today));
        }
        Command::Trend => {
            print!("{}", trend::render_trend(&journal.weekly_trend()));
        }
        Command::History => {
            println!("{}", journal.history());
        }
        Command::Moods => {
            for m in mood::all() {
                println!("{} {:<9} {:<9} {}", m.emoji, m.key, m.label, m.score);
            }
        }
        Command::Theme { toggle } => {
            let dark = if toggle {
                journal.toggle_theme()
            } else {
                journal.dark_theme()
            };
            println!("Dark theme: {}", if dark { "on" } else { "off" });
        }
    }

    Ok(())
}

fn resolve_date(date: Option<&str>, today: NaiveDate) -> AppResult<NaiveDate> {
    match date {
        None => Ok(today),
        Some(s) => cli::parse_date(s)
            .map_err(|e| AppError::Journal(format!("Invalid date format: {}", e))),
    }
}

fn resolve_month(args: &CalendarArgs, today: NaiveDate) -> AppResult<MonthCursor> {
    let base = match args.month {
        Some(month) => MonthCursor::new(args.year.unwrap_or(today.year()), month - 1)
            .ok_or_else(|| AppError::Journal(format!("Invalid month: {}", month)))?,
        None => MonthCursor::containing(today),
    };

    let step = match (args.prev, args.next) {
        (Some(back), _) => -i64::from(back),
        (None, Some(forward)) => i64::from(forward),
        (None, None) => 0,
    };
    Ok(base.shift(step))
}

fn report_skipped(outcome: MutationOutcome) {
    match outcome {
        MutationOutcome::Skipped(SkipReason::StorageUnavailable) => {
            println!("{}", STORAGE_UNAVAILABLE_MESSAGE)
        }
        MutationOutcome::Skipped(SkipReason::StorageFailed) => {
            println!("Could not update the journal, see the log for details")
        }
        MutationOutcome::Skipped(SkipReason::MissingMood) => println!("Please pick a mood"),
        MutationOutcome::Skipped(SkipReason::Declined) => println!("Nothing deleted"),
        other => debug!(?other, "Unexpected outcome"),
    }
}

/// Asks a yes/no question on the terminal. Anything but yes means no.
fn prompt_yes_no(question: &str) -> bool {
    print!("{} [y/N] ", question);
    let _ = io::stdout().flush();

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(_) => matches!(input.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(e) => {
            warn!(error = %e, "Failed to read confirmation");
            false
        }
    }
}
