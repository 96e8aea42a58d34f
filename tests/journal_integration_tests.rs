use chrono::{Duration, NaiveDate};
use moodjournal::calendar::MonthCursor;
use moodjournal::constants::MOOD_ENTRIES_KEY;
use moodjournal::history::HistoryReport;
use moodjournal::journal::MoodJournal;
use moodjournal::store::{
    ByteStore, FileStore, MoodEntry, MoodEntryStore, MutationOutcome, SkipReason,
};
use std::fs;
use tempfile::tempdir;

// Fixed reference date for deterministic testing
fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

#[test]
fn test_entries_survive_reopening() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let today = fixed_today();

    {
        let mut journal = MoodJournal::new(FileStore::open(temp_dir.path())?, today);
        assert_eq!(
            journal.record_today("happy", Some("  first  ")),
            MutationOutcome::Saved
        );
        journal.set_mood_for(today - Duration::days(1), "tired", None);
        journal.toggle_theme();
    }

    let journal = MoodJournal::new(FileStore::open(temp_dir.path())?, today);
    let entry = journal.entry_for(today).expect("entry should persist");
    assert_eq!(entry.mood, "happy");
    assert_eq!(entry.note.as_deref(), Some("first"));
    assert!(journal.dark_theme());

    let points = journal.weekly_trend();
    assert_eq!(points[5].score, 2.5);
    assert_eq!(points[6].score, 4.0);

    Ok(())
}

#[test]
fn test_blob_on_disk_is_json_array() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let mut store = MoodEntryStore::new(FileStore::open(temp_dir.path())?);
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

    store.upsert(MoodEntry::new(date, "happy", None));
    store.upsert(MoodEntry::new(date, "sad", Some("later")));

    let raw = fs::read_to_string(temp_dir.path().join("moodEntries.json"))?;
    assert_eq!(raw, r#"[{"date":"2024-03-01","mood":"sad","note":"later"}]"#);

    Ok(())
}

#[test]
fn test_corrupt_file_is_recovered() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("moodEntries.json"), "[{\"date\": oops")?;

    let mut journal = MoodJournal::new(FileStore::open(temp_dir.path())?, fixed_today());
    assert_eq!(journal.history(), HistoryReport::Empty);
    assert!(journal.calendar().iter().all(|c| c.mood.is_none()));

    journal.record_today("calm", None);
    assert_eq!(journal.store().get_all().len(), 1);

    Ok(())
}

#[test]
fn test_history_over_file_store() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let today = fixed_today();
    let mut journal = MoodJournal::new(FileStore::open(temp_dir.path())?, today);

    for offset in 0..15 {
        journal.set_mood_for(today - Duration::days(offset), "grateful", None);
    }

    let report = journal.history().to_string();
    assert_eq!(report.matches("📅").count(), 10);
    assert!(report.contains("📅 2024-03-01 — 🙏 Grateful"));
    assert!(!report.contains("2024-02-20"));

    Ok(())
}

#[test]
fn test_calendar_month_across_years() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let mut journal = MoodJournal::new(
        FileStore::open(temp_dir.path())?,
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
    );
    journal.set_mood_for(NaiveDate::from_ymd_opt(2024, 12, 24).unwrap(), "ecstatic", None);

    let december = journal.previous_month();
    assert_eq!(journal.cursor(), MonthCursor::new(2024, 11).unwrap());
    // 2024-12-01 is a Sunday
    assert!(!december[0].is_blank());
    let eve = december.iter().find(|c| c.day == 24).unwrap();
    assert_eq!(eve.mood.as_deref(), Some("ecstatic"));

    Ok(())
}

#[test]
fn test_write_blocked_by_lock_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
    use fs2::FileExt;

    let temp_dir = tempdir()?;
    let mut store = MoodEntryStore::new(FileStore::open(temp_dir.path())?);

    // Hold the lock the way a second process would
    let lock_path = temp_dir.path().join(format!("{}.lock", MOOD_ENTRIES_KEY));
    let holder = fs::File::create(&lock_path)?;
    holder.try_lock_exclusive()?;

    let outcome = store.upsert(MoodEntry::new(fixed_today(), "happy", None));
    assert_eq!(outcome, MutationOutcome::Skipped(SkipReason::StorageFailed));
    assert!(store.backend().get(MOOD_ENTRIES_KEY)?.is_none());

    FileExt::unlock(&holder)?;
    let outcome = store.upsert(MoodEntry::new(fixed_today(), "happy", None));
    assert_eq!(outcome, MutationOutcome::Saved);

    Ok(())
}

#[test]
fn test_concurrent_writers_lose_no_entries() -> Result<(), Box<dyn std::error::Error>> {
    use std::thread;

    let temp_dir = tempdir()?;
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let writers: Vec<_> = (0..2i64)
        .map(|writer| {
            let dir = temp_dir.path().to_path_buf();
            thread::spawn(move || {
                // Each writer has its own handle, as a second process would
                let mut store = MoodEntryStore::new(FileStore::open(&dir).unwrap());
                for i in 0..20 {
                    let date = start + Duration::days(writer * 20 + i);
                    while store.upsert(MoodEntry::new(date, "calm", None)) != MutationOutcome::Saved
                    {
                        thread::yield_now();
                    }
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().expect("writer thread panicked");
    }

    let store = MoodEntryStore::new(FileStore::open(temp_dir.path())?);
    assert_eq!(store.get_all().len(), 40);

    Ok(())
}
