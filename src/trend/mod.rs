//! Trailing-week mood trend.
//!
//! The trend covers the seven local calendar days ending on (and including)
//! today, oldest first. Days without an entry still get a point, scored 0.

use crate::constants::{TREND_DAYS, WEEKDAY_FORMAT_SHORT};
use crate::mood;
use crate::store::{ByteStore, MoodEntry, MoodEntryStore};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::fmt::Write as _;

/// One day of the trend.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyDataPoint {
    /// Short weekday label, e.g. "Mon".
    pub day: String,
    pub date: NaiveDate,
    pub score: f64,
    pub emoji: String,
    pub color: String,
}

/// Computes the seven points ending on `today` from an entry snapshot.
///
/// # Examples
///
/// ```
/// use moodjournal::trend::weekly_trend;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
/// let points = weekly_trend(today, &[]);
/// assert_eq!(points.len(), 7);
/// assert_eq!(points[0].day, "Mon");
/// assert_eq!(points[6].day, "Sun");
/// assert!(points.iter().all(|p| p.score == 0.0 && p.color == "#ecf0f1"));
/// ```
pub fn weekly_trend(today: NaiveDate, entries: &[MoodEntry]) -> Vec<WeeklyDataPoint> {
    let by_date: HashMap<NaiveDate, &str> =
        entries.iter().map(|e| (e.date, e.mood.as_str())).collect();

    (0..TREND_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let mood_key = by_date.get(&date).copied();
            WeeklyDataPoint {
                day: date.format(WEEKDAY_FORMAT_SHORT).to_string(),
                date,
                score: mood::score_of(mood_key),
                emoji: mood::emoji_of(mood_key).to_string(),
                color: mood::color_of(mood_key).to_string(),
            }
        })
        .collect()
}

/// Computes the trend straight from the store.
pub fn weekly_trend_from<S: ByteStore>(
    store: &MoodEntryStore<S>,
    today: NaiveDate,
) -> Vec<WeeklyDataPoint> {
    weekly_trend(today, &store.get_all())
}

/// Aggregate figures over a trend.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSummary {
    /// Days in the window that have an entry.
    pub recorded_days: usize,
    /// Mean score over recorded days, `None` when nothing was recorded.
    pub average_score: Option<f64>,
}

impl TrendSummary {
    pub fn from_points(points: &[WeeklyDataPoint]) -> Self {
        // A recorded day always scores at least 1, so 0 means no entry.
        let scores: Vec<f64> = points
            .iter()
            .map(|p| p.score)
            .filter(|s| *s > 0.0)
            .collect();
        let average_score =
            (!scores.is_empty()).then(|| scores.iter().sum::<f64>() / scores.len() as f64);

        TrendSummary {
            recorded_days: scores.len(),
            average_score,
        }
    }
}

/// Renders the trend as a horizontal bar chart, one line per day.
pub fn render_trend(points: &[WeeklyDataPoint]) -> String {
    let mut out = String::new();
    for point in points {
        // Two bar cells per score point, so half points are visible.
        let bar = "█".repeat((point.score * 2.0).round() as usize);
        let _ = writeln!(
            out,
            "{} {} {:<10} {:>3} {}",
            point.day,
            point.date.format("%m-%d"),
            bar,
            point.score,
            point.emoji
        );
    }

    let summary = TrendSummary::from_points(points);
    match summary.average_score {
        Some(avg) => {
            let _ = writeln!(
                out,
                "\n{} of {} days recorded, average score {:.1}",
                summary.recorded_days,
                points.len(),
                avg
            );
        }
        None => {
            let _ = writeln!(out, "\nNo moods recorded this week");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seven_points_oldest_first() {
        let today = date(2024, 3, 1);
        let points = weekly_trend(today, &[]);

        assert_eq!(points.len(), 7);
        assert_eq!(points[0].date, date(2024, 2, 24));
        assert_eq!(points[6].date, today);
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_empty_days_use_absent_defaults() {
        let points = weekly_trend(date(2024, 3, 1), &[]);
        for point in points {
            assert_eq!(point.score, 0.0);
            assert_eq!(point.emoji, "");
            assert_eq!(point.color, "#ecf0f1");
        }
    }

    #[test]
    fn test_recorded_days_are_scored() {
        let today = date(2024, 3, 1);
        let entries = vec![
            MoodEntry::new(today, "ecstatic", None),
            MoodEntry::new(date(2024, 2, 26), "bogus-key", None),
            // Outside the window
            MoodEntry::new(date(2024, 2, 23), "sad", None),
        ];

        let points = weekly_trend(today, &entries);

        assert_eq!(points[6].score, 5.0);
        assert_eq!(points[6].emoji, "🤩");
        assert_eq!(points[6].color, "#ff6b9d");
        assert_eq!(points[2].date, date(2024, 2, 26));
        assert_eq!(points[2].score, 3.0);
        assert_eq!(points[2].color, "#bdc3c7");
        assert_eq!(points[2].emoji, "");
        assert_eq!(points.iter().filter(|p| p.score > 0.0).count(), 2);
    }

    #[test]
    fn test_window_crosses_leap_day() {
        let points = weekly_trend(date(2024, 3, 2), &[]);
        assert!(points.iter().any(|p| p.date == date(2024, 2, 29)));
    }

    #[test]
    fn test_weekday_labels() {
        // 2024-03-01 is a Friday
        let points = weekly_trend(date(2024, 3, 1), &[]);
        let labels: Vec<_> = points.iter().map(|p| p.day.as_str()).collect();
        assert_eq!(labels, ["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"]);
    }

    #[test]
    fn test_trend_reflects_store_mutations() {
        let today = date(2024, 3, 1);
        let mut store = MoodEntryStore::new(MemoryStore::new());
        assert_eq!(weekly_trend_from(&store, today)[6].score, 0.0);

        store.upsert(MoodEntry::new(today, "calm", None));
        assert_eq!(weekly_trend_from(&store, today)[6].score, 3.5);

        store.delete(today);
        assert_eq!(weekly_trend_from(&store, today)[6].score, 0.0);
    }

    #[test]
    fn test_summary() {
        let today = date(2024, 3, 1);
        let entries = vec![
            MoodEntry::new(today, "happy", None),
            MoodEntry::new(date(2024, 2, 29), "anxious", None),
        ];
        let summary = TrendSummary::from_points(&weekly_trend(today, &entries));

        assert_eq!(summary.recorded_days, 2);
        assert_eq!(summary.average_score, Some(3.0));

        let empty = TrendSummary::from_points(&weekly_trend(today, &[]));
        assert_eq!(empty.recorded_days, 0);
        assert!(empty.average_score.is_none());
    }

    #[test]
    fn test_render_trend() {
        let today = date(2024, 3, 1);
        let entries = vec![MoodEntry::new(today, "happy", None)];

        let text = render_trend(&weekly_trend(today, &entries));

        assert_eq!(text.lines().filter(|l| l.starts_with(char::is_alphabetic)).count(), 7);
        assert!(text.contains("Fri 03-01 ████████"));
        assert!(text.contains("1 of 7 days recorded, average score 4.0"));
    }
}
