//! The fixed mood catalog.
//!
//! Every mood a user can record is one of ten `MoodDefinition`s, looked up by
//! key. Lookups never fail: an unknown key and a missing mood each map to a
//! fixed fallback so derived views can always be drawn.

use crate::constants::{
    ABSENT_MOOD_COLOR, ABSENT_MOOD_SCORE, UNKNOWN_MOOD_COLOR, UNKNOWN_MOOD_SCORE,
};

/// A single catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodDefinition {
    /// Stable identifier stored in entries (e.g. `"happy"`).
    pub key: &'static str,
    /// Emoji shown next to the mood.
    pub emoji: &'static str,
    /// Human readable label.
    pub label: &'static str,
    /// Wellbeing score, 1 (worst) to 5 (best).
    pub score: f64,
    /// Hex color used for charts and calendar cells.
    pub color: &'static str,
}

const fn mood(
    key: &'static str,
    emoji: &'static str,
    label: &'static str,
    score: f64,
    color: &'static str,
) -> MoodDefinition {
    MoodDefinition {
        key,
        emoji,
        label,
        score,
        color,
    }
}

/// The catalog, in display order.
pub const MOODS: [MoodDefinition; 10] = [
    mood("ecstatic", "🤩", "Ecstatic", 5.0, "#ff6b9d"),
    mood("happy", "😄", "Happy", 4.0, "#4ecdc4"),
    mood("grateful", "🙏", "Grateful", 4.0, "#45b7d1"),
    mood("calm", "😌", "Calm", 3.5, "#96ceb4"),
    mood("neutral", "😐", "Neutral", 3.0, "#bdc3c7"),
    mood("tired", "😴", "Tired", 2.5, "#f4d03f"),
    mood("anxious", "😰", "Anxious", 2.0, "#f39c12"),
    mood("sad", "😢", "Sad", 1.5, "#85c1e9"),
    mood("angry", "😠", "Angry", 1.0, "#e74c3c"),
    mood("stressed", "😫", "Stressed", 1.0, "#8e44ad"),
];

/// Returns every mood in display order.
pub fn all() -> &'static [MoodDefinition] {
    &MOODS
}

/// Looks up a mood by key.
pub fn find(key: &str) -> Option<&'static MoodDefinition> {
    MOODS.iter().find(|m| m.key == key)
}

/// Returns true if `key` names a catalog mood.
pub fn is_known(key: &str) -> bool {
    find(key).is_some()
}

/// Wellbeing score for a mood.
///
/// `None` (no entry that day) scores 0, an unknown key scores 3.
///
/// # Examples
///
/// ```
/// use moodjournal::mood;
///
/// assert_eq!(mood::score_of(Some("calm")), 3.5);
/// assert_eq!(mood::score_of(Some("bogus-key")), 3.0);
/// assert_eq!(mood::score_of(None), 0.0);
/// ```
pub fn score_of(mood: Option<&str>) -> f64 {
    match mood {
        None => ABSENT_MOOD_SCORE,
        Some(key) => find(key).map_or(UNKNOWN_MOOD_SCORE, |m| m.score),
    }
}

/// Chart color for a mood.
pub fn color_of(mood: Option<&str>) -> &'static str {
    match mood {
        None => ABSENT_MOOD_COLOR,
        Some(key) => find(key).map_or(UNKNOWN_MOOD_COLOR, |m| m.color),
    }
}

/// Emoji for a mood, empty when absent or unknown.
pub fn emoji_of(mood: Option<&str>) -> &'static str {
    mood.and_then(find).map_or("", |m| m.emoji)
}

/// Label for a mood. An unknown key is echoed back unchanged.
pub fn label_of(mood: Option<&str>) -> &str {
    match mood {
        None => "",
        Some(key) => find(key).map_or(key, |m| m.label),
    }
}
