//! Insights module - presentation theme and insight cards.
//!
//! The theme is a pure function of the most recent log entry; earlier
//! entries are ignored. Insight cards are a fixed list.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::cycle_log::{CycleLog, CycleLogEntry};

/// Mood label that selects the pain theme on its own.
pub const PAIN_MOOD: &str = "pain";

static PAIN_SYMPTOMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["cramps", "headache", "back pain", "migraine", "pain", "abdominal pain"]
        .into_iter()
        .collect()
});

static POSITIVE_MOODS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["happy", "energetic", "calm", "excited", "content", "motivated"]
        .into_iter()
        .collect()
});

static NEGATIVE_MOODS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["sad", "anxious", "irritable", "angry", "stressed", "overwhelmed", "low"]
        .into_iter()
        .collect()
});

/// Discrete presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Latest entry reports pain.
    Soothing,
    /// Latest mood is positive.
    Radiant,
    /// Latest mood is negative.
    Gentle,
    #[default]
    Balanced,
}

impl Theme {
    /// Derives the theme from the latest entry of the log.
    pub fn for_log(log: &CycleLog) -> Self {
        Self::for_entry(log.latest())
    }

    /// Derives the theme from a single entry; `None` yields the default.
    pub fn for_entry(latest: Option<&CycleLogEntry>) -> Self {
        let Some(entry) = latest else {
            return Theme::default();
        };

        let mood = entry.mood().map(label_key);
        let in_pain = entry
            .symptoms()
            .iter()
            .any(|s| PAIN_SYMPTOMS.contains(label_key(s).as_str()))
            || mood.as_deref() == Some(PAIN_MOOD);

        if in_pain {
            return Theme::Soothing;
        }
        match mood.as_deref() {
            Some(m) if POSITIVE_MOODS.contains(m) => Theme::Radiant,
            Some(m) if NEGATIVE_MOODS.contains(m) => Theme::Gentle,
            _ => Theme::Balanced,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Soothing => "Soothing",
            Theme::Radiant => "Radiant",
            Theme::Gentle => "Gentle",
            Theme::Balanced => "Balanced",
        }
    }

    /// Short line shown under the dashboard header.
    pub fn tagline(&self) -> &'static str {
        match self {
            Theme::Soothing => "Go easy on yourself today. Warmth and rest help.",
            Theme::Radiant => "You're glowing! A great day to lean into your energy.",
            Theme::Gentle => "It's okay to have heavier days. I'm here with you.",
            Theme::Balanced => "Steady and balanced. Keep checking in with yourself.",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn label_key(label: &str) -> String {
    label.trim().to_lowercase()
}

/// A card shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InsightCard {
    pub title: &'static str,
    pub body: &'static str,
}

/// Insight cards; fixed content, not derived from the log.
pub const INSIGHT_CARDS: [InsightCard; 3] = [
    InsightCard {
        title: "Energy rhythm",
        body: "Many people feel a lift in energy in the days after their period ends.",
    },
    InsightCard {
        title: "Mood and rest",
        body: "Low moods often ease with extra sleep and gentle movement before your period.",
    },
    InsightCard {
        title: "Cramp relief",
        body: "Heat, hydration and light stretching can take the edge off cramps.",
    },
];

/// Symptom labels ranked by how often they appear, most frequent first.
///
/// Ties keep first-seen order. Labels are grouped case-insensitively and
/// reported with their first spelling.
pub fn top_symptoms(log: &CycleLog, limit: usize) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for symptom in log.entries().iter().flat_map(|e| e.symptoms()) {
        match counts
            .iter_mut()
            .find(|(label, _)| label.eq_ignore_ascii_case(symptom))
        {
            Some((_, n)) => *n += 1,
            None => counts.push((symptom.clone(), 1)),
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(mood: Option<&str>, symptoms: &[&str]) -> CycleLogEntry {
        CycleLogEntry::record(
            mood.map(str::to_string),
            symptoms.iter().map(|s| s.to_string()).collect(),
            None,
            "",
        )
    }

    #[test]
    fn empty_log_is_balanced() {
        assert_eq!(Theme::for_log(&CycleLog::new()), Theme::Balanced);
    }

    #[test]
    fn cramps_select_soothing_even_when_neutral() {
        let e = entry(Some("Neutral"), &["Cramps"]);
        assert_eq!(Theme::for_entry(Some(&e)), Theme::Soothing);
    }

    #[test]
    fn pain_mood_selects_soothing() {
        let e = entry(Some("Pain"), &[]);
        assert_eq!(Theme::for_entry(Some(&e)), Theme::Soothing);
    }

    #[test]
    fn energetic_selects_radiant() {
        let e = entry(Some("Energetic"), &[]);
        assert_eq!(Theme::for_entry(Some(&e)), Theme::Radiant);
    }

    #[test]
    fn sad_selects_gentle() {
        let e = entry(Some("Sad"), &[]);
        assert_eq!(Theme::for_entry(Some(&e)), Theme::Gentle);
    }

    #[test]
    fn unknown_mood_is_balanced() {
        let e = entry(Some("Curious"), &["Bloating"]);
        assert_eq!(Theme::for_entry(Some(&e)), Theme::Balanced);
        let no_mood = entry(None, &[]);
        assert_eq!(Theme::for_entry(Some(&no_mood)), Theme::Balanced);
    }

    #[test]
    fn labels_match_case_insensitively() {
        let e = entry(Some(" happy "), &[]);
        assert_eq!(Theme::for_entry(Some(&e)), Theme::Radiant);
        let e = entry(Some("Happy"), &["HEADACHE"]);
        assert_eq!(Theme::for_entry(Some(&e)), Theme::Soothing);
    }

    #[test]
    fn only_latest_entry_counts() {
        let mut log = CycleLog::new();
        log.append(entry(Some("Sad"), &["Cramps"]));
        log.append(entry(Some("Happy"), &[]));
        assert_eq!(Theme::for_log(&log), Theme::Radiant);
    }

    #[test]
    fn top_symptoms_ranks_by_frequency() {
        let mut log = CycleLog::new();
        log.append(entry(None, &["Bloating", "Cramps"]));
        log.append(entry(None, &["cramps"]));
        log.append(entry(None, &["Headache", "Cramps"]));
        let top = top_symptoms(&log, 2);
        assert_eq!(top, vec![("Cramps".to_string(), 3), ("Bloating".to_string(), 1)]);
    }

    proptest! {
        #[test]
        fn any_pain_symptom_wins_over_mood(
            mood in prop::sample::select(vec!["Happy", "Sad", "Calm", "Neutral", "Anxious"]),
            pain in prop::sample::select(vec!["Cramps", "Headache", "Back Pain", "Migraine"]),
            other in "[A-Za-z]{0,12}",
        ) {
            let e = entry(Some(mood), &[other.as_str(), pain]);
            prop_assert_eq!(Theme::for_entry(Some(&e)), Theme::Soothing);
        }

        #[test]
        fn theme_ignores_everything_but_the_latest(
            earlier in prop::collection::vec(
                prop::sample::select(vec!["Happy", "Sad", "Pain", "Calm"]), 0..6),
        ) {
            let mut log = CycleLog::new();
            for mood in &earlier {
                log.append(entry(Some(*mood), &[]));
            }
            log.append(entry(Some("Anxious"), &[]));
            prop_assert_eq!(Theme::for_log(&log), Theme::Gentle);
        }
    }
}
