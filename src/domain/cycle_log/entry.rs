//! A single dated journal record.

use serde::{Deserialize, Serialize};

use super::Flow;
use crate::domain::foundation::{LogEntryId, Timestamp};

/// One immutable record of mood, symptoms, flow and note.
///
/// The date is the moment the entry was created, never user supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleLogEntry {
    id: LogEntryId,
    date: Timestamp,
    #[serde(default)]
    mood: Option<String>,
    #[serde(default)]
    symptoms: Vec<String>,
    #[serde(default)]
    flow: Option<Flow>,
    #[serde(default)]
    note: String,
}

impl CycleLogEntry {
    /// Records a new entry dated now.
    pub fn record(
        mood: Option<String>,
        symptoms: Vec<String>,
        flow: Option<Flow>,
        note: impl Into<String>,
    ) -> Self {
        Self::record_at(Timestamp::now(), mood, symptoms, flow, note)
    }

    /// Records a new entry with an explicit creation time.
    ///
    /// Symptom labels are trimmed and de-duplicated (case-insensitively),
    /// keeping first-seen order for display.
    pub fn record_at(
        date: Timestamp,
        mood: Option<String>,
        symptoms: Vec<String>,
        flow: Option<Flow>,
        note: impl Into<String>,
    ) -> Self {
        let mood = mood
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        let mut unique: Vec<String> = Vec::with_capacity(symptoms.len());
        for s in symptoms {
            let s = s.trim();
            if s.is_empty() || unique.iter().any(|u| u.eq_ignore_ascii_case(s)) {
                continue;
            }
            unique.push(s.to_string());
        }

        Self {
            id: LogEntryId::new(),
            date,
            mood,
            symptoms: unique,
            flow,
            note: note.into(),
        }
    }

    pub fn id(&self) -> LogEntryId {
        self.id
    }

    pub fn date(&self) -> Timestamp {
        self.date
    }

    pub fn mood(&self) -> Option<&str> {
        self.mood.as_deref()
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn flow(&self) -> Option<Flow> {
        self.flow
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// One-line summary used in prompts and listings.
    pub fn summary(&self) -> String {
        let symptoms = if self.symptoms.is_empty() {
            "none".to_string()
        } else {
            self.symptoms.join(", ")
        };
        format!(
            "{}: mood {}, symptoms {}, flow {}",
            self.date.local_date(),
            self.mood.as_deref().unwrap_or("unknown"),
            symptoms,
            self.flow.map(|f| f.as_str()).unwrap_or("none"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symptoms_are_trimmed_and_deduplicated_in_order() {
        let entry = CycleLogEntry::record(
            None,
            vec![
                " Cramps".to_string(),
                "Bloating".to_string(),
                "cramps".to_string(),
                "".to_string(),
            ],
            None,
            "",
        );
        assert_eq!(entry.symptoms(), ["Cramps", "Bloating"]);
    }

    #[test]
    fn blank_mood_becomes_absent() {
        let entry = CycleLogEntry::record(Some("  ".into()), vec![], Some(Flow::Light), "");
        assert_eq!(entry.mood(), None);
        assert_eq!(entry.flow(), Some(Flow::Light));
    }

    #[test]
    fn summary_mentions_every_field() {
        let entry = CycleLogEntry::record(
            Some("Tired".into()),
            vec!["Headache".into()],
            Some(Flow::Heavy),
            "long day",
        );
        let summary = entry.summary();
        assert!(summary.contains("mood Tired"));
        assert!(summary.contains("symptoms Headache"));
        assert!(summary.contains("flow Heavy"));
    }

    #[test]
    fn summary_handles_missing_fields() {
        let entry = CycleLogEntry::record(None, vec![], None, "");
        let summary = entry.summary();
        assert!(summary.contains("mood unknown"));
        assert!(summary.contains("symptoms none"));
        assert!(summary.contains("flow none"));
    }
}
