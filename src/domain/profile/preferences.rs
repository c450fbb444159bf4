//! Goal and check-in cadence preferences.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// What the user wants out of journaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    #[default]
    TrackCycle,
    UnderstandMoods,
    ManageSymptoms,
    PlanPregnancy,
}

impl Goal {
    /// All goals in display order.
    pub const ALL: [Goal; 4] = [
        Goal::TrackCycle,
        Goal::UnderstandMoods,
        Goal::ManageSymptoms,
        Goal::PlanPregnancy,
    ];

    /// Human readable label, also used in the AI prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Goal::TrackCycle => "Track my cycle",
            Goal::UnderstandMoods => "Understand my moods",
            Goal::ManageSymptoms => "Manage symptoms",
            Goal::PlanPregnancy => "Plan a pregnancy",
        }
    }

    /// Identifier accepted by `FromStr`.
    pub fn slug(&self) -> &'static str {
        match self {
            Goal::TrackCycle => "track_cycle",
            Goal::UnderstandMoods => "understand_moods",
            Goal::ManageSymptoms => "manage_symptoms",
            Goal::PlanPregnancy => "plan_pregnancy",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Goal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Goal::ALL
            .into_iter()
            .find(|g| g.slug() == wanted)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "goal",
                    format!("expected one of {}", slugs(Goal::ALL.iter().map(Goal::slug))),
                )
            })
    }
}

/// How often the assistant should check in unprompted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInFrequency {
    #[default]
    Daily,
    EveryOtherDay,
    Weekly,
}

impl CheckInFrequency {
    /// All frequencies in display order.
    pub const ALL: [CheckInFrequency; 3] = [
        CheckInFrequency::Daily,
        CheckInFrequency::EveryOtherDay,
        CheckInFrequency::Weekly,
    ];

    /// Minimum number of calendar days between two check-ins.
    pub fn min_days_between(&self) -> i64 {
        match self {
            CheckInFrequency::Daily => 1,
            CheckInFrequency::EveryOtherDay => 2,
            CheckInFrequency::Weekly => 7,
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            CheckInFrequency::Daily => "Daily",
            CheckInFrequency::EveryOtherDay => "Every other day",
            CheckInFrequency::Weekly => "Weekly",
        }
    }

    /// Identifier accepted by `FromStr`.
    pub fn slug(&self) -> &'static str {
        match self {
            CheckInFrequency::Daily => "daily",
            CheckInFrequency::EveryOtherDay => "every_other_day",
            CheckInFrequency::Weekly => "weekly",
        }
    }
}

impl fmt::Display for CheckInFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CheckInFrequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        CheckInFrequency::ALL
            .into_iter()
            .find(|f| f.slug() == wanted)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "check_in_frequency",
                    format!(
                        "expected one of {}",
                        slugs(CheckInFrequency::ALL.iter().map(CheckInFrequency::slug))
                    ),
                )
            })
    }
}

/// User preferences captured on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub goal: Goal,
    pub check_in_frequency: CheckInFrequency,
}

// Accepts "Every other day", "every-other-day" and "every_other_day" alike.
fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(['-', ' '], "_")
}

fn slugs<'a>(iter: impl Iterator<Item = &'a str>) -> String {
    iter.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_track_cycle_and_daily() {
        let prefs = Preferences::default();
        assert_eq!(prefs.goal, Goal::TrackCycle);
        assert_eq!(prefs.check_in_frequency, CheckInFrequency::Daily);
    }

    #[test]
    fn goal_parses_loose_spellings() {
        assert_eq!("manage_symptoms".parse::<Goal>(), Ok(Goal::ManageSymptoms));
        assert_eq!("Understand Moods".parse::<Goal>(), Ok(Goal::UnderstandMoods));
        assert_eq!(" plan-pregnancy ".parse::<Goal>(), Ok(Goal::PlanPregnancy));
    }

    #[test]
    fn unknown_goal_lists_choices() {
        let err = "world_peace".parse::<Goal>().unwrap_err();
        assert!(err.to_string().contains("track_cycle"));
    }

    #[test]
    fn frequency_parses_and_reports_spacing() {
        let weekly: CheckInFrequency = "weekly".parse().unwrap();
        assert_eq!(weekly.min_days_between(), 7);
        let other: CheckInFrequency = "every other day".parse().unwrap();
        assert_eq!(other, CheckInFrequency::EveryOtherDay);
        assert_eq!(other.min_days_between(), 2);
    }

    #[test]
    fn preferences_serialize_snake_case() {
        let prefs = Preferences {
            goal: Goal::ManageSymptoms,
            check_in_frequency: CheckInFrequency::EveryOtherDay,
        };
        let json = serde_json::to_string(&prefs).unwrap();
        assert_eq!(
            json,
            r#"{"goal":"manage_symptoms","check_in_frequency":"every_other_day"}"#
        );
    }
}
