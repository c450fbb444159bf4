//! The single user profile held on a device.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::preferences::{CheckInFrequency, Goal, Preferences};
use crate::domain::foundation::ValidationError;

/// Display name the assistant addresses the user by. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileName(String);

impl ProfileName {
    /// Creates a name from user input, trimming surrounding whitespace.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProfileName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProfileName> for String {
    fn from(name: ProfileName) -> Self {
        name.0
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Confidence attached to a learned pattern, 0.0 to 1.0 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("confidence", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Confidence {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

/// A pattern the assistant has learned about the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedInsight {
    pub pattern: String,
    pub confidence: Confidence,
    pub learned_date: NaiveDate,
}

impl LearnedInsight {
    pub fn new(
        pattern: impl Into<String>,
        confidence: f64,
        learned_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            return Err(ValidationError::empty_field("pattern"));
        }
        Ok(Self {
            pattern,
            confidence: Confidence::try_new(confidence)?,
            learned_date,
        })
    }
}

/// User identity and preferences.
///
/// Created exactly once during onboarding; afterwards only preference edits
/// mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    name: ProfileName,
    onboarding_complete: bool,
    preferences: Preferences,
    #[serde(default)]
    insights: Vec<LearnedInsight>,
}

impl Profile {
    /// Creates the profile at the end of onboarding with default preferences.
    pub fn create(name: ProfileName) -> Self {
        Self {
            name,
            onboarding_complete: true,
            preferences: Preferences::default(),
            insights: Vec::new(),
        }
    }

    pub fn name(&self) -> &ProfileName {
        &self.name
    }

    pub fn onboarding_complete(&self) -> bool {
        self.onboarding_complete
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn insights(&self) -> &[LearnedInsight] {
        &self.insights
    }

    pub fn set_goal(&mut self, goal: Goal) {
        self.preferences.goal = goal;
    }

    pub fn set_check_in_frequency(&mut self, frequency: CheckInFrequency) {
        self.preferences.check_in_frequency = frequency;
    }
}
