//! Check-in module - when the assistant reaches out unprompted.
//!
//! A check-in is due when the local hour is at or past the threshold and
//! enough calendar days have passed since the stored marker. With the
//! default daily cadence that means "any date other than the marker".

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::domain::foundation::ValidationError;
use crate::domain::profile::{CheckInFrequency, ProfileName};

/// Earliest local hour (24h clock) at which a check-in may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInPolicy {
    threshold_hour: u32,
}

impl CheckInPolicy {
    pub fn new(threshold_hour: u32) -> Result<Self, ValidationError> {
        if threshold_hour > 23 {
            return Err(ValidationError::out_of_range(
                "check_in_hour",
                0.0,
                23.0,
                f64::from(threshold_hour),
            ));
        }
        Ok(Self { threshold_hour })
    }

    pub fn threshold_hour(&self) -> u32 {
        self.threshold_hour
    }

    /// Decides whether a check-in is due at local time `now`.
    ///
    /// `last` is the date of the previous check-in, if any. A marker later
    /// than today (clock or time zone moved back) counts as a different date.
    pub fn is_due(
        &self,
        last: Option<NaiveDate>,
        now: NaiveDateTime,
        frequency: CheckInFrequency,
    ) -> bool {
        if now.hour() < self.threshold_hour {
            return false;
        }
        match last {
            None => true,
            Some(last) => {
                let days = (now.date() - last).num_days();
                days < 0 || days >= frequency.min_days_between()
            }
        }
    }
}

impl Default for CheckInPolicy {
    fn default() -> Self {
        Self { threshold_hour: 20 }
    }
}

/// Scripted message appended when a check-in fires.
pub fn check_in_message(name: &ProfileName) -> String {
    format!(
        "Hey {}, just checking in 🌙 How are you feeling today? Any cramps, mood shifts, \
or changes in your flow you'd like me to note down?",
        name
    )
}
