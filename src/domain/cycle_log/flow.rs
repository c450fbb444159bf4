//! Menstrual flow level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Flow level recorded on a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flow {
    Light,
    Medium,
    Heavy,
    Spotting,
}

impl Flow {
    pub const ALL: [Flow; 4] = [Flow::Light, Flow::Medium, Flow::Heavy, Flow::Spotting];

    pub fn as_str(&self) -> &'static str {
        match self {
            Flow::Light => "Light",
            Flow::Medium => "Medium",
            Flow::Heavy => "Heavy",
            Flow::Spotting => "Spotting",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flow {
    type Err = ValidationError;

    /// Case-insensitive; model output is not consistent about capitalization.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Flow::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "flow",
                    format!("'{}' is not one of Light, Medium, Heavy, Spotting", wanted),
                )
            })
    }
}
