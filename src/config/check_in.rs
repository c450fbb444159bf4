//! Daily check-in configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct CheckInConfig {
    /// Disable to never post unprompted messages
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Earliest local hour (0-23) a check-in may fire
    #[serde(default = "default_hour")]
    pub hour: u32,

    /// How often the REPL re-evaluates the trigger
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl CheckInConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.hour > 23 {
            return Err(ValidationError::InvalidCheckInHour);
        }
        if self.poll_interval_secs == 0 {
            return Err(ValidationError::InvalidPollInterval);
        }
        Ok(())
    }
}

impl Default for CheckInConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            hour: default_hour(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_hour() -> u32 {
    20
}

fn default_poll_interval() -> u64 {
    60
}
