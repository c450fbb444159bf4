//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CYCLE_COMPANION` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use cycle_companion::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Journal stored in {}", config.storage.data_dir.display());
//! ```

mod ai;
mod check_in;
mod error;
mod logging;
mod storage;

pub use ai::AiConfig;
pub use check_in::CheckInConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Gemini provider settings
    #[serde(default)]
    pub ai: AiConfig,

    /// Data directory and history cap
    #[serde(default)]
    pub storage: StorageConfig,

    /// Daily check-in trigger
    #[serde(default)]
    pub check_in: CheckInConfig,

    /// Tracing subscriber settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present
    /// 2. Reads environment variables with `CYCLE_COMPANION` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CYCLE_COMPANION__AI__API_KEY=...` -> `ai.api_key = ...`
    /// - `CYCLE_COMPANION__CHECK_IN__HOUR=21` -> `check_in.hour = 21`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CYCLE_COMPANION")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.storage.validate()?;
        self.check_in.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "CYCLE_COMPANION__AI__API_KEY",
        "CYCLE_COMPANION__AI__MODEL",
        "CYCLE_COMPANION__STORAGE__DATA_DIR",
        "CYCLE_COMPANION__STORAGE__MAX_CONVERSATION_MESSAGES",
        "CYCLE_COMPANION__CHECK_IN__HOUR",
        "CYCLE_COMPANION__LOGGING__FORMAT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.ai.model, "gemini-1.5-flash");
        assert_eq!(config.check_in.hour, 20);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CYCLE_COMPANION__AI__API_KEY", "key-from-env");
        env::set_var("CYCLE_COMPANION__AI__MODEL", "gemini-pro");
        env::set_var("CYCLE_COMPANION__STORAGE__DATA_DIR", "/tmp/journal");
        env::set_var("CYCLE_COMPANION__STORAGE__MAX_CONVERSATION_MESSAGES", "200");
        env::set_var("CYCLE_COMPANION__CHECK_IN__HOUR", "21");
        env::set_var("CYCLE_COMPANION__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.api_key.as_deref(), Some("key-from-env"));
        assert_eq!(config.ai.model, "gemini-pro");
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/journal"));
        assert_eq!(config.storage.max_conversation_messages, Some(200));
        assert_eq!(config.check_in.hour, 21);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validate_rejects_invalid_hour() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CYCLE_COMPANION__CHECK_IN__HOUR", "25");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.validate(), Err(ValidationError::InvalidCheckInHour));
    }
}
