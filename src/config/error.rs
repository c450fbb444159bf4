//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid AI base URL: must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("Model name must not be empty")]
    EmptyModel,

    #[error("Temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("max_output_tokens must be greater than zero")]
    InvalidMaxOutputTokens,

    #[error("Data directory must not be empty")]
    EmptyDataDir,

    #[error("max_conversation_messages must be greater than zero when set")]
    InvalidHistoryLimit,

    #[error("Check-in hour must be between 0 and 23")]
    InvalidCheckInHour,

    #[error("Check-in poll interval must be greater than zero")]
    InvalidPollInterval,

    #[error("Log filter must not be empty")]
    EmptyLogFilter,
}
