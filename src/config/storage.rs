//! Journal storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where and how the journal is persisted
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per slot
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Keep at most this many chat messages; unset keeps everything
    pub max_conversation_messages: Option<usize>,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyDataDir);
        }
        if self.max_conversation_messages == Some(0) {
            return Err(ValidationError::InvalidHistoryLimit);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_conversation_messages: None,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
