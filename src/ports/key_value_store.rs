//! Key-Value Store Port - Interface for durable journal storage.
//!
//! The journal persists a handful of named slots. Each slot holds one JSON
//! document; the store itself is agnostic to its shape.

use async_trait::async_trait;

/// Errors that can occur during store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for a string-keyed store of JSON documents
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw document stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been written yet.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the document stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the document stored under `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Rejects keys that could escape a storage namespace.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
