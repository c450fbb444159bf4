//! File-based Key-Value Store Adapter
//!
//! Stores each slot as `<key>.json` inside a data directory. Writes go to a
//! temporary sibling first and are renamed into place, so a crash mid-write
//! leaves the previous document intact.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{validate_key, KeyValueStore, StoreError};

/// File-based storage for journal slots
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    /// Create a new file store rooted at `base_path`.
    ///
    /// The directory is created lazily on first write.
    ///
    /// ```ignore
    /// let store = FileKeyValueStore::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!(".{}.json.tmp", key))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        match fs::read_to_string(self.slot_path(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::IoError(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        let tmp = self.temp_path(key);
        fs::write(&tmp, value)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;
        fs::rename(&tmp, self.slot_path(key))
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        tracing::debug!(key, bytes = value.len(), "slot written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        match fs::remove_file(self.slot_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::IoError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_slot_reads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        assert_eq!(store.get("profile").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_returns_document() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        store.set("profile", r#"{"name":"Maya"}"#).await.unwrap();

        assert_eq!(
            store.get("profile").await.unwrap().as_deref(),
            Some(r#"{"name":"Maya"}"#)
        );
        assert!(temp_dir.path().join("profile.json").exists());
    }

    #[tokio::test]
    async fn set_overwrites_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        store.set("cycle_logs", "[]").await.unwrap();
        store.set("cycle_logs", "[1]").await.unwrap();

        assert_eq!(store.get("cycle_logs").await.unwrap().as_deref(), Some("[1]"));
        assert!(!temp_dir.path().join(".cycle_logs.json.tmp").exists());
    }

    #[tokio::test]
    async fn creates_missing_data_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("data");
        let store = FileKeyValueStore::new(&nested);

        store.set("api_key", "\"k\"").await.unwrap();

        assert!(nested.join("api_key.json").exists());
    }

    #[tokio::test]
    async fn remove_deletes_slot_and_tolerates_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        store.set("api_key", "\"k\"").await.unwrap();
        store.remove("api_key").await.unwrap();
        store.remove("api_key").await.unwrap();

        assert_eq!(store.get("api_key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn rejects_path_traversal_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        let result = store.set("../escape", "{}").await;

        assert!(matches!(result, Err(StoreError::InvalidKey(_))));
    }
}
