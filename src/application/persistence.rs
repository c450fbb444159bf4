//! Journal persistence over the key-value store port.
//!
//! Each piece of journal state lives in its own slot and is written whenever
//! it changes. Everything is read back once at startup.

use chrono::NaiveDate;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::conversation::Conversation;
use crate::domain::cycle_log::CycleLog;
use crate::domain::profile::Profile;
use crate::ports::{KeyValueStore, StoreError};

use super::state::JournalState;

/// Slot names.
pub mod keys {
    pub const PROFILE: &str = "profile";
    pub const CYCLE_LOGS: &str = "cycle_logs";
    pub const MESSAGES: &str = "messages";
    pub const API_KEY: &str = "api_key";
    pub const LAST_CHECK_IN: &str = "last_check_in";

    pub const ALL: [&str; 5] = [PROFILE, CYCLE_LOGS, MESSAGES, API_KEY, LAST_CHECK_IN];
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("stored '{key}' could not be decoded: {reason}")]
    Corrupt { key: &'static str, reason: String },

    #[error("failed to encode '{key}': {reason}")]
    Encode { key: &'static str, reason: String },

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Reads and writes journal slots.
#[derive(Clone)]
pub struct JournalRepository {
    store: Arc<dyn KeyValueStore>,
}

impl JournalRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads every slot. Missing slots yield empty defaults; a slot that
    /// exists but does not decode is an error naming the slot.
    pub async fn load(&self) -> Result<JournalState, PersistenceError> {
        let profile: Option<Profile> = self.read(keys::PROFILE).await?;
        let logs: CycleLog = self.read(keys::CYCLE_LOGS).await?.unwrap_or_default();
        let conversation: Conversation = self.read(keys::MESSAGES).await?.unwrap_or_default();
        let credential: Option<String> = self.read(keys::API_KEY).await?;
        let last_check_in: Option<NaiveDate> = self.read(keys::LAST_CHECK_IN).await?;

        let credential = credential
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .map(SecretString::new);

        tracing::info!(
            has_profile = profile.is_some(),
            entries = logs.len(),
            messages = conversation.len(),
            "journal loaded"
        );

        Ok(JournalState::new(
            profile,
            logs,
            conversation,
            credential,
            last_check_in,
        ))
    }

    pub async fn save_profile(&self, profile: &Profile) -> Result<(), PersistenceError> {
        self.write(keys::PROFILE, profile).await
    }

    pub async fn save_logs(&self, logs: &CycleLog) -> Result<(), PersistenceError> {
        self.write(keys::CYCLE_LOGS, logs).await
    }

    pub async fn save_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<(), PersistenceError> {
        self.write(keys::MESSAGES, conversation).await
    }

    /// Stores the credential, or removes the slot when `None`.
    pub async fn save_credential(
        &self,
        credential: Option<&SecretString>,
    ) -> Result<(), PersistenceError> {
        match credential {
            Some(secret) => self.write(keys::API_KEY, secret.expose_secret()).await,
            None => Ok(self.store.remove(keys::API_KEY).await?),
        }
    }

    pub async fn save_last_check_in(&self, date: NaiveDate) -> Result<(), PersistenceError> {
        self.write(keys::LAST_CHECK_IN, &date).await
    }

    async fn read<T: DeserializeOwned>(
        &self,
        key: &'static str,
    ) -> Result<Option<T>, PersistenceError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| PersistenceError::Corrupt {
                key,
                reason: e.to_string(),
            })
    }

    async fn write<T: Serialize + ?Sized>(
        &self,
        key: &'static str,
        value: &T,
    ) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(value).map_err(|e| PersistenceError::Encode {
            key,
            reason: e.to_string(),
        })?;
        self.store.set(key, &json).await?;
        tracing::debug!(key, "journal slot saved");
        Ok(())
    }
}
