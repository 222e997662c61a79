//! Draft persistence for long-running form sessions.
//!
//! A [`DraftSlot`] owns one key-value slot in durable storage and keeps a
//! timestamped snapshot of form state there, so an accidental tab closure
//! does not lose the user's input. Drafts expire after 24 hours and
//! self-clean on the next read; corrupted drafts are discarded silently.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::marker::PhantomData;
use thiserror::Error;

/// Drafts older than this are never restored.
pub const DRAFT_TTL_MS: i64 = 86_400_000;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,
    /// Write rejected by the backend (quota exceeded, storage disabled).
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("draft serialization failed: {0}")]
    Serialize(String),
}

/// Key-value slot behind the draft manager.
pub trait DraftStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl DraftStorage for Box<dyn DraftStorage> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Browser localStorage backend.
#[derive(Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }

    pub fn is_available() -> bool {
        Self::storage().is_ok()
    }
}

impl DraftStorage for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // set_item fails with QuotaExceededError when the origin is out of
        // space; the caller decides whether to warn the user.
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }
}

/// In-memory backend. Used when localStorage is disabled (the draft then
/// survives view switches within the session, but not a page reload) and in
/// tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl DraftStorage for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);
        Ok(())
    }
}

/// Prefer localStorage; degrade to a session-local memory slot when the
/// browser has storage disabled.
pub fn default_backend() -> Box<dyn DraftStorage> {
    if LocalStorage::is_available() {
        Box::new(LocalStorage)
    } else {
        Box::new(MemoryStore::default())
    }
}

/// Persisted layout: the form-data object itself plus one reserved
/// `timestamp` field (epoch milliseconds of the capture).
#[derive(Debug, Serialize, Deserialize)]
struct DraftEnvelope<T> {
    #[serde(flatten)]
    data: T,
    timestamp: i64,
}

/// One draft slot bound to an explicit, caller-supplied storage key.
///
/// The key scopes the slot to a form session (e.g. `product-form-draft:<id>`)
/// so that unrelated forms do not clobber each other's drafts. All
/// operations are idempotent; concurrent tabs are last-write-wins.
pub struct DraftSlot<T, S: DraftStorage> {
    key: String,
    ttl_ms: i64,
    storage: S,
    _marker: PhantomData<T>,
}

impl<T, S> DraftSlot<T, S>
where
    T: Serialize + DeserializeOwned,
    S: DraftStorage,
{
    pub fn new(key: impl Into<String>, storage: S) -> Self {
        Self {
            key: key.into(),
            ttl_ms: DRAFT_TTL_MS,
            storage,
            _marker: PhantomData,
        }
    }

    /// Overwrite the slot with a snapshot taken now.
    pub fn save(&mut self, data: &T) -> Result<(), StorageError> {
        self.save_at(data, Utc::now().timestamp_millis())
    }

    pub(crate) fn save_at(&mut self, data: &T, now_ms: i64) -> Result<(), StorageError> {
        let json = serde_json::to_string(&DraftEnvelope {
            data,
            timestamp: now_ms,
        })
        .map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.storage.write(&self.key, &json)
    }

    /// Restore the saved form data, if a usable draft exists.
    pub fn load(&mut self) -> Option<T> {
        self.load_at(Utc::now().timestamp_millis())
    }

    /// `None` when the slot is empty, unreadable, malformed or expired.
    /// Expired and malformed drafts are removed as a side effect of the read.
    pub(crate) fn load_at(&mut self, now_ms: i64) -> Option<T> {
        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("draft '{}': read failed: {}", self.key, e);
                return None;
            }
        };
        let envelope: DraftEnvelope<T> = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                log::warn!("draft '{}': discarding unreadable draft: {}", self.key, e);
                self.clear();
                return None;
            }
        };
        if now_ms - envelope.timestamp > self.ttl_ms {
            self.clear();
            return None;
        }
        Some(envelope.data)
    }

    /// Delete the slot; a no-op when nothing is stored.
    pub fn clear(&mut self) {
        if let Err(e) = self.storage.remove(&self.key) {
            log::warn!("draft '{}': clear failed: {}", self.key, e);
        }
    }

    #[cfg(test)]
    pub(crate) fn raw(&self) -> Option<String> {
        self.storage.read(&self.key).unwrap()
    }
}
