//! Persisted key-value storage seam
//!
//! Mirrors the browser's local storage: flat string keys, string values,
//! last write wins. Keys are namespaced informally by concatenation.

use crate::error::StorageError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Bearer token issued at login.
pub const TOKEN_KEY: &str = "token";
/// JSON-serialized [`UserSummary`](crate::types::UserSummary).
pub const USER_KEY: &str = "user";
/// Legacy keys removed on logout.
pub const LEGACY_FIRSTNAME_KEY: &str = "firstname";
/// Legacy keys removed on logout.
pub const LEGACY_EMAIL_KEY: &str = "email";
/// Prefix of per-plan progress keys.
pub const PROGRESS_KEY_PREFIX: &str = "planner_progress_";
/// Millisecond timestamp of the most recent progress write.
pub const PROGRESS_UPDATED_KEY: &str = "progress_updated";

/// Storage key holding the progress of the plan for `vitamin`.
pub fn progress_key(vitamin: &str) -> String {
    format!("{}{}", PROGRESS_KEY_PREFIX, vitamin)
}

/// Flat string storage shared by every page of the client.
pub trait KeyValueStore {
    /// Read a raw value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a raw value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key; deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Tell other views that storage changed. Carries no payload.
    fn notify_changed(&self) {}
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn notify_changed(&self) {
        (**self).notify_changed()
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn notify_changed(&self) {
        (**self).notify_changed()
    }
}

/// In-process store. Clones share the same map, like two components of one tab.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    notifications: Arc<AtomicU64>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of change notifications emitted so far
    pub fn notifications(&self) -> u64 {
        self.notifications.load(Ordering::SeqCst)
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }

    fn notify_changed(&self) {
        self.notifications.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("token", "abc").unwrap();
        assert_eq!(other.get("token").as_deref(), Some("abc"));

        other.remove("token").unwrap();
        assert!(store.get("token").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let store = MemoryStore::new();
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_progress_key_is_namespaced() {
        assert_eq!(progress_key("VitaminC"), "planner_progress_VitaminC");
    }
}
