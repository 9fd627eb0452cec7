//! Local persistence store
//!
//! Keeps exactly one JSON value under a fixed key. Failures never reach the
//! caller: a failed save leaves the previous value in place, a failed load
//! reads as absent.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::storage::KeyValueStorage;

/// Single-blob store over a [`KeyValueStorage`]
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn KeyValueStorage>,
    key: String,
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore").field("key", &self.key).finish()
    }
}

impl LocalStore {
    pub fn new(backend: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the stored value
    pub fn save<T: Serialize + ?Sized>(&self, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize value for {}: {}", self.key, e);
                return;
            }
        };

        match self.backend.set(&self.key, &json) {
            Ok(()) => tracing::debug!("Saved {} ({} bytes)", self.key, json.len()),
            Err(e) => tracing::error!("Failed to save {}: {}", self.key, e),
        }
    }

    /// Read the stored value, `None` when absent or unreadable
    pub fn load<T: DeserializeOwned>(&self) -> Option<T> {
        let text = match self.backend.get(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!("Failed to read {}: {}", self.key, e);
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Discarding unreadable value under {}: {}", self.key, e);
                None
            }
        }
    }

    /// Remove the stored value
    pub fn clear(&self) {
        if let Err(e) = self.backend.remove(&self.key) {
            tracing::error!("Failed to clear {}: {}", self.key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage, StorageError};
    use serde_json::{json, Value};
    use std::collections::BTreeMap;

    fn memory_store() -> (Arc<MemoryStorage>, LocalStore) {
        let backend = Arc::new(MemoryStorage::new());
        let store = LocalStore::new(backend.clone(), "state");
        (backend, store)
    }

    /// Reads from an inner storage, refuses every write
    struct ReadOnlyStorage(MemoryStorage);

    impl KeyValueStorage for ReadOnlyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "quota exceeded",
            )))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )))
        }
    }

    #[test]
    fn test_load_on_empty_store_is_absent() {
        let (_, store) = memory_store();
        assert_eq!(store.load::<Value>(), None);
    }

    #[test]
    fn test_save_then_load_yields_same_value() {
        let (_, store) = memory_store();
        let values = [
            json!(null),
            json!(0),
            json!("text"),
            json!([1, 2, 3]),
            json!({"client_id": "c-1", "jobs": [{"title": "Wedding", "price": 50245.5}]}),
        ];
        for value in values {
            let _ = store.load::<Value>();
            store.save(&value);
            assert_eq!(store.load::<Value>(), Some(value));
        }
    }

    #[test]
    fn test_save_replaces_whole_value() {
        let (_, store) = memory_store();
        store.save(&json!({"a": 1, "b": 2}));
        store.save(&json!({"c": 3}));
        assert_eq!(store.load::<Value>(), Some(json!({"c": 3})));
    }

    #[test]
    fn test_clear_then_load_is_absent() {
        let (backend, store) = memory_store();
        store.clear();
        assert_eq!(store.load::<Value>(), None);

        store.save(&json!({"x": true}));
        store.clear();
        assert_eq!(store.load::<Value>(), None);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_corrupt_value_reads_as_absent() {
        let (backend, store) = memory_store();
        backend.set("state", "{not json").unwrap();
        assert_eq!(store.load::<Value>(), None);
    }

    #[test]
    fn test_shape_mismatch_reads_as_absent() {
        let (_, store) = memory_store();
        store.save(&json!("just a string"));
        assert_eq!(store.load::<BTreeMap<String, i32>>(), None);
    }

    #[test]
    fn test_failed_write_keeps_prior_value() {
        let inner = MemoryStorage::new();
        inner.set("state", "{\"v\":1}").unwrap();
        let store = LocalStore::new(Arc::new(ReadOnlyStorage(inner)), "state");

        store.save(&json!({"v": 2}));
        assert_eq!(store.load::<Value>(), Some(json!({"v": 1})));

        // Clear failures are swallowed too
        store.clear();
        assert_eq!(store.load::<Value>(), Some(json!({"v": 1})));
    }

    #[test]
    fn test_unserializable_value_keeps_prior_value() {
        let (_, store) = memory_store();
        store.save(&json!({"v": 1}));

        // JSON object keys must be strings
        let mut bad: BTreeMap<(i32, i32), i32> = BTreeMap::new();
        bad.insert((1, 2), 3);
        store.save(&bad);

        assert_eq!(store.load::<Value>(), Some(json!({"v": 1})));
    }

    #[test]
    fn test_file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let first = LocalStore::new(Arc::new(FileStorage::new(dir.path())), "state");
        first.save(&json!({"client_id": "c-7"}));

        let reopened = LocalStore::new(Arc::new(FileStorage::new(dir.path())), "state");
        assert_eq!(reopened.load::<Value>(), Some(json!({"client_id": "c-7"})));
    }
}
