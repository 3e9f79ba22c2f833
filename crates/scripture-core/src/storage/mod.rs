//! Key-value persistence for session state.
//!
//! Sessions keep their state in a scoped string store under the fixed keys in
//! [`config::keys`](crate::config::keys). Values are JSON. The store only has
//! to return the last value written for a key, across restarts if it is
//! durable.
//!
//! # Implementations
//!
//! - [`InMemoryStore`] - process-local map, for tests and ephemeral sessions
//! - `FileStore` - one JSON file per key (in the CLI crate)

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error (filesystem, lock, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// A stored value could not be encoded or decoded
    #[error("Serialization error for {key:?}: {message}")]
    Serialization { key: String, message: String },
}

/// A scoped key-value string store.
///
/// Writes are visible to the next read immediately. Implementations decide
/// durability.
pub trait KeyValueStore {
    /// Returns the value for `key`, or `Ok(None)` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes `key`. Returns `Ok(())` even if the key didn't exist.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Reads and decodes a JSON value.
///
/// Returns `Ok(None)` for a missing key and [`StoreError::Serialization`]
/// when the stored text does not decode as `T`.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StoreError::Serialization {
            key: key.to_string(),
            message: e.to_string(),
        })
}

/// Encodes a value as JSON and writes it.
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|e| StoreError::Serialization {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.set(key, &raw)
}

/// In-memory store that keeps values for the life of the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.read().map(|values| values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self
            .values
            .read()
            .map_err(|e| StoreError::Io(format!("Lock poisoned: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .write()
            .map_err(|e| StoreError::Io(format!("Lock poisoned: {}", e)))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .write()
            .map_err(|e| StoreError::Io(format!("Lock poisoned: {}", e)))?;
        values.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory store whose writes to one key always fail.
    #[derive(Debug)]
    pub(crate) struct FailingStore {
        pub(crate) inner: InMemoryStore,
        fail_key: &'static str,
    }

    impl FailingStore {
        pub(crate) fn failing_on(fail_key: &'static str) -> Self {
            Self {
                inner: InMemoryStore::new(),
                fail_key,
            }
        }
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if key == self.fail_key {
                return Err(StoreError::Io("disk full".to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_get_set_remove() {
        let store = InMemoryStore::new();
        assert!(store.get("bible-translation").unwrap().is_none());

        store.set("bible-translation", "\"kjv\"").unwrap();
        assert_eq!(
            store.get("bible-translation").unwrap().as_deref(),
            Some("\"kjv\"")
        );

        store.set("bible-translation", "\"asv\"").unwrap();
        assert_eq!(
            store.get("bible-translation").unwrap().as_deref(),
            Some("\"asv\"")
        );

        store.remove("bible-translation").unwrap();
        assert!(store.get("bible-translation").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_key() {
        let store = InMemoryStore::new();
        store.remove("nothing").unwrap();
    }

    #[test]
    fn test_json_helpers() {
        let store = InMemoryStore::new();
        save_json(&store, "bible-bookmarks", &vec!["0-0", "1-2"]).unwrap();

        let loaded: Option<Vec<String>> = load_json(&store, "bible-bookmarks").unwrap();
        assert_eq!(loaded, Some(vec!["0-0".to_string(), "1-2".to_string()]));

        let missing: Option<Vec<String>> = load_json(&store, "bible-highlights").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_load_json_reports_corrupt_value() {
        let store = InMemoryStore::new();
        store.set("bible-position", "{not json").unwrap();

        let result: Result<Option<Vec<String>>, _> = load_json(&store, "bible-position");
        match result {
            Err(StoreError::Serialization { key, .. }) => assert_eq!(key, "bible-position"),
            other => panic!("expected serialization error, got {:?}", other),
        }
    }

    #[test]
    fn test_failing_store_only_rejects_its_key() {
        let store = FailingStore::failing_on("bible-position");
        store.set("bible-translation", "asv").unwrap();
        assert!(matches!(
            store.set("bible-position", "{}"),
            Err(StoreError::Io(_))
        ));
        assert_eq!(store.inner.len(), 1);
    }

    #[test]
    fn test_store_through_reference() {
        let store = InMemoryStore::new();
        let borrowed = &store;
        borrowed.set("k", "v").unwrap();
        assert_eq!(store.len(), 1);
    }
}
