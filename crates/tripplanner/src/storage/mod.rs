//! Storage layer for tripplanner.
//!
//! Persistent state is a flat map of string keys to JSON text, like a
//! browser's origin-scoped local storage. Backends implement
//! [`KeyValueStore`]; application code goes through [`LocalStore`], which
//! never lets a storage failure reach the caller.

pub mod memory;
pub mod migrations;
pub mod schema;
pub mod sqlite;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::Result;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// A synchronous, string-keyed text store.
pub trait KeyValueStore {
    /// Read the text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written or the quota would
    /// be exceeded.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<bool>;

    /// Delete every key. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn clear(&mut self) -> Result<usize>;

    /// All stored keys, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn keys(&self) -> Result<Vec<String>>;

    /// Usage statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn stats(&self) -> Result<StoreStats>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<bool> {
        (**self).remove_item(key)
    }

    fn clear(&mut self) -> Result<usize> {
        (**self).clear()
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }

    fn stats(&self) -> Result<StoreStats> {
        (**self).stats()
    }
}

/// Statistics about a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of stored keys.
    pub entries: usize,
    /// Bytes of keys plus values.
    pub used_bytes: usize,
    /// Configured quota, 0 for unlimited.
    pub quota_bytes: usize,
    /// Size of the backing file in bytes, 0 when not file backed.
    pub db_size_bytes: u64,
}

/// Fail-soft JSON adapter over a [`KeyValueStore`].
///
/// Writes that fail are logged and dropped; reads of missing or malformed
/// values come back as `None`. In-memory state stays authoritative either way.
/// Ordinary storage failures such as a full quota log at `warn`; anything
/// else logs at `error`.
#[derive(Debug)]
pub struct LocalStore<S> {
    backend: S,
}

impl<S: KeyValueStore> LocalStore<S> {
    /// Wrap a backend.
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Serialize `value` and store it under `key`.
    ///
    /// Returns whether the value was written.
    pub fn put<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(e) => {
                warn!("Could not serialize value for '{}': {}", key, e);
                return false;
            }
        };
        match self.backend.set_item(key, &text) {
            Ok(()) => {
                debug!("Stored {} bytes under '{}'", text.len(), key);
                true
            }
            Err(e) if e.is_storage_failure() => {
                warn!("Could not store '{}': {}", key, e);
                false
            }
            Err(e) => {
                error!("Unexpected failure storing '{}': {}", key, e);
                false
            }
        }
    }

    /// Read and deserialize the value under `key`.
    ///
    /// Missing keys, unreadable backends and malformed text all yield `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let text = match self.backend.get_item(key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) if e.is_storage_failure() => {
                warn!("Could not read '{}': {}", key, e);
                return None;
            }
            Err(e) => {
                error!("Unexpected failure reading '{}': {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring malformed value under '{}': {}", key, e);
                None
            }
        }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::error::Error;

    /// Backend whose every operation fails.
    #[derive(Debug)]
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::internal("storage disabled"))
        }

        fn set_item(&mut self, key: &str, _value: &str) -> Result<()> {
            Err(Error::StorageFull {
                key: key.to_string(),
                needed: 1,
                quota: 0,
            })
        }

        fn remove_item(&mut self, _key: &str) -> Result<bool> {
            Err(Error::internal("storage disabled"))
        }

        fn clear(&mut self) -> Result<usize> {
            Err(Error::internal("storage disabled"))
        }

        fn keys(&self) -> Result<Vec<String>> {
            Err(Error::internal("storage disabled"))
        }

        fn stats(&self) -> Result<StoreStats> {
            Err(Error::internal("storage disabled"))
        }
    }

    #[test]
    fn test_put_then_get() {
        let mut store = LocalStore::new(MemoryStore::new());
        let mut value = BTreeMap::new();
        value.insert("destination".to_string(), "Kyoto".to_string());

        assert!(store.put("trip", &value));
        let read: BTreeMap<String, String> = store.get("trip").unwrap();
        assert_eq!(read, value);
    }

    #[test]
    fn test_get_missing_is_none() {
        let store = LocalStore::new(MemoryStore::new());
        assert!(store.get::<Vec<String>>("absent").is_none());
    }

    #[test]
    fn test_get_malformed_is_none() {
        let mut backend = MemoryStore::new();
        backend.set_item("trip", "{not json").unwrap();
        let store = LocalStore::new(backend);
        assert!(store.get::<serde_json::Value>("trip").is_none());
    }

    #[test]
    fn test_get_wrong_shape_is_none() {
        let mut backend = MemoryStore::new();
        backend.set_item("flights", r#"{"field0": "x"}"#).unwrap();
        let store = LocalStore::new(backend);
        assert!(store.get::<Vec<String>>("flights").is_none());
    }

    #[test]
    fn test_failures_are_swallowed() {
        assert!(!BrokenStore.get_item("trip").unwrap_err().is_storage_failure());
        let mut store = LocalStore::new(BrokenStore);
        assert!(!store.put("trip", &"value"));
        assert!(store.get::<String>("trip").is_none());
    }

    #[test]
    fn test_quota_failure_keeps_previous_value() {
        let mut backend = MemoryStore::with_quota(16);
        let err = backend.set_item("k", "a value far too long to fit").unwrap_err();
        assert!(err.is_storage_failure());

        let mut store = LocalStore::new(backend);
        assert!(store.put("k", &"short"));
        assert!(!store.put("k", &"a value far too long to fit"));
        assert_eq!(store.get::<String>("k").as_deref(), Some("short"));
    }

    #[test]
    fn test_boxed_backend() {
        let backend: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        let mut store = LocalStore::new(backend);
        assert!(store.put("n", &3));
        assert_eq!(store.get::<i32>("n"), Some(3));
        assert_eq!(store.backend().keys().unwrap(), ["n".to_string()]);
    }
}
