//! Volatile key/value store.

use std::collections::HashMap;

use crate::error::{Error, Result};

use super::{KeyValueStore, StoreStats};

/// Key/value store held entirely in memory.
///
/// Used for `--ephemeral` runs and in tests. Applies the same quota rule as
/// the `SQLite` backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota_bytes: usize,
}

impl MemoryStore {
    /// Create an empty store without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that refuses to hold more than `quota_bytes`.
    #[must_use]
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota_bytes,
        }
    }

    fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if self.quota_bytes > 0 {
            let replaced = self.entries.get(key).map_or(0, |old| key.len() + old.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > self.quota_bytes {
                return Err(Error::StorageFull {
                    key: key.to_string(),
                    needed,
                    quota: self.quota_bytes,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn clear(&mut self) -> Result<usize> {
        let count = self.entries.len();
        self.entries.clear();
        Ok(count)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            entries: self.entries.len(),
            used_bytes: self.used_bytes(),
            quota_bytes: self.quota_bytes,
            db_size_bytes: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
        assert!(store.remove_item("k").unwrap());
        assert!(store.get_item("k").unwrap().is_none());
    }

    #[test]
    fn test_quota() {
        let mut store = MemoryStore::with_quota(8);
        store.set_item("k", "1234567").unwrap();
        assert!(store.set_item("j", "1").is_err());
        store.set_item("k", "7654321").unwrap();
        assert_eq!(store.stats().unwrap().used_bytes, 8);
    }

    #[test]
    fn test_keys_sorted() {
        let mut store = MemoryStore::new();
        store.set_item("b", "").unwrap();
        store.set_item("a", "").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.clear().unwrap(), 2);
    }
}
