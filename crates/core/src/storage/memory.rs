use super::{check_quota, KeyValueStore, StorageError};
use std::collections::HashMap;
use std::sync::Mutex;

/// Process-local store. Optionally enforces a per-value byte quota.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            slots: Mutex::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn lock(
        &self,
        op: &'static str,
        key: &str,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.slots
            .lock()
            .map_err(|_| StorageError::new(op, key, "memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock("read", key)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(key, value, self.quota_bytes)?;
        self.lock("write", key)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock("remove", key)?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn quota_rejects_without_touching_slot() {
        let store = MemoryStore::with_quota(4);
        store.set("k", "abc").unwrap();
        let err = store.set("k", "abcdef").unwrap_err();
        assert_eq!(err.op, "write");
        assert_eq!(store.get("k").unwrap().as_deref(), Some("abc"));
    }
}
