//! Named-slot key-value persistence, the equivalent of a browser's local storage.
//! Values are whole strings; a `set` either replaces the slot entirely or leaves
//! it untouched.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::fmt;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageError {
    pub op: &'static str,
    pub key: String,
    pub detail: String,
}

impl StorageError {
    pub fn new(op: &'static str, key: &str, detail: impl fmt::Display) -> Self {
        Self {
            op,
            key: key.to_string(),
            detail: detail.to_string(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "storage error (op={}, key={}): {}",
            self.op, self.key, self.detail
        )
    }
}

impl std::error::Error for StorageError {}

fn check_quota(key: &str, value: &str, quota_bytes: Option<usize>) -> Result<(), StorageError> {
    match quota_bytes {
        Some(limit) if value.len() > limit => Err(StorageError::new(
            "write",
            key,
            format!("quota exceeded ({} > {limit} bytes)", value.len()),
        )),
        _ => Ok(()),
    }
}
