use super::{check_quota, KeyValueStore, StorageError};
use std::io::ErrorKind;
use std::path::PathBuf;

/// One file per slot under a directory. Writes go to a sibling temp file and are
/// renamed into place, so readers see either the old or the new value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quota_bytes: None,
        }
    }

    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }

    fn slot_path(&self, op: &'static str, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::new(op, key, "invalid slot name"));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path("read", key)?;
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::new(
                "read",
                key,
                format!("read {}: {e}", path.display()),
            )),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path("write", key)?;
        check_quota(key, value, self.quota_bytes)?;

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            StorageError::new(
                "write",
                key,
                format!("create_dir_all {}: {e}", self.dir.display()),
            )
        })?;

        let tmp = path.with_extension("json.tmp");
        if let Err(e) = std::fs::write(&tmp, value) {
            let _ = std::fs::remove_file(&tmp);
            return Err(StorageError::new(
                "write",
                key,
                format!("write {}: {e}", tmp.display()),
            ));
        }
        std::fs::rename(&tmp, &path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            StorageError::new("write", key, format!("rename {}: {e}", path.display()))
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path("remove", key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::new(
                "remove",
                key,
                format!("remove {}: {e}", path.display()),
            )),
        }
    }
}
