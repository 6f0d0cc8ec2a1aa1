//! Bounded, newest-first log of past analyses, persisted as one JSON list in a
//! single key-value slot. Every mutation rewrites the whole slot.
//!
//! Storage failures never reach the caller: they are logged and the operation
//! degrades (empty list on read, non-durable entry on write).

use crate::domain::{Report, Sections};
use crate::storage::{KeyValueStore, StorageError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const MAX_HISTORY: usize = 50;
pub const HISTORY_STORAGE_KEY: &str = "startup_validator_history";

/// Immutable snapshot of a past report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub idea: String,
    #[serde(rename = "results")]
    pub sections: Sections,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// An owned copy for the current-result slot; later edits to it never reach
    /// the stored entry.
    pub fn to_report(&self) -> Report {
        Report {
            idea: self.idea.clone(),
            sections: self.sections.clone(),
        }
    }
}

/// Clones share the slot and the mutation lock, so a read-modify-write never
/// interleaves with another one from any clone.
#[derive(Clone)]
pub struct HistoryStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
    capacity: usize,
    mutation: Arc<Mutex<()>>,
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("key", &self.key)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl HistoryStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            key: HISTORY_STORAGE_KEY.to_string(),
            capacity: MAX_HISTORY,
            mutation: Arc::default(),
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn append(&self, idea: &str, sections: &Sections) -> HistoryEntry {
        self.append_at(idea, sections, Utc::now())
    }

    pub fn append_at(&self, idea: &str, sections: &Sections, now: DateTime<Utc>) -> HistoryEntry {
        let _held = self.lock_mutation();
        let existing = self.read();

        let mut id_ms = now.timestamp_millis();
        if let Some(head) = existing.as_ref().ok().and_then(|e| e.front()) {
            if let Ok(head_ms) = head.id.parse::<i64>() {
                id_ms = id_ms.max(head_ms + 1);
            }
        }

        let entry = HistoryEntry {
            id: id_ms.to_string(),
            idea: idea.trim().to_string(),
            sections: sections.clone(),
            created_at: now,
        };

        let mut entries = match existing {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!(error = %err, id = %entry.id, "history read failed; entry not persisted");
                return entry;
            }
        };

        entries.push_front(entry.clone());
        let evicted = entries.len().saturating_sub(self.capacity);
        entries.truncate(self.capacity);

        match self.write(&entries) {
            Ok(()) => {
                tracing::debug!(id = %entry.id, len = entries.len(), evicted, "history entry appended");
            }
            Err(err) => {
                tracing::error!(error = %err, id = %entry.id, "history write failed; entry not persisted");
            }
        }
        entry
    }

    /// Newest first. Empty when the slot cannot be read.
    pub fn list(&self) -> Vec<HistoryEntry> {
        match self.read() {
            Ok(entries) => entries.into(),
            Err(err) => {
                tracing::error!(error = %err, "history read failed; treating as empty");
                Vec::new()
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<HistoryEntry> {
        self.list().into_iter().find(|e| e.id == id)
    }

    pub fn remove(&self, id: &str) {
        let _held = self.lock_mutation();
        let mut entries = match self.read() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!(error = %err, %id, "history read failed; delete skipped");
                return;
            }
        };

        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return;
        }

        if let Err(err) = self.write(&entries) {
            tracing::error!(error = %err, %id, "history write failed; delete not persisted");
        }
    }

    /// Unconditional; confirmation belongs to the caller.
    pub fn clear(&self) {
        let _held = self.lock_mutation();
        if let Err(err) = self.kv.remove(&self.key) {
            tracing::error!(error = %err, "history clear failed");
        }
    }

    fn lock_mutation(&self) -> MutexGuard<'_, ()> {
        self.mutation.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> Result<VecDeque<HistoryEntry>, StorageError> {
        let Some(raw) = self.kv.get(&self.key)? else {
            return Ok(VecDeque::new());
        };
        match serde_json::from_str::<VecDeque<HistoryEntry>>(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                // A corrupt slot is replaced on the next successful write.
                tracing::warn!(error = %err, key = %self.key, "history slot is not a valid entry list");
                Ok(VecDeque::new())
            }
        }
    }

    fn write(&self, entries: &VecDeque<HistoryEntry>) -> Result<(), StorageError> {
        let json = serde_json::to_string(entries)
            .map_err(|e| StorageError::new("write", &self.key, e))?;
        self.kv.set(&self.key, &json)
    }
}
