//! Session history of completed analyses.
//!
//! The store is append-only and lives as long as the process: entries are
//! never removed and there is no capacity bound, so memory grows with every
//! completed request. Share it between the pipeline and a front end through an
//! `Arc<HistoryStore>`; appends take the write lock and reads the read lock.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::models::HistoryEntry;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// `index` is zero-based; the message numbers entries from 1 like the listing
    #[error("no history entry {} ({len} entries)", .index + 1)]
    NotFound { index: usize, len: usize },
}

#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: RwLock<Vec<HistoryEntry>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-written entry behind
    // (push either happened or not), so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, Vec<HistoryEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<HistoryEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an entry; returns its index
    pub fn append(&self, entry: HistoryEntry) -> usize {
        let mut entries = self.write();
        entries.push(entry);
        entries.len() - 1
    }

    /// Snapshot of all entries, oldest first
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.read().clone()
    }

    pub fn get(&self, index: usize) -> Result<HistoryEntry, HistoryError> {
        let entries = self.read();
        entries.get(index).cloned().ok_or(HistoryError::NotFound { index, len: entries.len() })
    }

    /// Most recent entry
    pub fn last(&self) -> Option<HistoryEntry> {
        self.read().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
