//! In-process verdict store.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use adv_core::entities::Verdict;

use crate::DocumentStore;
use crate::error::StoreError;

/// Keeps verdicts in memory with last-write-wins semantics per id.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    documents: HashMap<String, Verdict>,
    /// Ids in the order they were upserted (repeats included).
    writes: Vec<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct documents held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total upserts received, including overwrites.
    #[must_use]
    pub fn upsert_count(&self) -> usize {
        self.lock().writes.len()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Verdict> {
        self.lock().documents.get(id).cloned()
    }

    /// Current documents in first-write order.
    #[must_use]
    pub fn documents(&self) -> Vec<Verdict> {
        let inner = self.lock();
        let mut seen = std::collections::HashSet::new();
        inner
            .writes
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| inner.documents.get(id).cloned())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentStore for MemoryStore {
    async fn upsert(&self, verdict: &Verdict) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.writes.push(verdict.id.clone());
        inner.documents.insert(verdict.id.clone(), verdict.clone());
        Ok(())
    }
}
