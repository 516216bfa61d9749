use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use bson::Document;

use crate::error::{StoreError, StoreResult};
use crate::store::DocumentStore;

type RejectFn = Box<dyn Fn(&Document) -> bool + Send + Sync>;

/// In-process store. Backs `--dry-run` and the test suite.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
    reject: Option<RejectFn>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `insert` fail for every document matching `predicate`
    pub fn reject_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Document) -> bool + Send + Sync + 'static,
    {
        self.reject = Some(Box::new(predicate));
        self
    }

    /// Pre-populate a collection, as if an earlier run had filled it
    pub fn seed_existing(&self, collection: &str, documents: Vec<Document>) {
        self.lock()
            .entry(collection.to_string())
            .or_default()
            .extend(documents);
    }

    /// Snapshot of a collection's documents in insertion order
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.lock().get(collection).cloned().unwrap_or_default()
    }

    pub fn collection_names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    pub fn total_documents(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Vec<Document>>> {
        // a panic elsewhere leaves plain data behind; keep using it
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("collections", &self.collection_names())
            .field("rejecting", &self.reject.is_some())
            .finish()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn describe(&self) -> String {
        "in-memory store".to_string()
    }

    async fn clear(&self, collection: &str) -> StoreResult<u64> {
        let removed = self
            .lock()
            .get_mut(collection)
            .map(|documents| documents.drain(..).count())
            .unwrap_or(0);
        Ok(removed as u64)
    }

    async fn insert(&self, collection: &str, document: Document) -> StoreResult<()> {
        if self.reject.as_ref().is_some_and(|reject| reject(&document)) {
            return Err(StoreError::operation(
                "insert",
                collection,
                "document rejected by store",
            ));
        }
        self.lock()
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn close(self) -> StoreResult<()> {
        Ok(())
    }
}
