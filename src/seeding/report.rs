use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a collection fared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CollectionOutcome {
    /// Cleared and loaded; individual documents may still have failed
    Seeded,
    /// File was empty or not an array; the collection was not touched
    Skipped { reason: String },
    /// File could not be read or parsed, or the collection could not be cleared
    Failed { error: String },
}

/// A document that did not make it into its collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFailure {
    /// 1-based position in the seed file
    pub index: usize,
    pub message: String,
}

/// Result of seeding one collection from one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionReport {
    pub collection: String,
    pub path: PathBuf,
    pub outcome: CollectionOutcome,
    pub deleted: u64,
    pub attempted: usize,
    pub inserted: usize,
    pub failures: Vec<DocumentFailure>,
    pub elapsed_ms: u64,
}

impl CollectionReport {
    pub fn new(collection: impl Into<String>, path: PathBuf) -> Self {
        Self {
            collection: collection.into(),
            path,
            outcome: CollectionOutcome::Seeded,
            deleted: 0,
            attempted: 0,
            inserted: 0,
            failures: Vec::new(),
            elapsed_ms: 0,
        }
    }

    pub fn is_seeded(&self) -> bool {
        self.outcome == CollectionOutcome::Seeded
    }

    /// The first thing that went wrong, if anything did
    pub fn first_error(&self) -> Option<String> {
        match &self.outcome {
            CollectionOutcome::Failed { error } => Some(error.clone()),
            _ => self
                .failures
                .first()
                .map(|failure| format!("document #{}: {}", failure.index, failure.message)),
        }
    }

    pub(crate) fn skip(&mut self, reason: impl Into<String>) {
        self.outcome = CollectionOutcome::Skipped {
            reason: reason.into(),
        };
    }

    pub(crate) fn fail(&mut self, error: impl Into<String>) {
        self.outcome = CollectionOutcome::Failed {
            error: error.into(),
        };
    }
}
