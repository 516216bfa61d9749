//! Loading seed files into collections
//!
//! For every seed file: parse it, clear the target collection, then normalize
//! and insert its entries one at a time. Failures are logged and recorded;
//! nothing is rolled back.

pub mod config;
pub mod report;
pub mod stats;

pub use config::SeedConfig;
pub use report::{CollectionOutcome, CollectionReport, DocumentFailure};
pub use stats::SeedStatistics;

use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::error::{DocumentError, SeedError, SeedResult};
use crate::normalize::normalize;
use crate::parser::directory::discover;
use crate::parser::SeedFile;
use crate::store::{to_document, DocumentStore};

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct SeedSummary {
    pub reports: Vec<CollectionReport>,
    pub statistics: SeedStatistics,
}

impl SeedSummary {
    pub fn new(reports: Vec<CollectionReport>, elapsed: Duration) -> Self {
        let statistics = SeedStatistics::from_reports(&reports, elapsed);
        Self {
            reports,
            statistics,
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.statistics.is_clean()
    }

    pub fn report(&self, collection: &str) -> Option<&CollectionReport> {
        self.reports.iter().find(|r| r.collection == collection)
    }
}

/// Seeds collections of a [`DocumentStore`] from seed files
pub struct Seeder<S> {
    store: S,
    config: SeedConfig,
}

impl<S: DocumentStore> Seeder<S> {
    pub fn new(store: S, config: SeedConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back, e.g. to close it
    pub fn into_store(self) -> S {
        self.store
    }

    /// Seed every collection that has a seed file in the configured directory.
    ///
    /// Per-collection problems are recorded in the summary unless
    /// `stop_on_error` is set, in which case the first one aborts the run.
    pub async fn seed_directory(&self) -> SeedResult<SeedSummary> {
        let started = Instant::now();
        let dir = &self.config.seed_dir;

        let files = discover(dir, &self.config.prefix, self.config.recursive)
            .map_err(|e| SeedError::discovery(dir.clone(), &e))?;

        if files.is_empty() {
            warn!(
                dir = %dir.display(),
                prefix = %self.config.prefix,
                "no {}*.json files found",
                self.config.prefix
            );
            return Ok(SeedSummary::new(Vec::new(), started.elapsed()));
        }

        let names: Vec<String> = files.iter().map(SeedFile::file_name).collect();
        info!(count = files.len(), files = ?names, "seed files found");

        let mut reports = Vec::with_capacity(files.len());
        for file in &files {
            let report = self.seed_collection(file).await;
            if self.config.stop_on_error {
                if let Some(message) = report.first_error() {
                    return Err(SeedError::aborted(&report.collection, message));
                }
            }
            reports.push(report);
        }

        info!("all collections processed");
        Ok(SeedSummary::new(reports, started.elapsed()))
    }

    /// Replace the contents of `file.collection` with the entries of `file`.
    ///
    /// Never fails: problems end up in the returned report.
    pub async fn seed_collection(&self, file: &SeedFile) -> CollectionReport {
        let started = Instant::now();
        let mut report = CollectionReport::new(&file.collection, file.path.clone());
        self.load_collection(file, &mut report).await;
        report.elapsed_ms = started.elapsed().as_millis() as u64;
        report
    }

    async fn load_collection(&self, file: &SeedFile, report: &mut CollectionReport) {
        let collection = file.collection.as_str();

        if !file.path.is_file() {
            error!(collection, path = %file.path.display(), "seed file not found");
            report.fail(format!("seed file not found: {}", file.path.display()));
            return;
        }
        info!(collection, path = %file.path.display(), "seed file found");

        let entries = match file.parse() {
            Ok(Value::Array(entries)) if !entries.is_empty() => entries,
            Ok(Value::Array(_)) => {
                warn!(collection, "seed file is empty, collection left untouched");
                report.skip("empty array");
                return;
            }
            Ok(other) => {
                warn!(
                    collection,
                    found = json_kind(&other),
                    "seed file is not an array, collection left untouched"
                );
                report.skip(format!("expected an array, found {}", json_kind(&other)));
                return;
            }
            Err(e) => {
                error!(collection, error = %e, "cannot load seed file");
                report.fail(e.to_string());
                return;
            }
        };

        match self.store.clear(collection).await {
            Ok(deleted) => {
                report.deleted = deleted;
                info!(collection, deleted, "collection cleared");
            }
            Err(e) => {
                error!(collection, error = %e, "cannot clear collection");
                report.fail(e.to_string());
                return;
            }
        }

        report.attempted = entries.len();
        for (position, entry) in entries.iter().enumerate() {
            let index = position + 1;
            match self.insert_entry(collection, entry).await {
                Ok(()) => {
                    report.inserted += 1;
                    debug!(collection, doc = index, "document inserted");
                }
                Err(e) => {
                    error!(collection, doc = index, error = %e, "document not inserted");
                    report.failures.push(DocumentFailure {
                        index,
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            collection,
            inserted = report.inserted,
            attempted = report.attempted,
            "{}: {}/{} documents inserted",
            collection,
            report.inserted,
            report.attempted
        );
    }

    async fn insert_entry(&self, collection: &str, entry: &Value) -> Result<(), DocumentError> {
        let document = to_document(normalize(entry)?)?;
        self.store.insert(collection, document).await?;
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
