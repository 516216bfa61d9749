//! Statistics for seeding runs

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::seeding::report::{CollectionOutcome, CollectionReport};

/// Totals over one seeding run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedStatistics {
    /// Seed files found in the seed directory
    pub files_found: usize,
    /// Collections cleared and loaded
    pub collections_seeded: usize,
    /// Collections left alone because their file was empty or not an array
    pub collections_skipped: usize,
    /// Collections that could not be processed
    pub collections_failed: usize,
    /// Documents removed while clearing collections
    pub documents_deleted: u64,
    /// Documents read from seed files
    pub documents_attempted: usize,
    /// Documents stored
    pub documents_inserted: usize,
    /// Documents rejected by normalization or the store
    pub documents_failed: usize,
    /// Wall time of the run in milliseconds
    pub processing_time_ms: u64,
    /// Inserted documents per second
    pub throughput_docs_per_sec: f32,
    /// Timestamp of when statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl Default for SeedStatistics {
    fn default() -> Self {
        Self {
            files_found: 0,
            collections_seeded: 0,
            collections_skipped: 0,
            collections_failed: 0,
            documents_deleted: 0,
            documents_attempted: 0,
            documents_inserted: 0,
            documents_failed: 0,
            processing_time_ms: 0,
            throughput_docs_per_sec: 0.0,
            collected_at: chrono::Utc::now(),
        }
    }
}

impl SeedStatistics {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate per-collection reports
    pub fn from_reports(reports: &[CollectionReport], elapsed: Duration) -> Self {
        let mut stats = Self {
            files_found: reports.len(),
            ..Self::default()
        };

        for report in reports {
            match report.outcome {
                CollectionOutcome::Seeded => stats.collections_seeded += 1,
                CollectionOutcome::Skipped { .. } => stats.collections_skipped += 1,
                CollectionOutcome::Failed { .. } => stats.collections_failed += 1,
            }
            stats.documents_deleted += report.deleted;
            stats.documents_attempted += report.attempted;
            stats.documents_inserted += report.inserted;
            stats.documents_failed += report.failures.len();
        }

        stats.processing_time_ms = elapsed.as_millis() as u64;
        stats.throughput_docs_per_sec = if elapsed.as_secs_f64() > 0.0 {
            (stats.documents_inserted as f64 / elapsed.as_secs_f64()) as f32
        } else {
            0.0
        };

        stats
    }

    /// Percentage of attempted documents that were stored
    pub fn success_rate(&self) -> f32 {
        if self.documents_attempted == 0 {
            100.0
        } else {
            self.documents_inserted as f32 / self.documents_attempted as f32 * 100.0
        }
    }

    /// True when nothing failed
    pub fn is_clean(&self) -> bool {
        self.collections_failed == 0 && self.documents_failed == 0
    }

    /// One line summary
    pub fn summary_line(&self) -> String {
        format!(
            "{} collection(s) seeded, {} skipped, {} failed; {}/{} documents inserted",
            self.collections_seeded,
            self.collections_skipped,
            self.collections_failed,
            self.documents_inserted,
            self.documents_attempted
        )
    }

    /// Get a detailed report
    pub fn detailed_report(&self) -> String {
        format!(
            "Seeding Statistics:\n\
             - Seed files: {}\n\
             - Collections seeded: {}\n\
             - Collections skipped: {}\n\
             - Collections failed: {}\n\
             - Documents deleted: {}\n\
             - Documents inserted: {}/{} ({:.1}%)\n\
             - Documents failed: {}\n\
             - Processing time: {}ms\n\
             - Throughput: {:.1} docs/s\n\
             - Collected at: {}",
            self.files_found,
            self.collections_seeded,
            self.collections_skipped,
            self.collections_failed,
            self.documents_deleted,
            self.documents_inserted,
            self.documents_attempted,
            self.success_rate(),
            self.documents_failed,
            self.processing_time_ms,
            self.throughput_docs_per_sec,
            self.collected_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}
