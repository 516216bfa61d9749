//! Configuration options for a seeding run

use std::path::PathBuf;

use crate::parser::DEFAULT_PREFIX;

/// Seeding configuration options
#[derive(Debug, Clone, PartialEq)]
pub struct SeedConfig {
    /// Directory holding the seed files
    pub seed_dir: PathBuf,
    /// File name prefix of seed files
    pub prefix: String,
    /// Look for seed files in subdirectories too
    pub recursive: bool,
    /// Abort the run at the first failed collection or document
    pub stop_on_error: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            seed_dir: PathBuf::from("."),
            prefix: DEFAULT_PREFIX.to_string(),
            recursive: false,
            stop_on_error: false,
        }
    }
}

impl SeedConfig {
    /// Create a new configuration for a seed directory
    pub fn new(seed_dir: impl Into<PathBuf>) -> Self {
        Self {
            seed_dir: seed_dir.into(),
            ..Self::default()
        }
    }

    /// Builder pattern methods
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_stop_on_error(mut self, stop_on_error: bool) -> Self {
        self.stop_on_error = stop_on_error;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.prefix.is_empty() {
            return Err("Seed file prefix must not be empty".to_string());
        }

        if self.prefix.contains(std::path::MAIN_SEPARATOR) || self.prefix.contains('/') {
            return Err(format!(
                "Seed file prefix '{}' must not contain a path separator",
                self.prefix
            ));
        }

        if !self.seed_dir.is_dir() {
            return Err(format!(
                "Seed directory does not exist: {}",
                self.seed_dir.display()
            ));
        }

        Ok(())
    }
}
