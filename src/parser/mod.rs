//! Seed file discovery and JSON parsing

pub mod directory;
pub mod filter;

use crate::error::{ParseError, ParseResult};
use std::path::{Path, PathBuf};

/// Default file name prefix of seed files
pub const DEFAULT_PREFIX: &str = "golazodb.";

/// A seed file paired with the collection it loads into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFile {
    pub path: PathBuf,
    pub collection: String,
}

impl SeedFile {
    /// Build from a path, deriving the collection name from the file name
    pub fn from_path(path: PathBuf, prefix: &str) -> Option<Self> {
        let collection = filter::collection_name(&path, prefix)?;
        Some(Self { path, collection })
    }

    /// File name for log lines
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Read and parse the file
    pub fn parse(&self) -> ParseResult<serde_json::Value> {
        parse_seed_file(&self.path)
    }
}

/// Read a seed file and parse it as JSON
pub fn parse_seed_file(path: &Path) -> ParseResult<serde_json::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ParseError::new(
            format!("Failed to read {}: {}", path.display(), e),
            None,
        )
    })?;

    parse_from_string(&content)
}

/// Parse JSON from a string
pub fn parse_from_string(content: &str) -> ParseResult<serde_json::Value> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if content.trim().is_empty() {
        return Err(ParseError::new("Empty JSON input".to_string(), None));
    }

    serde_json::from_str(content).map_err(|e| {
        ParseError::new(format!("Invalid JSON: {}", e), error_location(&e))
            .with_preview(error_preview(content, &e))
    })
}

/// Line and column reported by serde_json, when it has one
fn error_location(error: &serde_json::Error) -> Option<(usize, usize)> {
    match (error.line(), error.column()) {
        (0, _) => None,
        (line, column) => Some((line, column)),
    }
}

/// The offending line with a caret under the error column
fn error_preview(content: &str, error: &serde_json::Error) -> String {
    if let Some((line, col)) = error_location(error) {
        if let Some(error_line) = content.lines().nth(line - 1) {
            let caret = col.saturating_sub(1).min(error_line.chars().count());
            return format!("{}\n{}^", error_line, " ".repeat(caret));
        }
    }

    "Context not available".to_string()
}
