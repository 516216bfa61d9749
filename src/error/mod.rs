//! Error types and handling infrastructure for seeding

use std::fmt;
use std::path::PathBuf;

/// Failure of the extended-JSON normalizer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("Invalid $date literal {literal}: {reason}")]
    InvalidDateLiteral { literal: String, reason: String },
}

impl NormalizeError {
    pub fn invalid_date(literal: &serde_json::Value, reason: impl Into<String>) -> Self {
        Self::InvalidDateLiteral {
            literal: literal.to_string(),
            reason: reason.into(),
        }
    }
}

/// Document store failures
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("{operation} on '{collection}' failed: {message}")]
    Operation {
        operation: &'static str,
        collection: String,
        message: String,
    },

    #[error("Top-level {kind} is not a document")]
    NotADocument { kind: &'static str },

    #[error("_id {value:?} is not a 24-digit hex ObjectId")]
    InvalidObjectId { value: String },
}

impl StoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn operation(
        operation: &'static str,
        collection: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::Operation {
            operation,
            collection: collection.to_string(),
            message: message.into(),
        }
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(error: mongodb::error::Error) -> Self {
        Self::Connection {
            message: error.to_string(),
        }
    }
}

/// Why a single document could not be inserted
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Main error type for seeding operations
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Cannot list seed files in {}: {message}", .path.display())]
    Discovery { path: PathBuf, message: String },

    #[error("Seeding aborted at '{collection}': {message}")]
    Aborted { collection: String, message: String },
}

impl SeedError {
    pub fn parse(message: String, location: Option<(usize, usize)>) -> Self {
        Self::ParseError(ParseError::new(message, location))
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn discovery(path: PathBuf, error: &std::io::Error) -> Self {
        Self::Discovery {
            path,
            message: error.to_string(),
        }
    }

    pub fn aborted(collection: &str, message: impl Into<String>) -> Self {
        Self::Aborted {
            collection: collection.to_string(),
            message: message.into(),
        }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::ParseError(err) => {
                if let Some((line, col)) = err.location {
                    format!(
                        "JSON parse error at line {}, column {}: {}",
                        line, col, err.message
                    )
                } else {
                    format!("JSON parse error: {}", err.message)
                }
            }
            Self::Store(StoreError::Connection { message }) => {
                format!("Could not connect to the database: {}", message)
            }
            Self::Store(err) => format!("Database error: {}", err),
            Self::Configuration { message } => format!("Configuration error: {}", message),
            Self::Discovery { .. } | Self::Aborted { .. } => self.to_string(),
        }
    }
}

/// JSON parsing errors
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub location: Option<(usize, usize)>,
    pub input_preview: Option<String>,
}

impl ParseError {
    pub fn new(message: String, location: Option<(usize, usize)>) -> Self {
        Self {
            message,
            location,
            input_preview: None,
        }
    }

    pub fn with_preview(mut self, preview: String) -> Self {
        self.input_preview = Some(preview);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Result type for seeding operations
pub type SeedResult<T> = Result<T, SeedError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Convenience result type for normalization
pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// Convenience result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
