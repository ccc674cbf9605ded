//! Shared error types for conflict analysis

use crate::ingest::LogicalField;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Stable error code for documentation and programmatic handling.
///
/// - E001-E009: I/O errors
/// - E010-E019: Input errors
/// - E020-E029: Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error - generic
    pub const IO_GENERIC: ErrorCode = ErrorCode("E001");
    /// Input error - mandatory column unresolved
    pub const INPUT_SCHEMA: ErrorCode = ErrorCode("E010");
    /// Input error - no usable data rows
    pub const INPUT_EMPTY: ErrorCode = ErrorCode("E011");
    /// Config error - invalid value or file
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Main error type for conflict analysis operations
#[derive(Debug, Error)]
pub enum ConflictError {
    /// One or more mandatory logical fields could not be mapped to a header column
    #[error("Schema error: missing required column(s): {}", format_fields(.missing))]
    Schema { missing: Vec<LogicalField> },

    /// Header present but no row survived filtering
    #[error("No usable data in {source_name}: every row is missing a story or component id")]
    EmptyInput { source_name: String },

    /// File system errors at the loading boundary
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

fn format_fields(fields: &[LogicalField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ConflictError {
    pub fn schema(missing: Vec<LogicalField>) -> Self {
        Self::Schema { missing }
    }

    pub fn empty_input(source_name: impl Into<String>) -> Self {
        Self::EmptyInput {
            source_name: source_name.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Schema { .. } => ErrorCode::INPUT_SCHEMA,
            Self::EmptyInput { .. } => ErrorCode::INPUT_EMPTY,
            Self::Io { .. } => ErrorCode::IO_GENERIC,
            Self::Config(_) => ErrorCode::CONFIG_INVALID,
        }
    }

    /// Whether the user can fix this by correcting their export or config.
    #[must_use]
    pub fn is_user_fixable(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, ConflictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_names_every_missing_field() {
        let err = ConflictError::schema(vec![LogicalField::StoryId, LogicalField::ComponentId]);
        let msg = err.to_string();
        assert!(msg.contains("story_id"));
        assert!(msg.contains("component_id"));
        assert_eq!(err.code(), ErrorCode::INPUT_SCHEMA);
    }

    #[test]
    fn io_errors_are_not_user_fixable() {
        let err = ConflictError::io(
            "missing.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(!err.is_user_fixable());
        assert_eq!(err.code().as_str(), "E001");
        assert!(ConflictError::empty_input("deployment").is_user_fixable());
    }
}
