//! Error types for the Gauntlet library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Gauntlet operations.
#[derive(Debug, Error)]
pub enum GauntletError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to validate.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A rule referenced a column absent from the dataset. This is a
    /// caller/configuration bug, not a validation failure.
    #[error("missing expected column '{column}'")]
    MissingColumn { column: String },

    /// A structured-field cell could not be decoded as JSON.
    #[error("column '{column}', row {row}: undecodable JSON: {source}")]
    Decode {
        column: String,
        row: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A cell holds a value of the wrong primitive type for the rule.
    #[error("column '{column}', row {row}: expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        row: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GauntletError {
    /// Whether a batch run may record this error and continue with the next
    /// rule. Malformed-input errors are recoverable per rule; schema and IO
    /// errors abort the batch.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GauntletError::Decode { .. } | GauntletError::TypeMismatch { .. }
        )
    }
}

/// Result type alias for Gauntlet operations.
pub type Result<T> = std::result::Result<T, GauntletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        let decode = GauntletError::Decode {
            column: "sku".to_string(),
            row: 2,
            source: serde_json::from_str::<serde_json::Value>("{oops").unwrap_err(),
        };
        assert!(decode.is_recoverable());

        let missing = GauntletError::MissingColumn {
            column: "poc_id".to_string(),
        };
        assert!(!missing.is_recoverable());
    }

    #[test]
    fn test_missing_column_message() {
        let err = GauntletError::MissingColumn {
            column: "banner_name".to_string(),
        };
        assert_eq!(err.to_string(), "missing expected column 'banner_name'");
    }
}
