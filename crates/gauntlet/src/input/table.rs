//! Cell values, the in-memory dataset, and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GauntletError, Result};

/// Tokens that represent a missing value in uploaded data.
const NULL_TOKENS: &[&str] = &["na", "n/a", "null", "none", "nil", ".", "-"];

static NULL_CELL: Cell = Cell::Null;

/// A dynamically-typed cell value.
///
/// `Null` and `Nan` are distinct sentinels: `Null` is an absent value,
/// `Nan` is the explicit not-a-number marker some exports write out.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing value.
    Null,
    /// Explicit not-a-number marker.
    Nan,
    /// Boolean flag.
    Bool(bool),
    /// Whole number.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Text value.
    Str(String),
    /// Decoded list of identifiers (structured-field columns, post-decode).
    List(Vec<String>),
}

impl Cell {
    /// Parse a raw field from an uploaded file into a typed cell.
    pub fn parse(raw: &str) -> Cell {
        let trimmed = raw.trim();
        if trimmed.is_empty() || NULL_TOKENS.iter().any(|t| trimmed.eq_ignore_ascii_case(t)) {
            return Cell::Null;
        }
        if trimmed.eq_ignore_ascii_case("nan") {
            return Cell::Nan;
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Cell::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Cell::Bool(false);
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Cell::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return Cell::Float(f);
        }
        Cell::Str(trimmed.to_string())
    }

    /// Whether this cell is the missing-value sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Whether this cell is the not-a-number marker.
    pub fn is_nan(&self) -> bool {
        matches!(self, Cell::Nan)
    }

    /// Render the cell the way it would appear in a report message.
    pub fn display(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Nan => "nan".to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => f.to_string(),
            Cell::Str(s) => s.clone(),
            Cell::List(items) => format!("[{}]", items.join(", ")),
        }
    }

    /// Name of the cell's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Cell::Null => "null",
            Cell::Nan => "nan",
            Cell::Bool(_) => "boolean",
            Cell::Int(_) => "integer",
            Cell::Float(_) => "float",
            Cell::Str(_) => "string",
            Cell::List(_) => "list",
        }
    }
}

/// Represents one parsed tabular upload.
///
/// The column set is fixed for the lifetime of a validation session and the
/// validator never adds or removes rows. Two documented in-place
/// normalizations are permitted: [`Dataset::coerce_string`] and the
/// structured-field JSON decode performed by the sku rule.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<Cell>>,
}

impl Dataset {
    /// Create a new dataset.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Resolve a column name to its index, failing fast when the column is
    /// absent from the upload.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| GauntletError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Whether the dataset carries a column with the given name.
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Iterate over all values of a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Cell> {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&NULL_CELL))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Replace a specific cell value.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(slot) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = cell;
        }
    }

    /// Normalize a column's cell representation to strings in place.
    ///
    /// `Null`, `Nan`, and already-decoded `List` cells are left unchanged.
    pub fn coerce_string(&mut self, index: usize) {
        for row in &mut self.rows {
            if let Some(cell) = row.get_mut(index) {
                match cell {
                    Cell::Null | Cell::Nan | Cell::Str(_) | Cell::List(_) => {}
                    other => *other = Cell::Str(other.display()),
                }
            }
        }
    }
}

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, csv-semicolon, tsv, ...).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the validation run started.
    pub validated_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a parsed upload.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            validated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_null_tokens() {
        assert_eq!(Cell::parse(""), Cell::Null);
        assert_eq!(Cell::parse("  "), Cell::Null);
        assert_eq!(Cell::parse("NA"), Cell::Null);
        assert_eq!(Cell::parse("n/a"), Cell::Null);
        assert_eq!(Cell::parse("NULL"), Cell::Null);
        assert_eq!(Cell::parse("-"), Cell::Null);
    }

    #[test]
    fn test_parse_nan_is_distinct_from_null() {
        assert_eq!(Cell::parse("nan"), Cell::Nan);
        assert_eq!(Cell::parse("NaN"), Cell::Nan);
        assert_ne!(Cell::parse("nan"), Cell::Null);
    }

    #[test]
    fn test_parse_typed_values() {
        assert_eq!(Cell::parse("42"), Cell::Int(42));
        assert_eq!(Cell::parse("-3"), Cell::Int(-3));
        assert_eq!(Cell::parse("2.5"), Cell::Float(2.5));
        assert_eq!(Cell::parse("True"), Cell::Bool(true));
        assert_eq!(Cell::parse("false"), Cell::Bool(false));
        assert_eq!(Cell::parse("AB1234"), Cell::Str("AB1234".to_string()));
    }

    #[test]
    fn test_column_index_missing() {
        let dataset = Dataset::new(vec!["poc_id".to_string()], vec![vec![Cell::Int(1)]]);
        assert!(dataset.column_index("poc_id").is_ok());
        let err = dataset.column_index("banner_name").unwrap_err();
        assert!(matches!(err, GauntletError::MissingColumn { .. }));
    }

    #[test]
    fn test_coerce_string() {
        let mut dataset = Dataset::new(
            vec!["poc_id".to_string()],
            vec![vec![Cell::Int(123456)], vec![Cell::Str("AB1234".into())]],
        );
        dataset.coerce_string(0);
        assert_eq!(dataset.get(0, 0), Some(&Cell::Str("123456".to_string())));
        assert_eq!(dataset.get(1, 0), Some(&Cell::Str("AB1234".to_string())));
    }

    #[test]
    fn test_coerce_string_preserves_sentinels() {
        let mut dataset = Dataset::new(
            vec!["points".to_string()],
            vec![vec![Cell::Null], vec![Cell::Nan]],
        );
        dataset.coerce_string(0);
        assert_eq!(dataset.get(0, 0), Some(&Cell::Null));
        assert_eq!(dataset.get(1, 0), Some(&Cell::Nan));
    }
}
