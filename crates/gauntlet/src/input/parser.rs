//! CSV parser with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::table::{Cell, Dataset, SourceMetadata};
use crate::error::{GauntletError, Result};

/// Delimiters to try when auto-detecting. The upload contract documents
/// `;`-separated UTF-8 CSV, but exports with other separators show up too.
const DELIMITERS: &[u8] = &[b';', b',', b'\t', b'|'];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses uploaded tabular files into a [`Dataset`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the dataset and its source metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| GauntletError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| GauntletError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let dataset = self.parse_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b';' => "csv-semicolon",
            b',' => "csv",
            b'\t' => "tsv",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            dataset.row_count(),
            dataset.column_count(),
        );

        Ok((dataset, metadata))
    }

    /// Parse bytes directly.
    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            records.push(result?);
        }

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.trim().to_string()).collect()
        } else {
            let width = records.first().map(|r| r.len()).unwrap_or(0);
            (0..width).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() {
            return Err(GauntletError::EmptyData("No columns found".to_string()));
        }
        if records.is_empty() {
            return Err(GauntletError::EmptyData("No data rows found".to_string()));
        }

        let expected_cols = headers.len();
        let rows = records
            .into_iter()
            .map(|record| {
                let mut row: Vec<Cell> = record.iter().map(Cell::parse).collect();
                // Ragged rows are padded with nulls / truncated to the header width.
                while row.len() < expected_cols {
                    row.push(Cell::Null);
                }
                row.truncate(expected_cols);
                row
            })
            .collect();

        Ok(Dataset::new(headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(GauntletError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b';';
    let mut best_score = 0usize;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // A delimiter that appears the same number of times in every line is
        // almost certainly the real one.
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_semicolon() {
        let data = b"poc_id;points;banner_name\nAB1234;10;North\nXY9999;20;South";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_detect_delimiter_comma() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_parse_typed_cells() {
        let parser = Parser::new();
        let data = b"poc_id;points;individual_target\nAB1234;10;True\nXY9999;20;False";
        let dataset = parser.parse_bytes(data, b';').unwrap();

        assert_eq!(dataset.headers, vec!["poc_id", "points", "individual_target"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.get(0, 0), Some(&Cell::Str("AB1234".to_string())));
        assert_eq!(dataset.get(0, 1), Some(&Cell::Int(10)));
        assert_eq!(dataset.get(1, 2), Some(&Cell::Bool(false)));
    }

    #[test]
    fn test_parse_quoted_json_field() {
        let parser = Parser::new();
        let data = b"sku\n\"[\"\"A1\"\",\"\"B2\"\"]\"\n\"[\"\"C3\"\"]\"";
        let dataset = parser.parse_bytes(data, b',').unwrap();
        assert_eq!(
            dataset.get(0, 0),
            Some(&Cell::Str("[\"A1\",\"B2\"]".to_string()))
        );
    }

    #[test]
    fn test_parse_empty_input() {
        let parser = Parser::new();
        let err = parser.parse_bytes(b"", b';').unwrap_err();
        assert!(matches!(err, GauntletError::EmptyData(_)));
    }

    #[test]
    fn test_parse_pads_ragged_rows() {
        let parser = Parser::new();
        let data = b"a;b;c\n1;2\n4;5;6";
        let dataset = parser.parse_bytes(data, b';').unwrap();
        assert_eq!(dataset.get(0, 2), Some(&Cell::Null));
    }
}
