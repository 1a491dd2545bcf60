//! The expected-column contract for a challenge table upload.

use serde::{Deserialize, Serialize};

use super::types::SemanticType;
use crate::input::Dataset;

/// Standard column names of the challenge upload contract.
pub mod columns {
    pub const POC_ID: &str = "poc_id";
    pub const BANNER_NAME: &str = "banner_name";
    pub const CAMPAIGN_ID: &str = "campaign_id";
    pub const POINTS: &str = "points";
    pub const SKU: &str = "sku";
    pub const CHALLENGE_TYPE: &str = "challenge_type";
    pub const EXECUTION_METHOD: &str = "execution_method";
    pub const START_DATE: &str = "start_date";
    pub const END_DATE: &str = "end_date";
    pub const INDIVIDUAL_TARGET: &str = "individual_target";
    pub const CHALLENGE_TITLE: &str = "challenge_title";
    pub const DESCRIPTION: &str = "description";
    pub const QUANTITY: &str = "quantity";
    pub const QUANTITY_MIN: &str = "quantity_min";
}

/// One column the engine expects the upload to carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedColumn {
    /// Column name as it appears in the upload header.
    pub name: String,
    /// Semantic type the rules assume for the column.
    pub semantic: SemanticType,
}

impl ExpectedColumn {
    /// Create a new expected column.
    pub fn new(name: impl Into<String>, semantic: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic,
        }
    }
}

/// The name-to-semantic-type contract checked before any rule runs.
///
/// A dataset missing one of these columns is a configuration error, not a
/// rule violation; validation fails fast instead of producing a result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    /// Expected columns, in contract order.
    pub columns: Vec<ExpectedColumn>,
}

impl TableSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Create a schema with the given columns.
    pub fn with_columns(columns: Vec<ExpectedColumn>) -> Self {
        Self { columns }
    }

    /// The standard challenge-table contract.
    pub fn challenge_table() -> Self {
        use SemanticType::*;
        Self::with_columns(vec![
            ExpectedColumn::new(columns::POC_ID, Identifier),
            ExpectedColumn::new(columns::BANNER_NAME, Text),
            ExpectedColumn::new(columns::CAMPAIGN_ID, Text),
            ExpectedColumn::new(columns::POINTS, PositiveNumber),
            ExpectedColumn::new(columns::SKU, EncodedList),
            ExpectedColumn::new(columns::CHALLENGE_TYPE, Category),
            ExpectedColumn::new(columns::EXECUTION_METHOD, Category),
            ExpectedColumn::new(columns::START_DATE, Date),
            ExpectedColumn::new(columns::END_DATE, Date),
            ExpectedColumn::new(columns::INDIVIDUAL_TARGET, Flag),
            ExpectedColumn::new(columns::CHALLENGE_TITLE, Text),
            ExpectedColumn::new(columns::DESCRIPTION, Text),
            ExpectedColumn::new(columns::QUANTITY, PositiveNumber),
            ExpectedColumn::new(columns::QUANTITY_MIN, PositiveNumber),
        ])
    }

    /// Get a column by name.
    pub fn get(&self, name: &str) -> Option<&ExpectedColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all expected column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get the number of expected columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Expected columns the dataset does not carry.
    pub fn missing_columns(&self, dataset: &Dataset) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !dataset.has_column(&c.name))
            .map(|c| c.name.clone())
            .collect()
    }
}

impl Default for TableSchema {
    fn default() -> Self {
        Self::challenge_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Cell;

    #[test]
    fn test_challenge_table_contract() {
        let schema = TableSchema::challenge_table();
        assert_eq!(schema.column_count(), 14);
        assert_eq!(
            schema.get(columns::POC_ID).map(|c| c.semantic),
            Some(SemanticType::Identifier)
        );
        assert_eq!(
            schema.get(columns::SKU).map(|c| c.semantic),
            Some(SemanticType::EncodedList)
        );
    }

    #[test]
    fn test_missing_columns() {
        let schema = TableSchema::with_columns(vec![
            ExpectedColumn::new("poc_id", SemanticType::Identifier),
            ExpectedColumn::new("banner_name", SemanticType::Text),
        ]);
        let dataset = Dataset::new(
            vec!["poc_id".to_string()],
            vec![vec![Cell::Str("AB1234".into())]],
        );
        assert_eq!(schema.missing_columns(&dataset), vec!["banner_name"]);
    }

    #[test]
    fn test_schema_deserializes_from_json() {
        let json = r#"{"columns":[{"name":"store_id","semantic":"identifier"}]}"#;
        let schema: TableSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.column_names(), vec!["store_id"]);
    }
}
