//! Business rules for challenge-table uploads.
//!
//! Each rule is a fixed composition of the primitives in `checks` and
//! `date`, parametrized by column name and the constants in [`RuleConfig`].
//! Rules are independent: one rule's failure never prevents another from
//! running. A rule violation comes back as a failing [`CheckResult`];
//! malformed input and missing columns surface as errors instead.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::checks;
use super::date::{self, DateBounds};
use super::outcome::{CheckResult, RuleResult, ValidationReport};
use crate::error::{GauntletError, Result};
use crate::input::{Cell, Dataset};
use crate::schema::{columns, LengthBound};

/// Rule-specific constants.
///
/// The allowed-value sets and the identifier length threshold vary by
/// deployment (legacy validator variants shipped different sets), so they
/// are configuration, not hardcoded constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Allowed values for the challenge type column.
    #[serde(default = "default_challenge_types")]
    pub challenge_types: Vec<String>,
    /// Allowed values for the execution method column.
    #[serde(default = "default_execution_methods")]
    pub execution_methods: Vec<String>,
    /// Length bound for the identifier column.
    #[serde(default = "default_identifier_length")]
    pub identifier_length: LengthBound,
    /// Year window for campaign dates.
    #[serde(default)]
    pub date_bounds: DateBounds,
}

fn default_challenge_types() -> Vec<String> {
    vec![
        "EXECUTION_PTC".to_string(),
        "CHALLENGE_VOLUME_FIXED".to_string(),
    ]
}

fn default_execution_methods() -> Vec<String> {
    vec![
        "PURCHASE_MULTIPLE".to_string(),
        "PURCHASE_MULTIPLE_VOLUME_FIXED".to_string(),
    ]
}

fn default_identifier_length() -> LengthBound {
    LengthBound::AtLeast(6)
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            challenge_types: default_challenge_types(),
            execution_methods: default_execution_methods(),
            identifier_length: default_identifier_length(),
            date_bounds: DateBounds::default(),
        }
    }
}

/// Validates one dataset's columns against the challenge business rules.
///
/// Borrows the dataset mutably because two rules normalize cell
/// representation in place: the identifier and date rules coerce their
/// column to strings, and the sku rule replaces raw JSON strings with
/// decoded lists. No rule ever changes row count or column identity.
pub struct TableValidator<'a> {
    dataset: &'a mut Dataset,
    config: RuleConfig,
}

impl<'a> TableValidator<'a> {
    /// Create a validator with the default rule configuration.
    pub fn new(dataset: &'a mut Dataset) -> Self {
        Self::with_config(dataset, RuleConfig::default())
    }

    /// Create a validator with a deployment-specific configuration.
    pub fn with_config(dataset: &'a mut Dataset, config: RuleConfig) -> Self {
        Self { dataset, config }
    }

    fn column_cells(&self, index: usize) -> Vec<&Cell> {
        self.dataset.column_values(index).collect()
    }

    /// Validate the identifier column: present, long enough, unique.
    pub fn identifier(&mut self) -> Result<CheckResult> {
        let column = columns::POC_ID;
        let index = self.dataset.column_index(column)?;

        let result = checks::presence(&self.column_cells(index), column);
        if !result.passed {
            return Ok(result);
        }

        self.dataset.coerce_string(index);

        let cells = self.column_cells(index);
        let result = checks::length(&cells, column, self.config.identifier_length);
        if !result.passed {
            return Ok(result);
        }

        Ok(checks::unique(&cells, column))
    }

    /// Validate that no two rows share the same identifier + banner pair.
    pub fn identifier_banner_duplicates(&mut self) -> Result<CheckResult> {
        self.composite_duplicates(&[columns::POC_ID, columns::BANNER_NAME])
    }

    /// Detect rows whose composite key over the named columns repeats.
    pub fn composite_duplicates(&self, names: &[&str]) -> Result<CheckResult> {
        let indices: Vec<usize> = names
            .iter()
            .map(|name| self.dataset.column_index(name))
            .collect::<Result<_>>()?;

        let mut counts: IndexMap<Vec<String>, usize> = IndexMap::new();
        for row in &self.dataset.rows {
            let key: Vec<String> = indices
                .iter()
                .map(|&i| row.get(i).map(|c| c.display()).unwrap_or_default())
                .collect();
            *counts.entry(key).or_insert(0) += 1;
        }

        let duplicated: Vec<String> = counts
            .iter()
            .filter(|&(_, &count)| count > 1)
            .map(|(key, _)| format!("({})", key.join(", ")))
            .collect();

        let label = names
            .iter()
            .map(|n| format!("'{}'", n))
            .collect::<Vec<_>>()
            .join(" & ");

        if duplicated.is_empty() {
            Ok(CheckResult::pass(format!(
                "the combination of {} has no duplicate keys",
                label
            )))
        } else {
            Ok(CheckResult::fail(format!(
                "the combination of {} has {} duplicate key(s): {:?}",
                label,
                duplicated.len(),
                duplicated
            )))
        }
    }

    /// Validate the challenge type column against the configured set.
    pub fn challenge_type(&mut self) -> Result<CheckResult> {
        let column = columns::CHALLENGE_TYPE;
        let index = self.dataset.column_index(column)?;
        let cells = self.column_cells(index);
        Ok(checks::membership(&cells, column, &self.config.challenge_types))
    }

    /// Validate the execution method column against the configured set.
    pub fn execution_method(&mut self) -> Result<CheckResult> {
        let column = columns::EXECUTION_METHOD;
        let index = self.dataset.column_index(column)?;
        let cells = self.column_cells(index);
        Ok(checks::membership(&cells, column, &self.config.execution_methods))
    }

    /// Validate the structured sku column.
    ///
    /// Presence first, then each raw cell is JSON-decoded; undecodable JSON
    /// is a [`GauntletError::Decode`], not a rule failure. Decoded arrays
    /// replace the raw strings in place (every element coerced to string),
    /// the one documented mutation of this column. Cells that are already
    /// decoded lists pass through, so re-running the rule is idempotent.
    pub fn sku(&mut self) -> Result<CheckResult> {
        let column = columns::SKU;
        let index = self.dataset.column_index(column)?;

        let result = checks::presence(&self.column_cells(index), column);
        if !result.passed {
            return Ok(result);
        }

        self.decode_list_column(index, column)?;

        let cells = self.column_cells(index);
        Ok(checks::list_of_strings(&cells, column))
    }

    fn decode_list_column(&mut self, index: usize, column: &str) -> Result<()> {
        for row in 0..self.dataset.row_count() {
            let decoded = match self.dataset.get(row, index) {
                Some(Cell::Str(raw)) => {
                    let value: serde_json::Value =
                        serde_json::from_str(raw).map_err(|e| GauntletError::Decode {
                            column: column.to_string(),
                            row,
                            source: e,
                        })?;
                    match value {
                        serde_json::Value::Array(items) => {
                            let items = items
                                .into_iter()
                                .map(|item| match item {
                                    serde_json::Value::String(s) => s,
                                    other => other.to_string(),
                                })
                                .collect();
                            Some(Cell::List(items))
                        }
                        // Valid JSON but not an array: leave the cell alone
                        // and let the list-of-strings check report it.
                        _ => None,
                    }
                }
                _ => None,
            };

            if let Some(cell) = decoded {
                self.dataset.set(row, index, cell);
            }
        }
        Ok(())
    }

    /// Validate the individual-target flag column.
    pub fn individual_target(&mut self) -> Result<CheckResult> {
        let column = columns::INDIVIDUAL_TARGET;
        let index = self.dataset.column_index(column)?;

        let cells = self.column_cells(index);
        let result = checks::presence(&cells, column);
        if !result.passed {
            return Ok(result);
        }

        let offending: Vec<String> = cells
            .iter()
            .filter(|c| !matches!(c, Cell::Bool(_)))
            .map(|c| c.display())
            .collect();

        if offending.is_empty() {
            Ok(checks::correct(column))
        } else {
            Ok(CheckResult::fail(format!(
                "column '{}' has values that are not true or false: {:?}",
                column, offending
            )))
        }
    }

    /// Validate a date column against the `dd-mm-yyyy` contract.
    pub fn date(&mut self, column: &str) -> Result<CheckResult> {
        let index = self.dataset.column_index(column)?;

        let result = checks::presence(&self.column_cells(index), column);
        if !result.passed {
            return Ok(result);
        }

        self.dataset.coerce_string(index);

        let cells = self.column_cells(index);
        Ok(date::check_date(&cells, column, self.config.date_bounds))
    }

    /// Validate that a column has no null, nan, or empty values.
    pub fn required(&mut self, column: &str) -> Result<CheckResult> {
        let index = self.dataset.column_index(column)?;
        Ok(checks::presence(&self.column_cells(index), column))
    }

    /// Validate that a column is present and strictly positive.
    pub fn required_positive(&mut self, column: &str) -> Result<CheckResult> {
        let index = self.dataset.column_index(column)?;

        let cells = self.column_cells(index);
        let result = checks::presence(&cells, column);
        if !result.passed {
            return Ok(result);
        }

        checks::positive(&cells, column)
    }

    /// Run the standard rule battery in upload-review order.
    ///
    /// Malformed-input errors are recorded as invalid outcomes and the run
    /// continues with the next rule; a missing column aborts the batch.
    pub fn run_all(&mut self) -> Result<ValidationReport> {
        let mut report = ValidationReport::new();

        let outcome = self.identifier();
        record(&mut report, "identifier", outcome)?;
        let outcome = self.identifier_banner_duplicates();
        record(&mut report, "identifier_banner_duplicates", outcome)?;
        let outcome = self.sku();
        record(&mut report, "sku", outcome)?;
        let outcome = self.challenge_type();
        record(&mut report, "challenge_type", outcome)?;
        let outcome = self.execution_method();
        record(&mut report, "execution_method", outcome)?;
        let outcome = self.individual_target();
        record(&mut report, "individual_target", outcome)?;
        let outcome = self.date(columns::START_DATE);
        record(&mut report, "start_date", outcome)?;
        let outcome = self.date(columns::END_DATE);
        record(&mut report, "end_date", outcome)?;

        for column in [
            columns::CAMPAIGN_ID,
            columns::CHALLENGE_TITLE,
            columns::DESCRIPTION,
            columns::BANNER_NAME,
        ] {
            let outcome = self.required(column);
            record(&mut report, column, outcome)?;
        }

        for column in [columns::POINTS, columns::QUANTITY, columns::QUANTITY_MIN] {
            let outcome = self.required_positive(column);
            record(&mut report, column, outcome)?;
        }

        Ok(report)
    }
}

/// Fold one rule outcome into the report, keeping the batch alive on
/// recoverable (malformed-input) errors.
fn record(report: &mut ValidationReport, rule: &str, outcome: Result<CheckResult>) -> Result<()> {
    match outcome {
        Ok(check) => {
            report.push_check(rule, check);
            Ok(())
        }
        Err(e) if e.is_recoverable() => {
            report.push(RuleResult::invalid(rule, e.to_string()));
            Ok(())
        }
        Err(e) => Err(e),
    }
}
