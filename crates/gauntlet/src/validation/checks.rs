//! Reusable column-level check primitives.
//!
//! Every check scans the whole column and reports all offending values in
//! one pass; none of them fail fast per cell. Business rules compose these
//! primitives instead of repeating them.

use indexmap::{IndexMap, IndexSet};

use super::outcome::CheckResult;
use crate::error::{GauntletError, Result};
use crate::input::Cell;
use crate::schema::LengthBound;

/// Standard passing message for a column.
pub(crate) fn correct(column: &str) -> CheckResult {
    CheckResult::pass(format!("column '{}' has the correct values", column))
}

/// Null / nan / empty check.
///
/// Order is significant: null is reported before nan, nan before emptiness;
/// the first failing condition wins.
pub(crate) fn presence(cells: &[&Cell], column: &str) -> CheckResult {
    if cells.iter().any(|c| c.is_null()) {
        return CheckResult::fail(format!("column '{}' has null values", column));
    }
    if cells.iter().any(|c| c.is_nan()) {
        return CheckResult::fail(format!("column '{}' has nan values", column));
    }
    if cells.is_empty() {
        return CheckResult::fail(format!("column '{}' has empty values", column));
    }
    correct(column)
}

/// Strict positivity check for a numeric column.
///
/// Runs after the presence check has passed. A cell that is not numeric at
/// all violates the input contract and surfaces as a `TypeMismatch` error
/// rather than a rule failure.
pub(crate) fn positive(cells: &[&Cell], column: &str) -> Result<CheckResult> {
    let mut offending = Vec::new();

    for (row, cell) in cells.iter().enumerate() {
        let value = match cell {
            Cell::Int(i) => *i as f64,
            Cell::Float(f) => *f,
            Cell::Str(s) => {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| GauntletError::TypeMismatch {
                        column: column.to_string(),
                        row,
                        expected: "number",
                        found: cell.type_name(),
                    })?
            }
            Cell::Null | Cell::Nan => continue,
            other => {
                return Err(GauntletError::TypeMismatch {
                    column: column.to_string(),
                    row,
                    expected: "number",
                    found: other.type_name(),
                });
            }
        };

        if value <= 0.0 {
            offending.push(cell.display());
        }
    }

    if offending.is_empty() {
        Ok(correct(column))
    } else {
        Ok(CheckResult::fail(format!(
            "column '{}' has 0 or negative values: {:?}",
            column, offending
        )))
    }
}

/// Case-sensitive membership check against an allowed-value set.
pub(crate) fn membership(cells: &[&Cell], column: &str, allowed: &[String]) -> CheckResult {
    let mut outside: IndexSet<String> = IndexSet::new();

    for cell in cells {
        let repr = cell.display();
        if !allowed.iter().any(|a| a == &repr) {
            outside.insert(repr);
        }
    }

    if outside.is_empty() {
        correct(column)
    } else {
        let values: Vec<&String> = outside.iter().collect();
        CheckResult::fail(format!(
            "column '{}' has values outside the allowed set: {:?}",
            column, values
        ))
    }
}

/// String-length check against a configured bound.
pub(crate) fn length(cells: &[&Cell], column: &str, bound: LengthBound) -> CheckResult {
    let offending: Vec<String> = cells
        .iter()
        .map(|c| c.display())
        .filter(|s| !bound.admits(s.chars().count()))
        .collect();

    if offending.is_empty() {
        correct(column)
    } else {
        CheckResult::fail(format!(
            "column '{}' has incorrect length values (expected {}): {:?}",
            column, bound, offending
        ))
    }
}

/// Uniqueness check over a single column.
///
/// The failure message carries the number of duplicate groups and lists the
/// duplicated values in first-seen order.
pub(crate) fn unique(cells: &[&Cell], column: &str) -> CheckResult {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for cell in cells {
        *counts.entry(cell.display()).or_insert(0) += 1;
    }

    let duplicated: Vec<&String> = counts
        .iter()
        .filter(|&(_, &count)| count > 1)
        .map(|(value, _)| value)
        .collect();

    if duplicated.is_empty() {
        CheckResult::pass(format!("column '{}' has no duplicate values", column))
    } else {
        CheckResult::fail(format!(
            "column '{}' has {} duplicate value(s): {:?}",
            column,
            duplicated.len(),
            duplicated
        ))
    }
}

/// Check that every cell is a decoded list of strings.
pub(crate) fn list_of_strings(cells: &[&Cell], column: &str) -> CheckResult {
    if cells.iter().all(|c| matches!(c, Cell::List(_))) {
        correct(column)
    } else {
        CheckResult::fail(format!(
            "column '{}' has incorrect values; it must be a list of strings",
            column
        ))
    }
}
