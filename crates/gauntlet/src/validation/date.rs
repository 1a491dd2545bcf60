//! Date-format check for `dd-mm-yyyy` columns.
//!
//! Validation is two-phase: a structural pattern match rejects strings that
//! are not two digits, hyphen, two digits, hyphen, four digits; surviving
//! values then get a semantic check of the three integer components,
//! including calendar validity. The calendar is checked by constructing a
//! `chrono::NaiveDate` from the components rather than by encoding
//! month-length and leap-year rules into the pattern, so 31-04 and 29-02
//! outside leap years are rejected.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::checks::correct;
use super::outcome::CheckResult;
use crate::input::Cell;

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").expect("date pattern is a valid regex"));

/// Year window a campaign date must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    /// Earliest accepted year, inclusive.
    pub min_year: i32,
    /// Latest accepted year, inclusive.
    pub max_year: i32,
}

impl Default for DateBounds {
    fn default() -> Self {
        Self {
            min_year: 2023,
            max_year: 2030,
        }
    }
}

impl DateBounds {
    /// Whether a year falls inside the window.
    pub fn contains_year(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }
}

/// Whether a single already-well-formed `dd-mm-yyyy` value names a real
/// calendar date inside the bounds.
fn is_valid_date(value: &str, bounds: DateBounds) -> bool {
    let mut parts = value.split('-');
    let day: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let month: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let year: i32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);

    (1..=31).contains(&day)
        && (1..=12).contains(&month)
        && bounds.contains_year(year)
        && NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// Validate a date-string column against the `dd-mm-yyyy` wire contract.
///
/// Both phases collect every violating value before failing; neither stops
/// at the first bad cell.
pub(crate) fn check_date(cells: &[&Cell], column: &str, bounds: DateBounds) -> CheckResult {
    let values: Vec<String> = cells.iter().map(|c| c.display()).collect();

    let malformed: Vec<&String> = values
        .iter()
        .filter(|v| !DATE_PATTERN.is_match(v))
        .collect();
    if !malformed.is_empty() {
        return CheckResult::fail(format!(
            "column '{}' has incorrect date format: {:?}",
            column, malformed
        ));
    }

    let invalid: Vec<&String> = values
        .iter()
        .filter(|v| !is_valid_date(v, bounds))
        .collect();
    if !invalid.is_empty() {
        return CheckResult::fail(format!(
            "column '{}' has invalid date values: {:?}",
            column, invalid
        ));
    }

    correct(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(input: &[Cell]) -> Vec<&Cell> {
        input.iter().collect()
    }

    fn str_cells(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|v| Cell::Str((*v).to_string())).collect()
    }

    #[test]
    fn test_structural_failure_lists_all_malformed_values() {
        let data = str_cells(&["15-06-2024", "2024-06-15", "15/06/2024"]);
        let result = check_date(&cells(&data), "start_date", DateBounds::default());
        assert!(!result.passed);
        assert!(result.message.contains("incorrect date format"));
        assert!(result.message.contains("2024-06-15"));
        assert!(result.message.contains("15/06/2024"));
        assert!(!result.message.contains("\"15-06-2024\""));
    }

    #[test]
    fn test_calendar_rejects_31st_of_february() {
        let data = str_cells(&["15-06-2024", "31-02-2024"]);
        let result = check_date(&cells(&data), "start_date", DateBounds::default());
        assert!(!result.passed);
        assert!(result.message.contains("invalid date values"));
        assert!(result.message.contains("31-02-2024"));
    }

    #[test]
    fn test_leap_year_february_29() {
        let data = str_cells(&["29-02-2024"]);
        assert!(check_date(&cells(&data), "start_date", DateBounds::default()).passed);

        let data = str_cells(&["29-02-2025"]);
        assert!(!check_date(&cells(&data), "start_date", DateBounds::default()).passed);
    }

    #[test]
    fn test_year_bounds() {
        let bounds = DateBounds::default();
        let data = str_cells(&["15-06-2022"]);
        assert!(!check_date(&cells(&data), "start_date", bounds).passed);

        let data = str_cells(&["15-06-2030"]);
        assert!(check_date(&cells(&data), "start_date", bounds).passed);

        let data = str_cells(&["15-06-2031"]);
        assert!(!check_date(&cells(&data), "start_date", bounds).passed);
    }

    #[test]
    fn test_month_and_day_bounds() {
        let data = str_cells(&["00-06-2024"]);
        assert!(!check_date(&cells(&data), "start_date", DateBounds::default()).passed);

        let data = str_cells(&["15-13-2024"]);
        assert!(!check_date(&cells(&data), "start_date", DateBounds::default()).passed);
    }

    #[test]
    fn test_only_hyphen_separators_accepted() {
        let data = str_cells(&["15.06.2024"]);
        let result = check_date(&cells(&data), "start_date", DateBounds::default());
        assert!(result.message.contains("incorrect date format"));
    }

    #[test]
    fn test_valid_column_passes() {
        let data = str_cells(&["01-01-2023", "31-12-2030", "29-02-2028"]);
        assert!(check_date(&cells(&data), "end_date", DateBounds::default()).passed);
    }
}
