//! Gauntlet: rule-based validation for uploaded challenge campaign tables.
//!
//! Gauntlet checks a parsed tabular upload against a fixed set of per-column
//! business rules (presence, length, format, membership, positivity,
//! uniqueness, cross-column duplication) and reports one pass/fail result
//! per rule.
//!
//! # Core Principles
//!
//! - **Composable checks**: every business rule is a composition of a small
//!   set of reusable column primitives, not a copy of them
//! - **Violations are results, contract breaks are errors**: a failed rule
//!   is a failing [`CheckResult`]; malformed input and missing columns are
//!   [`GauntletError`]s
//! - **Deterministic**: re-running a rule on unchanged data yields the same
//!   result
//!
//! # Example
//!
//! ```no_run
//! use gauntlet::Gauntlet;
//!
//! let gauntlet = Gauntlet::new();
//! let run = gauntlet.check_file("challenges.csv").unwrap();
//!
//! for result in run.report.results() {
//!     println!("{}: {}", result.status.label(), result.message);
//! }
//! ```

pub mod error;
pub mod input;
pub mod schema;
pub mod validation;

mod gauntlet;

pub use crate::gauntlet::{Gauntlet, GauntletConfig, RunResult};
pub use error::{GauntletError, Result};
pub use input::{Cell, Dataset, Parser, ParserConfig, SourceMetadata};
pub use schema::{columns, ExpectedColumn, LengthBound, SemanticType, TableSchema};
pub use validation::{
    CheckResult, DateBounds, RuleConfig, RuleResult, RuleStatus, RunSummary, TableValidator,
    ValidationReport,
};
