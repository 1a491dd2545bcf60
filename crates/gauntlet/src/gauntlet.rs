//! Main Gauntlet struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GauntletError, Result};
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::schema::TableSchema;
use crate::validation::{RuleConfig, RunSummary, TableValidator, ValidationReport};

/// Configuration for a Gauntlet validation session.
#[derive(Debug, Clone, Default)]
pub struct GauntletConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Expected-column contract.
    pub schema: TableSchema,
    /// Rule constants (allowed sets, thresholds, date bounds).
    pub rules: RuleConfig,
}

/// Result of validating one uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Per-rule outcomes, in invocation order.
    pub report: ValidationReport,
    /// Outcome counts.
    pub summary: RunSummary,
}

/// The validation engine facade: parse an upload, check the column
/// contract, run the rule battery.
pub struct Gauntlet {
    config: GauntletConfig,
    parser: Parser,
}

impl Gauntlet {
    /// Create a new engine with the standard challenge-table configuration.
    pub fn new() -> Self {
        Self::with_config(GauntletConfig::default())
    }

    /// Create an engine with a deployment-specific configuration.
    pub fn with_config(config: GauntletConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    /// Validate an uploaded file and produce a per-rule report.
    ///
    /// A dataset missing one of the expected columns fails fast with
    /// [`GauntletError::MissingColumn`] before any rule runs.
    pub fn check_file(&self, path: impl AsRef<Path>) -> Result<RunResult> {
        let (mut dataset, source) = self.parser.parse_file(path)?;

        let missing = self.config.schema.missing_columns(&dataset);
        if let Some(column) = missing.into_iter().next() {
            return Err(GauntletError::MissingColumn { column });
        }

        let mut validator = TableValidator::with_config(&mut dataset, self.config.rules.clone());
        let report = validator.run_all()?;
        let summary = report.summary();

        Ok(RunResult {
            source,
            report,
            summary,
        })
    }
}

impl Default for Gauntlet {
    fn default() -> Self {
        Self::new()
    }
}
