//! Check results and the per-run report.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The atomic unit of rule feedback: pass/fail plus a human-readable message.
///
/// A `CheckResult` is always returned, never raised. Rule violations live
/// here; contract violations (malformed input, missing columns) surface as
/// errors instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the rule passed.
    pub passed: bool,
    /// Human-readable description of the outcome.
    pub message: String,
}

impl CheckResult {
    /// Create a passing result.
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
        }
    }

    /// Create a failing result.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.passed { "ok" } else { "fail" };
        write!(f, "[{}] {}", tag, self.message)
    }
}

/// Status of one rule within a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    /// Rule ran and the data satisfied it.
    Passed,
    /// Rule ran and found a business-rule violation.
    Failed,
    /// The rule could not run because the input violated the basic contract
    /// (e.g. undecodable JSON in a structured field).
    Invalid,
}

impl RuleStatus {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            RuleStatus::Passed => "Passed",
            RuleStatus::Failed => "Failed",
            RuleStatus::Invalid => "Invalid",
        }
    }
}

/// Outcome of one named rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResult {
    /// Name of the business rule.
    pub rule: String,
    /// Outcome status.
    pub status: RuleStatus,
    /// Human-readable message.
    pub message: String,
}

impl RuleResult {
    /// Wrap a check result under a rule name.
    pub fn from_check(rule: impl Into<String>, check: CheckResult) -> Self {
        Self {
            rule: rule.into(),
            status: if check.passed {
                RuleStatus::Passed
            } else {
                RuleStatus::Failed
            },
            message: check.message,
        }
    }

    /// Record a malformed-input error surfaced while running a rule.
    pub fn invalid(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            status: RuleStatus::Invalid,
            message: message.into(),
        }
    }
}

/// Ordered collection of rule outcomes for one validation run.
///
/// Insertion order is invocation order; the display layer renders entries
/// as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    results: Vec<RuleResult>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
        }
    }

    /// Append a rule outcome.
    pub fn push(&mut self, result: RuleResult) {
        self.results.push(result);
    }

    /// Append a check result under a rule name.
    pub fn push_check(&mut self, rule: impl Into<String>, check: CheckResult) {
        self.results.push(RuleResult::from_check(rule, check));
    }

    /// All recorded outcomes, in invocation order.
    pub fn results(&self) -> &[RuleResult] {
        &self.results
    }

    /// Number of recorded outcomes.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the report is empty.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether every recorded rule passed.
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.status == RuleStatus::Passed)
    }

    /// Iterate over non-passing outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &RuleResult> {
        self.results
            .iter()
            .filter(|r| r.status != RuleStatus::Passed)
    }

    /// Summarize the run.
    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            total: self.results.len(),
            ..RunSummary::default()
        };
        for result in &self.results {
            match result.status {
                RuleStatus::Passed => summary.passed += 1,
                RuleStatus::Failed => summary.failed += 1,
                RuleStatus::Invalid => summary.invalid += 1,
            }
        }
        summary.ok = summary.failed == 0 && summary.invalid == 0;
        summary
    }
}

/// Counts of rule outcomes for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Rules executed.
    pub total: usize,
    /// Rules that passed.
    pub passed: usize,
    /// Rules that found violations.
    pub failed: usize,
    /// Rules aborted on malformed input.
    pub invalid: usize,
    /// Whether the upload is clean.
    pub ok: bool,
}
