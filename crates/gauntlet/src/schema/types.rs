//! Core type definitions for the column contract.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic type a column is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    /// Unique row identifier (e.g. point-of-contact id).
    Identifier,
    /// Free text (titles, descriptions).
    Text,
    /// Date string in `dd-mm-yyyy` form.
    Date,
    /// Enumerated tag drawn from a fixed allowed set.
    Category,
    /// Boolean flag.
    Flag,
    /// Number that must be strictly positive.
    PositiveNumber,
    /// JSON-encoded array of identifiers.
    EncodedList,
}

impl SemanticType {
    /// Get a human-readable label for the semantic type.
    pub fn label(&self) -> &'static str {
        match self {
            SemanticType::Identifier => "identifier",
            SemanticType::Text => "text",
            SemanticType::Date => "date (dd-mm-yyyy)",
            SemanticType::Category => "enumerated tag",
            SemanticType::Flag => "boolean flag",
            SemanticType::PositiveNumber => "positive number",
            SemanticType::EncodedList => "encoded list",
        }
    }
}

/// String-length constraint applied to a column.
///
/// Legacy validator variants disagreed on the identifier threshold (at least
/// six characters vs. exactly ten), so the bound is carried in configuration
/// rather than hardcoded per rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "chars", rename_all = "snake_case")]
pub enum LengthBound {
    /// Length must be greater than or equal to the given count.
    AtLeast(usize),
    /// Length must equal the given count.
    Exactly(usize),
}

impl LengthBound {
    /// Whether a string of `len` characters satisfies the bound.
    pub fn admits(&self, len: usize) -> bool {
        match self {
            LengthBound::AtLeast(n) => len >= *n,
            LengthBound::Exactly(n) => len == *n,
        }
    }
}

impl fmt::Display for LengthBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthBound::AtLeast(n) => write!(f, "at least {} characters", n),
            LengthBound::Exactly(n) => write!(f, "exactly {} characters", n),
        }
    }
}
