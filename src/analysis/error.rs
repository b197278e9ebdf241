use std::fmt;

use crate::analysis::result_multi::Category;

// =#========================================================================#=
// ERROR CATEGORY
// =#========================================================================#=
/// Coarse classification of an [AnalysisError].
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ErrorCategory {
    /// The tree around a query does not allow an analysis
    /// (query or its parent is root, empty name met during traversal).
    Structural,
    /// Labels, query names or side tables are malformed.
    InputFormatting,
    /// The aggregation broke its own accounting; a defect, never bad input.
    InternalConsistency,
}

// =#========================================================================#=
// SEPARATOR VIOLATION
// =#========================================================================#=
/// Ways in which a leaf label can misuse the lineage separator.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum SeparatorViolation {
    Leading,
    Trailing,
    FollowedByWhitespace,
    PrecededByWhitespace,
    EmptyLevel,
}

impl fmt::Display for SeparatorViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SeparatorViolation::Leading => "label cannot start with separator",
            SeparatorViolation::Trailing => "label cannot end with separator",
            SeparatorViolation::FollowedByWhitespace => "separator followed by whitespace",
            SeparatorViolation::PrecededByWhitespace => "whitespace followed by separator",
            SeparatorViolation::EmptyLevel => "empty annotation level",
        };
        f.write_str(msg)
    }
}

// =#========================================================================#=
// ANALYSIS ERROR
// =#========================================================================#=
/// Errors that can occur while preparing labels or analyzing queries.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("separator must not be empty")]
    EmptySeparator,

    #[error("external vertex {vertex} has an empty label")]
    EmptyLabel { vertex: usize },

    #[error("illegally formatted label \"{label}\": {violation}")]
    IllegalSeparatorUsage {
        label: String,
        violation: SeparatorViolation,
    },

    #[error("no vertex named \"{0}\" found")]
    QueryNotFound(String),

    #[error("no external vertex matches query pattern \"{0}\"")]
    NoQueryMatch(String),

    #[error("query \"{0}\" is root")]
    QueryIsRoot(String),

    #[error("parent of query \"{0}\" is root")]
    QueryParentIsRoot(String),

    #[error("query vertices with different label prefixes found: \"{first}\" and \"{other}\"")]
    InconsistentQueryPrefix { first: String, other: String },

    #[error("query vertex \"{0}\" has an empty label prefix")]
    EmptyQueryPrefix(String),

    #[error("could not parse confidence \"{value}\" of query \"{name}\"")]
    UnparsableConfidence { name: String, value: String },

    #[error("query pattern \"{0}\" has no capture group for the confidence")]
    MissingConfidenceGroup(String),

    #[error("{category} confidences add up to {sum} instead of 1.0")]
    AggregationInvariantViolation { category: Category, sum: f64 },

    #[error("no mapping for \"{0}\" found")]
    MissingMapping(String),

    #[error("malformed mapping table at line {line}: {reason}")]
    MalformedMappingTable { line: usize, reason: String },

    #[error("illegal annotation format: \"{0}\"")]
    IllegalAnnotation(String),

    #[error("invalid query pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl AnalysisError {
    /// Convenience constructor for IllegalSeparatorUsage
    pub fn illegal_separator(label: &str, violation: SeparatorViolation) -> Self {
        AnalysisError::IllegalSeparatorUsage {
            label: label.to_string(),
            violation,
        }
    }

    /// Returns the [ErrorCategory] this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalysisError::QueryIsRoot(_)
            | AnalysisError::QueryParentIsRoot(_)
            | AnalysisError::QueryNotFound(_)
            | AnalysisError::NoQueryMatch(_)
            | AnalysisError::EmptyLabel { .. } => ErrorCategory::Structural,
            AnalysisError::AggregationInvariantViolation { .. } => {
                ErrorCategory::InternalConsistency
            }
            _ => ErrorCategory::InputFormatting,
        }
    }
}
