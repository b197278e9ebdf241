use std::fmt;

use crate::prefix::gcp::first_element;

/// Marker recorded instead of a prefix when the labels around a placement
/// have nothing in common.
pub const UNKNOWN: &str = "?";

/// A hierarchical label paired with the confidence mass attributed to it.
///
/// Immutable once created; aggregation produces new prefixes rather than
/// updating existing ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    label: String,
    confidence: f64,
}

impl Prefix {
    /// Creates a new prefix.
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Prefix {
            label: label.into(),
            confidence,
        }
    }

    /// Returns the label, e.g. `A.1.2`, or [UNKNOWN].
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the confidence mass of this prefix.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Returns the top-level family of the label.
    pub fn first_element(&self, separator: &str) -> &str {
        first_element(&self.label, separator)
    }

    /// Returns whether this is the [UNKNOWN] marker.
    pub fn is_unknown(&self) -> bool {
        self.label == UNKNOWN
    }
}

impl fmt::Display for Prefix {
    /// Formats as `<label> <confidence>`, e.g. `A.1 0.9`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, format_confidence(self.confidence))
    }
}

/// Formats a confidence with at least one and at most four decimals,
/// e.g. `1.0`, `0.25`, `0.3333`.
pub fn format_confidence(value: f64) -> String {
    let mut s = format!("{value:.4}");
    if s.contains('.') {
        while s.ends_with('0') && !s.ends_with(".0") {
            s.pop();
        }
    }
    s
}
