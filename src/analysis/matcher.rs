//! Identification of query vertices by name.
//!
//! A query is found either by its exact name ([ExactName]) or by a regular
//! expression matching the names of possibly many placements ([QueryPattern]).
//! Both implement [QueryMatcher], so the analyses are written once against it.

use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::error::AnalysisError;

/// Query name convention of placement tools writing one tip per placement,
/// e.g. `Q1_#3_M=0.25`; the capture group holds the placement confidence.
pub const DEFAULT_QUERY_PATTERN: &str = r"_#\d+_M=(.+)";

static DEFAULT_QUERY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DEFAULT_QUERY_PATTERN).expect("default query pattern is a valid regex")
});

// =#========================================================================#=
// QUERY HIT
// =#========================================================================#=
/// Result of matching a vertex name against a [QueryMatcher].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryHit<'a> {
    /// Text of the name preceding the match (empty for exact matches)
    pub prefix: &'a str,
    /// Text of the confidence embedded in the name, if the matcher captures one
    pub confidence: Option<&'a str>,
}

// =#========================================================================#=
// QUERY MATCHER
// =#========================================================================#=
/// Capability to recognise query vertices by their name.
pub trait QueryMatcher {
    /// Matches `name`, returning `None` if it does not denote a query.
    fn match_name<'a>(&self, name: &'a str) -> Option<QueryHit<'a>>;

    /// Returns whether `name` denotes a query.
    fn is_match(&self, name: &str) -> bool {
        self.match_name(name).is_some()
    }

    /// Returns a description of what is matched, used in error messages.
    fn describe(&self) -> &str;
}

/// Matches exactly one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactName(String);

impl ExactName {
    pub fn new(name: impl Into<String>) -> Self {
        ExactName(name.into())
    }
}

impl QueryMatcher for ExactName {
    fn match_name<'a>(&self, name: &'a str) -> Option<QueryHit<'a>> {
        (name == self.0).then_some(QueryHit {
            prefix: "",
            confidence: None,
        })
    }

    fn describe(&self) -> &str {
        &self.0
    }
}

/// Matches names by searching for a regular expression anywhere in them.
///
/// The first capture group, if present, yields the embedded confidence.
#[derive(Debug, Clone)]
pub struct QueryPattern {
    regex: Regex,
}

impl QueryPattern {
    /// Compiles `pattern` into a query matcher.
    ///
    /// # Errors
    /// Returns [AnalysisError::InvalidPattern] if `pattern` is no valid regex.
    pub fn new(pattern: &str) -> Result<Self, AnalysisError> {
        Ok(QueryPattern {
            regex: Regex::new(pattern)?,
        })
    }

    /// Returns whether the pattern has a capture group for the confidence.
    pub fn captures_confidence(&self) -> bool {
        self.regex.captures_len() > 1
    }

    /// Returns the source text of the pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Default for QueryPattern {
    /// Pattern for [DEFAULT_QUERY_PATTERN].
    fn default() -> Self {
        QueryPattern {
            regex: DEFAULT_QUERY_REGEX.clone(),
        }
    }
}

impl QueryMatcher for QueryPattern {
    fn match_name<'a>(&self, name: &'a str) -> Option<QueryHit<'a>> {
        let captures = self.regex.captures(name)?;
        let start = captures.get(0)?.start();
        Some(QueryHit {
            prefix: &name[..start],
            confidence: captures.get(1).map(|m| m.as_str()),
        })
    }

    fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    fn describe(&self) -> &str {
        self.regex.as_str()
    }
}
