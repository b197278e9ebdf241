//! Consensus result over all placements of one query.

use std::fmt;

use crate::analysis::aggregate::{Aggregation, aggregate, obtain_specifics};
use crate::analysis::error::AnalysisError;
use crate::prefix::Prefix;

// =#========================================================================#=
// CATEGORY
// =#========================================================================#=
/// The three independent prefix lists kept per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Greatest common prefix of the least encompassing clade
    Clade,
    /// Greatest common prefix of the down-tree bracketing clade
    Down,
    /// Greatest common prefix of the up-tree bracketing clade
    Up,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Clade, Category::Down, Category::Up];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Clade => f.write_str("matching clade"),
            Category::Down => f.write_str("down-tree bracketing clade"),
            Category::Up => f.write_str("up-tree bracketing clade"),
        }
    }
}

/// Aggregated prefixes of one [Category].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryResult {
    all: Vec<Prefix>,
    collapsed: Vec<Prefix>,
    specifics: Vec<Prefix>,
}

impl CategoryResult {
    /// All prefixes by descending confidence.
    pub fn all(&self) -> &[Prefix] {
        &self.all
    }

    /// Best prefix per top-level family; confidences sum to 1 unless empty.
    pub fn collapsed(&self) -> &[Prefix] {
        &self.collapsed
    }

    /// Secondary candidates above the cutoff for specifics.
    pub fn specifics(&self) -> &[Prefix] {
        &self.specifics
    }
}

// =#========================================================================#=
// MULTI RESULT
// =#========================================================================#=
/// Consensus classification of a query from all its placements.
///
/// Created through [MultiResultBuilder]; immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiResult {
    query_name_prefix: String,
    total_matches: usize,
    reference_tree_external_nodes: usize,
    clade: CategoryResult,
    down: CategoryResult,
    up: CategoryResult,
}

impl MultiResult {
    /// Returns the name shared by all placements, e.g. `Q16611` for
    /// `Q16611_#1_M=0.25`.
    pub fn query_name_prefix(&self) -> &str {
        &self.query_name_prefix
    }

    /// Returns the number of placements found.
    pub fn total_matches(&self) -> usize {
        self.total_matches
    }

    /// Returns the number of external vertices that are not placements.
    pub fn reference_tree_external_nodes(&self) -> usize {
        self.reference_tree_external_nodes
    }

    pub fn category(&self, category: Category) -> &CategoryResult {
        match category {
            Category::Clade => &self.clade,
            Category::Down => &self.down,
            Category::Up => &self.up,
        }
    }

    pub fn all(&self, category: Category) -> &[Prefix] {
        self.category(category).all()
    }

    pub fn collapsed(&self, category: Category) -> &[Prefix] {
        self.category(category).collapsed()
    }

    pub fn specifics(&self, category: Category) -> &[Prefix] {
        self.category(category).specifics()
    }
}

impl fmt::Display for MultiResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Query: {}", self.query_name_prefix)?;
        writeln!(f, "Matching Clade(s):")?;
        for prefix in &self.clade.collapsed {
            writeln!(f, "{prefix}")?;
        }

        let brackets = [
            ("Matching Down-tree Bracketing Clade(s):", &self.down),
            ("Matching Up-tree Bracketing Clade(s):", &self.up),
        ];
        for (title, result) in brackets {
            if result.all.is_empty() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "{title}")?;
            for prefix in &result.collapsed {
                writeln!(f, "{prefix}")?;
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Total Number of Matches: {}/{}",
            self.total_matches, self.reference_tree_external_nodes
        )
    }
}

// =#========================================================================#=
// BUILDER
// =#========================================================================#=
/// Records the prefixes of all placements of a query, then aggregates them
/// once.
///
/// ```text
/// new(separator) ──> set_* / add (append-only) ──> analyze(cutoff) ──> MultiResult
/// ```
///
/// [MultiResultBuilder::analyze] consumes the builder, so a set of records
/// is aggregated exactly once.
#[derive(Debug, Clone)]
pub struct MultiResultBuilder {
    separator: String,
    query_name_prefix: String,
    total_matches: usize,
    reference_tree_external_nodes: usize,
    clade: Vec<Prefix>,
    down: Vec<Prefix>,
    up: Vec<Prefix>,
}

impl MultiResultBuilder {
    /// Starts an empty builder interpreting labels with `separator`.
    ///
    /// # Errors
    /// Returns [AnalysisError::EmptySeparator] if `separator` is empty.
    pub fn new(separator: &str) -> Result<Self, AnalysisError> {
        if separator.is_empty() {
            return Err(AnalysisError::EmptySeparator);
        }
        Ok(MultiResultBuilder {
            separator: separator.to_string(),
            query_name_prefix: String::new(),
            total_matches: 0,
            reference_tree_external_nodes: 0,
            clade: Vec::new(),
            down: Vec::new(),
            up: Vec::new(),
        })
    }

    pub fn set_query_name_prefix(&mut self, query_name_prefix: impl Into<String>) {
        self.query_name_prefix = query_name_prefix.into();
    }

    pub fn set_total_matches(&mut self, total_matches: usize) {
        self.total_matches = total_matches;
    }

    pub fn set_reference_tree_external_nodes(&mut self, count: usize) {
        self.reference_tree_external_nodes = count;
    }

    /// Records `label` with `confidence` for `category`.
    pub fn add(&mut self, category: Category, label: impl Into<String>, confidence: f64) {
        let prefix = Prefix::new(label, confidence);
        match category {
            Category::Clade => self.clade.push(prefix),
            Category::Down => self.down.push(prefix),
            Category::Up => self.up.push(prefix),
        }
    }

    /// Aggregates each category and finalizes the result.
    ///
    /// # Arguments
    /// * `cutoff_for_specifics` - Minimal confidence of a secondary candidate
    ///
    /// # Errors
    /// Returns [AnalysisError::AggregationInvariantViolation] if a category
    /// fails its confidence sum check.
    pub fn analyze(self, cutoff_for_specifics: f64) -> Result<MultiResult, AnalysisError> {
        let finish = |records: &[Prefix], category| -> Result<CategoryResult, AnalysisError> {
            let Aggregation { all, collapsed } = aggregate(records, &self.separator, category)?;
            let specifics = obtain_specifics(cutoff_for_specifics, &all, &collapsed, &self.separator);
            Ok(CategoryResult {
                all,
                collapsed,
                specifics,
            })
        };

        Ok(MultiResult {
            clade: finish(&self.clade, Category::Clade)?,
            down: finish(&self.down, Category::Down)?,
            up: finish(&self.up, Category::Up)?,
            query_name_prefix: self.query_name_prefix,
            total_matches: self.total_matches,
            reference_tree_external_nodes: self.reference_tree_external_nodes,
        })
    }
}
