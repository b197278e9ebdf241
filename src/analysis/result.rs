//! Result of analyzing a single query vertex.

use std::fmt;

// =#========================================================================#=
// WARNING
// =#========================================================================#=
/// Conditions that weaken a [CladeResult] without invalidating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CladeWarning {
    /// The labels of the least encompassing clade share no prefix.
    NoCommonPrefix,
    /// The least encompassing clade is the entire tree.
    LecIsEntireTree,
}

impl fmt::Display for CladeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CladeWarning::NoCommonPrefix => f.write_str("No greatest common prefix"),
            CladeWarning::LecIsEntireTree => {
                f.write_str("Least Encompassing Clade is entire tree")
            }
        }
    }
}

// =#========================================================================#=
// CLADE RESULT
// =#========================================================================#=
/// Classification of one query vertex: the greatest common prefix of its
/// least encompassing clade (LEC) and of the clades bracketing it.
///
/// Created through [CladeResultBuilder]; immutable afterwards.
///
/// # Invariants
/// - `lec_size <= tree_size`, with equality iff the LEC is the entire tree,
///   in which case [CladeWarning::LecIsEntireTree] is present
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CladeResult {
    query: String,
    greatest_common_prefix: String,
    greatest_common_prefix_up: String,
    greatest_common_prefix_down: String,
    lec_size: usize,
    tree_size: usize,
    warnings: Vec<CladeWarning>,
    clade_confidence: Option<String>,
    up_confidence: Option<String>,
    down_confidence: Option<String>,
}

impl CladeResult {
    /// Returns the name of the analyzed query vertex.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the greatest common prefix of the LEC (empty if none).
    pub fn greatest_common_prefix(&self) -> &str {
        &self.greatest_common_prefix
    }

    /// Returns the greatest common prefix of the up-tree bracketing clade.
    pub fn greatest_common_prefix_up(&self) -> &str {
        &self.greatest_common_prefix_up
    }

    /// Returns the greatest common prefix of the down-tree bracketing clade.
    pub fn greatest_common_prefix_down(&self) -> &str {
        &self.greatest_common_prefix_down
    }

    /// Returns the number of reference labels in the LEC.
    pub fn least_encompassing_clade_size(&self) -> usize {
        self.lec_size
    }

    /// Returns the number of reference labels in the tree.
    pub fn tree_size(&self) -> usize {
        self.tree_size
    }

    pub fn warnings(&self) -> &[CladeWarning] {
        &self.warnings
    }

    pub fn has_warning(&self, warning: CladeWarning) -> bool {
        self.warnings.contains(&warning)
    }

    /// Returns the branch confidences of the LEC as display text.
    pub fn clade_confidence(&self) -> Option<&str> {
        self.clade_confidence.as_deref()
    }

    /// Returns the branch confidences of the up-tree bracket as display text,
    /// if the bracket consists of a single sibling subtree.
    pub fn up_confidence(&self) -> Option<&str> {
        self.up_confidence.as_deref()
    }

    /// Returns the branch confidences of the down-tree bracket as display text,
    /// if the bracket consists of a single sibling subtree.
    pub fn down_confidence(&self) -> Option<&str> {
        self.down_confidence.as_deref()
    }
}

impl fmt::Display for CladeResult {
    /// Multi-line summary, e.g.
    /// ```text
    /// Query: A.1.1.1
    /// Matching Clade: A.1
    /// Down-tree Bracketing Clade: A.1.1
    /// Up-tree Bracketing Clade: A.1.2.1
    /// Least Encompassing Clade Size: 4/25
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Query: {}", self.query)?;
        write!(f, "Matching Clade: {}", self.greatest_common_prefix)?;
        if let Some(confidence) = &self.clade_confidence {
            write!(f, " ({confidence})")?;
        }
        writeln!(f)?;
        write!(f, "Down-tree Bracketing Clade: {}", self.greatest_common_prefix_down)?;
        if let Some(confidence) = &self.down_confidence {
            write!(f, " ({confidence})")?;
        }
        writeln!(f)?;
        write!(f, "Up-tree Bracketing Clade: {}", self.greatest_common_prefix_up)?;
        if let Some(confidence) = &self.up_confidence {
            write!(f, " ({confidence})")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Least Encompassing Clade Size: {}/{}",
            self.lec_size, self.tree_size
        )?;
        for warning in &self.warnings {
            writeln!(f, "Warning: {warning}")?;
        }
        Ok(())
    }
}

// =#========================================================================#=
// BUILDER
// =#========================================================================#=
/// Collects the parts of a [CladeResult] while a query is analyzed.
///
/// ```text
/// new(query) ──> set_* / add_warning (any order) ──> finish() ──> CladeResult
/// ```
#[derive(Debug, Clone)]
pub struct CladeResultBuilder {
    result: CladeResult,
}

impl CladeResultBuilder {
    /// Starts a result for the query vertex named `query`.
    pub fn new(query: impl Into<String>) -> Self {
        CladeResultBuilder {
            result: CladeResult {
                query: query.into(),
                ..Default::default()
            },
        }
    }

    pub fn set_greatest_common_prefix(&mut self, prefix: impl Into<String>) {
        self.result.greatest_common_prefix = prefix.into();
    }

    pub fn set_greatest_common_prefix_up(&mut self, prefix: impl Into<String>) {
        self.result.greatest_common_prefix_up = prefix.into();
    }

    pub fn set_greatest_common_prefix_down(&mut self, prefix: impl Into<String>) {
        self.result.greatest_common_prefix_down = prefix.into();
    }

    /// Sets the size of the least encompassing clade and of the whole tree,
    /// both counted in reference labels.
    pub fn set_sizes(&mut self, lec_size: usize, tree_size: usize) {
        self.result.lec_size = lec_size;
        self.result.tree_size = tree_size;
    }

    pub fn add_warning(&mut self, warning: CladeWarning) {
        if !self.result.warnings.contains(&warning) {
            self.result.warnings.push(warning);
        }
    }

    pub fn set_clade_confidence(&mut self, confidence: Option<String>) {
        self.result.clade_confidence = confidence;
    }

    pub fn set_up_confidence(&mut self, confidence: Option<String>) {
        self.result.up_confidence = confidence;
    }

    pub fn set_down_confidence(&mut self, confidence: Option<String>) {
        self.result.down_confidence = confidence;
    }

    /// Finalizes the result.
    pub fn finish(self) -> CladeResult {
        self.result
    }
}
