//! Analysis of individual query vertices.

use tracing::{debug, warn};

use crate::analysis::confidence::confidence_display;
use crate::analysis::error::AnalysisError;
use crate::analysis::lineage::{Placement, analyze_placement};
use crate::analysis::matcher::{ExactName, QueryMatcher, QueryPattern};
use crate::analysis::result::{CladeResult, CladeResultBuilder, CladeWarning};
use crate::model::tree::{PhyloTree, VertexIndex};

/// Default separator between the levels of a hierarchical label.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Classifies query vertices of a tree individually.
///
/// Labels are expected to be clean already; the tree is only read.
///
/// # Example
/// ```
/// use cladewise::analysis::SingleAnalysis;
/// use cladewise::model::tree::PhyloTree;
///
/// let mut tree = PhyloTree::new();
/// let q = tree.add_leaf("A.1.3");
/// let a1 = tree.add_leaf("A.1.1");
/// let a2 = tree.add_leaf("A.1.2");
/// let b = tree.add_leaf("B.1");
/// let qa1 = tree.add_internal(vec![q, a1]);
/// let inner = tree.add_internal(vec![qa1, a2]);
/// tree.add_root(vec![inner, b]);
///
/// let result = SingleAnalysis::new().analyze(&tree, "A.1.3").unwrap();
/// assert_eq!(result.greatest_common_prefix(), "A.1");
/// assert_eq!(result.greatest_common_prefix_down(), "A.1.1");
/// assert_eq!(result.greatest_common_prefix_up(), "A.1.2");
/// ```
#[derive(Debug, Clone)]
pub struct SingleAnalysis {
    separator: String,
}

impl Default for SingleAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

impl SingleAnalysis {
    /// Creates an analysis with [DEFAULT_SEPARATOR].
    pub fn new() -> Self {
        SingleAnalysis {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Sets the separator between label levels.
    pub fn with_separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_string();
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Analyzes the vertex named `query`, which may also be an internal vertex.
    ///
    /// The tree size counts all external vertices not named `query`.
    ///
    /// # Errors
    /// * [AnalysisError::EmptySeparator] if no separator is configured
    /// * [AnalysisError::QueryNotFound] if no vertex is named `query`
    /// * [AnalysisError::QueryIsRoot] / [AnalysisError::QueryParentIsRoot]
    /// * [AnalysisError::EmptyLabel] if a blank label is met
    pub fn analyze(&self, tree: &PhyloTree, query: &str) -> Result<CladeResult, AnalysisError> {
        self.check_separator()?;
        let index = tree
            .find_by_name(query)
            .ok_or_else(|| AnalysisError::QueryNotFound(query.to_string()))?;
        let matcher = ExactName::new(query);
        let tree_size = tree.find_by(|v| !matcher.is_match(v.name().trim())).len();
        self.analyze_vertex(tree, index, &matcher, tree_size)
    }

    /// Analyzes every external vertex matched by `pattern` on its own.
    ///
    /// All matched vertices are left out of each other's label sets; the tree
    /// size counts all external vertices that are not matched.
    ///
    /// # Returns
    /// One outcome per matched vertex, in declaration order. A failing vertex
    /// does not affect the outcomes of the others.
    ///
    /// # Errors
    /// * [AnalysisError::EmptySeparator] if no separator is configured
    /// * [AnalysisError::NoQueryMatch] if `pattern` matches no external vertex
    pub fn analyze_pattern(
        &self,
        tree: &PhyloTree,
        pattern: &QueryPattern,
    ) -> Result<Vec<Result<CladeResult, AnalysisError>>, AnalysisError> {
        self.check_separator()?;
        let queries = tree.find_by(|v| pattern.is_match(v.name().trim()));
        if queries.is_empty() {
            return Err(AnalysisError::NoQueryMatch(pattern.as_str().to_string()));
        }
        let tree_size = tree.num_external() - queries.len();

        Ok(queries
            .into_iter()
            .map(|index| self.analyze_vertex(tree, index, pattern, tree_size))
            .collect())
    }

    fn check_separator(&self) -> Result<(), AnalysisError> {
        if self.separator.is_empty() {
            return Err(AnalysisError::EmptySeparator);
        }
        Ok(())
    }

    fn analyze_vertex<M: QueryMatcher>(
        &self,
        tree: &PhyloTree,
        query: VertexIndex,
        matcher: &M,
        tree_size: usize,
    ) -> Result<CladeResult, AnalysisError> {
        let query_name = tree[query].name();
        let Placement {
            lineage,
            prefix,
            lec_size,
            down,
            up,
        } = analyze_placement(tree, query, matcher, &self.separator)?;

        let mut builder = CladeResultBuilder::new(query_name);
        if prefix.is_empty() {
            warn!(query = query_name, "{}", CladeWarning::NoCommonPrefix);
            builder.add_warning(CladeWarning::NoCommonPrefix);
        }
        if lec_size == tree_size {
            warn!(query = query_name, "{}", CladeWarning::LecIsEntireTree);
            builder.add_warning(CladeWarning::LecIsEntireTree);
        }

        debug!(
            query = query_name,
            lec_size,
            prefix = %prefix,
            down = %down.prefix,
            up = %up.prefix,
            "analyzed query"
        );

        builder.set_sizes(lec_size, tree_size);
        builder.set_clade_confidence(confidence_display(
            tree[lineage.grandparent].branch_confidences(),
        ));
        builder.set_down_confidence(
            down.confidence_source
                .and_then(|i| confidence_display(tree[i].branch_confidences())),
        );
        builder.set_up_confidence(
            up.confidence_source
                .and_then(|i| confidence_display(tree[i].branch_confidences())),
        );
        builder.set_greatest_common_prefix(prefix);
        builder.set_greatest_common_prefix_down(down.prefix);
        builder.set_greatest_common_prefix_up(up.prefix);

        Ok(builder.finish())
    }
}
