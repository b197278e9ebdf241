//! Cladewise is a library to classify query sequences placed onto a
//! reference phylogenetic tree into the clades of a hierarchical taxonomy.
//!
//! Reference leaves carry lineage labels such as `A.1.2` (levels joined by a
//! separator, `.` by default). For a query vertex, the labels around it are
//! reduced to their greatest common prefix, yielding the most specific
//! clade the query falls into and the clades bracketing it above and below.
//! Core functionality provided:
//! - Tree model: [PhyloTree], a multifurcating arena tree.
//!   See [crate::model] for more details.
//! - Greatest common prefix engine and the [Prefix] value type,
//!   see [crate::prefix].
//! - Label preparation: normalization of reference labels, identifier
//!   mapping and annotation extraction, see [crate::labels].
//! - Analyses, see [crate::analysis]:
//!   - [SingleAnalysis] classifies individual query vertices,
//!     either by name or by pattern.
//!   - [MultiAnalysis] aggregates all placements of one query (as written
//!     by placement tools, e.g. `Q16611_#1_M=0.25`) into a
//!     confidence-weighted consensus [MultiResult].
//!   - [Assignment] turns a consensus into a report row.
//!
//! Limitations:
//! - Trees are built through the [PhyloTree] API; no file formats are read
//! - Labels are matched as plain strings, no taxonomy database is consulted
//!
//! # Logging
//! Analyses emit [tracing] events (`debug` per query, `warn` per warning,
//! `info` per consensus). Install a subscriber to see them.
//!
//! # Usage patterns
//! 1. The quick API below analyzes with default settings.
//! 2. Configure [SingleAnalysis] or [MultiAnalysis] via their `with_*`
//!    methods for a different separator, query pattern or cutoff.
//!
//! ## Example
//! ```
//! use cladewise::analyze_single;
//! use cladewise::model::tree::PhyloTree;
//!
//! let mut tree = PhyloTree::new();
//! let q = tree.add_leaf("query");
//! let a1 = tree.add_leaf("A.1");
//! let a2 = tree.add_leaf("A.2");
//! let b = tree.add_leaf("B.1");
//! let qa = tree.add_internal(vec![q, a1]);
//! let a = tree.add_internal(vec![qa, a2]);
//! tree.add_root(vec![a, b]);
//!
//! let result = analyze_single(&tree, "query").unwrap();
//! assert_eq!(result.greatest_common_prefix(), "A");
//! assert_eq!(result.least_encompassing_clade_size(), 2);
//! assert_eq!(result.tree_size(), 3);
//! ```

pub mod analysis;
pub mod labels;
pub mod model;
pub mod prefix;

pub use crate::analysis::{
    AnalysisError, Assignment, CladeResult, MultiAnalysis, MultiResult, SingleAnalysis,
};
pub use crate::model::PhyloTree;
pub use crate::prefix::Prefix;

// ============================================================================
// Quick Single Query API
// ============================================================================
/// Analyzes the vertex named `query` with default settings,
/// returning a [CladeResult].
///
/// See [`SingleAnalysis::analyze`] for full documentation.
pub fn analyze_single(tree: &PhyloTree, query: &str) -> Result<CladeResult, AnalysisError> {
    SingleAnalysis::new().analyze(tree, query)
}

// ============================================================================
// Quick Multi Query API
// ============================================================================
/// Normalizes the labels of `tree` and aggregates all placements matching
/// the default query pattern, returning a [MultiResult].
///
/// See [`MultiAnalysis::analyze`] for full documentation.
pub fn analyze_multi(tree: &mut PhyloTree) -> Result<MultiResult, AnalysisError> {
    MultiAnalysis::new().analyze(tree)
}
