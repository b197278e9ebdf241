//! Tree traversal shared by the single and multi query analyses.
//!
//! Around a query vertex `q` with parent `p` and grandparent `pp`:
//! * the least encompassing clade (LEC) is the subtree of `pp`,
//! * the down-tree bracket is formed by the siblings of `q` under `p`,
//! * the up-tree bracket is formed by the siblings of `p` under `pp`.
//!
//! Unary vertices are skipped when determining `p` and `pp`.

use crate::analysis::error::AnalysisError;
use crate::analysis::matcher::QueryMatcher;
use crate::model::tree::{PhyloTree, VertexIndex};
use crate::prefix::greatest_common_prefix;

/// Ancestors of a query vertex relevant to an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Lineage {
    pub query: VertexIndex,
    pub parent: VertexIndex,
    pub grandparent: VertexIndex,
}

/// Greatest common prefix of one sibling set, plus the sibling whose branch
/// describes the bracket if there is exactly one.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Bracket {
    pub prefix: String,
    pub confidence_source: Option<VertexIndex>,
}

/// Outcome of the structural analysis of one query vertex.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Placement {
    pub lineage: Lineage,
    /// Greatest common prefix of the LEC, without query vertices
    pub prefix: String,
    /// Number of non-query external vertices in the LEC
    pub lec_size: usize,
    pub down: Bracket,
    pub up: Bracket,
}

impl Lineage {
    /// Determines parent and grandparent of `query`, skipping unary vertices.
    ///
    /// Parent and grandparent are each moved up independently while they
    /// have a single child, so both may end up on the same vertex.
    ///
    /// # Errors
    /// [AnalysisError::QueryIsRoot] or [AnalysisError::QueryParentIsRoot].
    pub fn locate(tree: &PhyloTree, query: VertexIndex) -> Result<Self, AnalysisError> {
        let query_name = || tree[query].name().to_string();

        let parent = tree
            .parent(query)
            .ok_or_else(|| AnalysisError::QueryIsRoot(query_name()))?;
        let grandparent = tree
            .parent(parent)
            .ok_or_else(|| AnalysisError::QueryParentIsRoot(query_name()))?;

        Ok(Lineage {
            query,
            parent: skip_unary(tree, parent),
            grandparent: skip_unary(tree, grandparent),
        })
    }
}

/// Runs the structural analysis of `query`: LEC and both brackets.
///
/// Every external vertex matched by `matcher` is left out of the label
/// sets, so that other placements of the same query do not count as
/// reference labels.
pub(crate) fn analyze_placement<M: QueryMatcher>(
    tree: &PhyloTree,
    query: VertexIndex,
    matcher: &M,
    separator: &str,
) -> Result<Placement, AnalysisError> {
    let lineage = Lineage::locate(tree, query)?;

    let lec_names = reference_names(tree, lineage.grandparent, matcher)?;
    let prefix = greatest_common_prefix(&lec_names, separator);

    let down = sibling_bracket(tree, lineage.query, lineage.parent, matcher, separator)?;
    let up = sibling_bracket(tree, lineage.parent, lineage.grandparent, matcher, separator)?;

    Ok(Placement {
        lineage,
        prefix,
        lec_size: lec_names.len(),
        down,
        up,
    })
}

fn skip_unary(tree: &PhyloTree, mut vertex: VertexIndex) -> VertexIndex {
    while tree.children(vertex).len() == 1 {
        match tree.parent(vertex) {
            Some(parent) => vertex = parent,
            None => break,
        }
    }
    vertex
}

/// Collects the trimmed names of all non-query external vertices below `subtree_root`.
fn reference_names<'t, M: QueryMatcher>(
    tree: &'t PhyloTree,
    subtree_root: VertexIndex,
    matcher: &M,
) -> Result<Vec<&'t str>, AnalysisError> {
    let mut names = Vec::new();
    for index in tree.external_descendants(subtree_root) {
        let name = tree[index].name().trim();
        if name.is_empty() {
            return Err(AnalysisError::EmptyLabel { vertex: index });
        }
        if !matcher.is_match(name) {
            names.push(name);
        }
    }
    Ok(names)
}

/// Greatest common prefix over the subtrees of all children of `parent`
/// except the one leading towards `child`.
///
/// If `child` does not lie below any child of `parent` (both were moved onto
/// the same vertex by unary skipping), all children are taken.
fn sibling_bracket<M: QueryMatcher>(
    tree: &PhyloTree,
    child: VertexIndex,
    parent: VertexIndex,
    matcher: &M,
    separator: &str,
) -> Result<Bracket, AnalysisError> {
    let children = tree.children(parent);
    let towards_child = children
        .iter()
        .copied()
        .find(|&c| tree.is_in_subtree(child, c));

    let mut names = Vec::new();
    let mut siblings = Vec::with_capacity(children.len());
    for &sibling in children {
        if Some(sibling) == towards_child {
            continue;
        }
        names.extend(reference_names(tree, sibling, matcher)?);
        siblings.push(sibling);
    }

    Ok(Bracket {
        prefix: greatest_common_prefix(&names, separator),
        confidence_source: match siblings[..] {
            [single] => Some(single),
            _ => None,
        },
    })
}
