//! Provides the reference tree representation.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [`PhyloTree`] - Main tree structure using the arena pattern
//! * [VertexIndex] as type used to index vertices in tree
//! * [PreOrderIter] and [ExternalDescendants] as traversal iterators

use crate::model::vertex::{BranchConfidence, Vertex};

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A multifurcating phylogenetic tree represented using the arena pattern
/// on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]. Parent navigation is plain array indexing, so there are
/// no reference cycles between parents and children.
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena.
/// - Index of root is maintained.
/// - Children are kept in declaration order; this order is the order in
///   which leaves are reported by [`PhyloTree::external_descendants`].
/// - Internal vertices may be unary.
///
/// # Construction
/// Construction is bottom-up: add leaves, then internal vertices referring
/// to already added children, and finally the root.
/// ```
/// use cladewise::model::tree::PhyloTree;
///
/// let mut tree = PhyloTree::new();
/// let a = tree.add_leaf("A.1");
/// let b = tree.add_leaf("A.2");
/// let c = tree.add_leaf("B.1");
/// let ab = tree.add_internal(vec![a, b]);
/// tree.add_root(vec![ab, c]);
///
/// assert_eq!(tree.num_external(), 3);
/// assert_eq!(tree.parent(a), Some(ab));
/// ```
#[derive(Debug, Clone)]
pub struct PhyloTree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: VertexIndex,

    /// Name of tree; optional
    name: Option<String>,
}

impl Default for PhyloTree {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// New, construction (pub)
// ============================================================================
impl PhyloTree {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        PhyloTree {
            vertices: Vec::new(),
            root_index: NO_ROOT_SET_INDEX,
            name: None,
        }
    }

    /// Creates a new, empty tree with room for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        PhyloTree {
            vertices: Vec::with_capacity(num_vertices),
            root_index: NO_ROOT_SET_INDEX,
            name: None,
        }
    }

    /// Attaches a name to this tree.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `name` - Label of this leaf
    ///
    /// # Returns
    /// The index of the newly created leaf vertex.
    pub fn add_leaf(&mut self, name: impl Into<String>) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_leaf(index, name));
        index
    }

    /// Adds an internal vertex to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Indices of already added children, in order
    ///
    /// # Returns
    /// The index of the newly created internal vertex.
    ///
    /// # Panics
    /// Panics if `children` is empty or refers to a vertex not yet added.
    pub fn add_internal(&mut self, children: Vec<VertexIndex>) -> VertexIndex {
        assert!(!children.is_empty(), "Internal vertex needs at least one child");
        let index = self.vertices.len();
        for &child in &children {
            self[child].set_parent(index);
        }
        self.vertices.push(Vertex::new_internal(index, children));
        index
    }

    /// Adds the root to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Indices of already added children, in order
    ///
    /// # Returns
    /// The index of the newly created root vertex.
    ///
    /// # Panics
    /// Panics if `children` refers to a vertex not yet added.
    pub fn add_root(&mut self, children: Vec<VertexIndex>) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self[child].set_parent(index);
        }
        self.vertices.push(Vertex::new_root(index, children));
        self.root_index = index;
        index
    }

    /// Sets the confidences of the branch leading into vertex `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds or is the root.
    pub fn set_branch_confidences(
        &mut self,
        index: VertexIndex,
        confidences: Vec<BranchConfidence>,
    ) {
        self[index].set_branch_confidences(confidences);
    }

    /// Renames vertex `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set_name(&mut self, index: VertexIndex, name: impl Into<String>) {
        self[index].set_name(name);
    }
}

// ============================================================================
// Getters / Accessors, navigation (pub)
// ============================================================================
impl PhyloTree {
    /// Returns reference to name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of external vertices reachable from the root.
    pub fn num_external(&self) -> usize {
        if !self.is_root_set() {
            return 0;
        }
        self.external_descendants(self.root_index).count()
    }

    /// Returns the parent of vertex `index`, or `None` for the root.
    pub fn parent(&self, index: VertexIndex) -> Option<VertexIndex> {
        self[index].parent()
    }

    /// Returns the children of vertex `index` in declaration order.
    pub fn children(&self, index: VertexIndex) -> &[VertexIndex] {
        self[index].children()
    }

    /// Returns whether vertex `index` is the root.
    pub fn is_root(&self, index: VertexIndex) -> bool {
        self[index].is_root()
    }

    /// Returns whether vertex `index` has no children.
    pub fn is_external(&self, index: VertexIndex) -> bool {
        self[index].is_external()
    }

    /// Returns the position of vertex `index` among its parent's children,
    /// or `None` for the root.
    pub fn child_index(&self, index: VertexIndex) -> Option<usize> {
        let parent = self.parent(index)?;
        self.children(parent).iter().position(|&c| c == index)
    }

    /// Returns whether `index` lies in the subtree rooted at `subtree_root`
    /// (a vertex lies in its own subtree).
    pub fn is_in_subtree(&self, index: VertexIndex, subtree_root: VertexIndex) -> bool {
        let mut current = Some(index);
        while let Some(v) = current {
            if v == subtree_root {
                return true;
            }
            current = self.parent(v);
        }
        false
    }

    /// Returns the first vertex in pre-order whose name equals `name`.
    pub fn find_by_name(&self, name: &str) -> Option<VertexIndex> {
        self.pre_order_iter()
            .find(|v| v.name() == name)
            .map(|v| v.index())
    }

    /// Returns all external vertices satisfying `predicate`, in pre-order
    /// (i.e. the order in which they were declared left to right).
    pub fn find_by<P>(&self, mut predicate: P) -> Vec<VertexIndex>
    where
        P: FnMut(&Vertex) -> bool,
    {
        self.external_vertices()
            .filter(|&i| predicate(&self[i]))
            .collect()
    }

    /// Returns an iterator over all external vertices, left to right.
    pub fn external_vertices(&self) -> ExternalDescendants<'_> {
        ExternalDescendants::new(self, self.root_index)
    }
}

impl std::ops::Index<VertexIndex> for PhyloTree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl std::ops::IndexMut<VertexIndex> for PhyloTree {
    fn index_mut(&mut self, index: VertexIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl PhyloTree {
    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// Children are visited in declaration order.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    /// Returns a lazy iterator over the external vertices in the subtree
    /// rooted at `index`, left to right. An external vertex yields itself.
    pub fn external_descendants(&self, index: VertexIndex) -> ExternalDescendants<'_> {
        ExternalDescendants::new(self, index)
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a PhyloTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        // Push children in reverse, so first child is processed first
        self.stack.extend(vertex.children().iter().rev());

        Some(vertex)
    }
}

/// Lazy iterator over the external vertices of a subtree, left to right.
pub struct ExternalDescendants<'a> {
    tree: &'a PhyloTree,
    stack: Vec<VertexIndex>,
}

impl<'a> ExternalDescendants<'a> {
    fn new(tree: &'a PhyloTree, subtree_root: VertexIndex) -> Self {
        let mut stack = Vec::new();
        if subtree_root < tree.num_vertices() {
            stack.push(subtree_root);
        }
        ExternalDescendants { tree, stack }
    }
}

impl Iterator for ExternalDescendants<'_> {
    type Item = VertexIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.stack.pop() {
            let children = self.tree.children(index);
            if children.is_empty() {
                return Some(index);
            }
            self.stack.extend(children.iter().rev());
        }
        None
    }
}
