//! Vertex module for the reference tree onto which queries are placed.

use crate::model::tree::VertexIndex;

/// During construction, Internal and Leaf vertices might not have parent set yet.
pub(crate) const NO_PARENT_SET: VertexIndex = usize::MAX;

/// Value placement tools write for a confidence that was never computed.
pub const UNSET_CONFIDENCE: f64 = -9999.0;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a reference tree.
///
/// A vertex can be either:
/// - **Root**: Has no parent, any number of children, no incoming branch
/// - **Internal**: Has a parent and at least one child (unary vertices are allowed,
///   placement tools leave them behind when they graft queries onto branches)
/// - **Leaf**: Has a parent and no children
///
/// Every vertex carries a name. For leaves this is the hierarchical label
/// (e.g. `A.1.2`) or the query name; internal names are usually empty.
/// Non-root vertices may carry confidences of their incoming branch.
///
/// # Invariants
/// - `index` is the position in the arena
/// - `parent` is `NO_PARENT_SET = usize::MAX` only during construction
/// - `children` keeps the order in which the children were declared
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex {
    /// Root vertex of the tree (has no parent)
    Root {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Indices of the child vertices, in declaration order
        children: Vec<VertexIndex>,
        /// Name of this vertex, possibly empty
        name: String,
    },
    /// Internal vertex (has parent and at least one child)
    Internal {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Indices of the child vertices, in declaration order
        children: Vec<VertexIndex>,
        /// Name of this vertex, possibly empty
        name: String,
        /// Confidences of the incoming branch
        confidences: Vec<BranchConfidence>,
    },
    /// Leaf vertex (has parent, no children)
    Leaf {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Label of this leaf
        name: String,
        /// Confidences of the incoming branch
        confidences: Vec<BranchConfidence>,
    },
}

impl Vertex {
    /// Creates a new root vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Child indices in declaration order
    pub fn new_root(index: VertexIndex, children: Vec<VertexIndex>) -> Self {
        Vertex::Root {
            index,
            children,
            name: String::new(),
        }
    }

    /// Creates a new internal (non-leaf, non-root) vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Child indices in declaration order
    pub fn new_internal(index: VertexIndex, children: Vec<VertexIndex>) -> Self {
        Vertex::Internal {
            index,
            parent: NO_PARENT_SET,
            children,
            name: String::new(),
            confidences: Vec::new(),
        }
    }

    /// Creates a new leaf vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `name` - Label of the leaf
    pub fn new_leaf(index: VertexIndex, name: impl Into<String>) -> Self {
        Vertex::Leaf {
            index,
            parent: NO_PARENT_SET,
            name: name.into(),
            confidences: Vec::new(),
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        match self {
            Vertex::Root { index, .. } => *index,
            Vertex::Internal { index, .. } => *index,
            Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns the name of this vertex (empty if none was given).
    pub fn name(&self) -> &str {
        match self {
            Vertex::Root { name, .. } | Vertex::Internal { name, .. } | Vertex::Leaf { name, .. } => {
                name
            }
        }
    }

    /// Replaces the name of this vertex.
    pub fn set_name(&mut self, new_name: impl Into<String>) {
        match self {
            Vertex::Root { name, .. } | Vertex::Internal { name, .. } | Vertex::Leaf { name, .. } => {
                *name = new_name.into()
            }
        }
    }

    /// Returns the children in declaration order (empty slice for leaves).
    pub fn children(&self) -> &[VertexIndex] {
        match self {
            Vertex::Root { children, .. } | Vertex::Internal { children, .. } => children,
            Vertex::Leaf { .. } => &[],
        }
    }

    /// Returns the number of children.
    pub fn num_children(&self) -> usize {
        self.children().len()
    }

    /// Returns the confidences of the incoming branch (always empty for the root).
    pub fn branch_confidences(&self) -> &[BranchConfidence] {
        match self {
            Vertex::Root { .. } => &[],
            Vertex::Internal { confidences, .. } | Vertex::Leaf { confidences, .. } => confidences,
        }
    }

    /// Sets the confidences of the incoming branch.
    ///
    /// # Panics
    /// Panics if called on root, which has no incoming branch.
    pub fn set_branch_confidences(&mut self, new_confidences: Vec<BranchConfidence>) {
        match self {
            Vertex::Root { .. } => panic!("Cannot set branch confidences on root vertex"),
            Vertex::Internal { confidences, .. } | Vertex::Leaf { confidences, .. } => {
                *confidences = new_confidences
            }
        }
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Vertex::Leaf { .. })
    }

    /// Returns `true` if this vertex has no children.
    ///
    /// Differs from [Vertex::is_leaf] only for a root without children.
    pub fn is_external(&self) -> bool {
        self.children().is_empty()
    }

    /// Returns `true` if this vertex is an internal vertex.
    pub fn is_internal(&self) -> bool {
        matches!(self, Vertex::Internal { .. })
    }

    /// Returns `true` if this vertex is a root.
    pub fn is_root(&self) -> bool {
        matches!(self, Vertex::Root { .. })
    }

    /// Sets new parent for non-root vertex.
    ///
    /// # Panics
    /// Panics if called on root.
    pub fn set_parent(&mut self, parent: VertexIndex) {
        match self {
            Vertex::Root { .. } => panic!("Cannot set parent on root vertex"),
            Vertex::Internal { parent: p, .. } => *p = parent,
            Vertex::Leaf { parent: p, .. } => *p = parent,
        }
    }

    /// Returns the index of parent if this a non-root vertex, else `None`.
    ///
    /// Note that parent might not be set yet during construction.
    pub fn parent(&self) -> Option<VertexIndex> {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                if *parent == NO_PARENT_SET {
                    None
                } else {
                    Some(*parent)
                }
            }
            Vertex::Root { .. } => None,
        }
    }
}

// =#========================================================================#=
// BRANCH CONFIDENCE
// =#========================================================================#=
/// A typed support value on the branch leading into a vertex,
/// e.g. a bootstrap value or a placement likelihood weight.
///
/// A value equal to [UNSET_CONFIDENCE] is stored as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchConfidence {
    /// Type of the confidence, e.g. "bootstrap"; may be empty
    pub kind: String,
    /// Value, or `None` if never computed
    pub value: Option<f64>,
}

impl BranchConfidence {
    /// Creates a new branch confidence, mapping the unset sentinel to `None`.
    ///
    /// # Arguments
    /// * `kind` - Type of the confidence
    /// * `value` - Raw value as written by the producing tool
    pub fn new(kind: impl Into<String>, value: f64) -> Self {
        let value = if value == UNSET_CONFIDENCE {
            None
        } else {
            Some(value)
        };
        BranchConfidence {
            kind: kind.into(),
            value,
        }
    }

    /// Returns whether this confidence carries an actual value.
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }
}
