//! Arena tree model the analyses run on.

pub mod tree;
pub mod vertex;

pub use tree::{PhyloTree, VertexIndex};
pub use vertex::{BranchConfidence, Vertex};
