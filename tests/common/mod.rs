#![allow(dead_code)]

use cladewise::model::tree::{PhyloTree, VertexIndex};

/// Reference tree with 26 lineage-labelled leaves:
/// ```text
/// (
///   ( ((A.1.1.1, A.1.1.2, A.1.1.3, (A.1.1.4)), A.1.2.1),      <- below a unary vertex
///     (A.2.1.1, A.2.1.2),
///     ( (((A.3.1.1, A.3.1.2), A.3.2.1), A.3.3.1),
///       (A.5.1.1, A.5.1.2),
///       ((A.4.1.1, A.4.1.1.a), (A.4.1.2, A.4.1.2.a)),
///       A.6.3.12 ) ),
///   (B.1.1.1, B.1.234.3),
///   ( (((C.1.1.1, C.1.1.2), C.1.2.1), C.2.1), C.3 ), QE.1.1.1.2.1 )
/// )
/// ```
pub fn reference_tree() -> PhyloTree {
    let mut tree = PhyloTree::new();

    // A.1, hanging below a unary vertex
    let a1111 = tree.add_leaf("A.1.1.1");
    let a1112 = tree.add_leaf("A.1.1.2");
    let a1113 = tree.add_leaf("A.1.1.3");
    let a1114 = tree.add_leaf("A.1.1.4");
    let a1114_unary = tree.add_internal(vec![a1114]);
    let a11 = tree.add_internal(vec![a1111, a1112, a1113, a1114_unary]);
    let a1211 = tree.add_leaf("A.1.2.1");
    let a1 = tree.add_internal(vec![a11, a1211]);
    let a1_unary = tree.add_internal(vec![a1]);

    // A.2
    let a2111 = tree.add_leaf("A.2.1.1");
    let a2112 = tree.add_leaf("A.2.1.2");
    let a2 = tree.add_internal(vec![a2111, a2112]);

    // A.3
    let a3111 = tree.add_leaf("A.3.1.1");
    let a3112 = tree.add_leaf("A.3.1.2");
    let a31 = tree.add_internal(vec![a3111, a3112]);
    let a3211 = tree.add_leaf("A.3.2.1");
    let a31_32 = tree.add_internal(vec![a31, a3211]);
    let a3311 = tree.add_leaf("A.3.3.1");
    let a3 = tree.add_internal(vec![a31_32, a3311]);

    // A.5
    let a5111 = tree.add_leaf("A.5.1.1");
    let a5112 = tree.add_leaf("A.5.1.2");
    let a5 = tree.add_internal(vec![a5111, a5112]);

    // A.4
    let a4111 = tree.add_leaf("A.4.1.1");
    let a4111a = tree.add_leaf("A.4.1.1.a");
    let a411 = tree.add_internal(vec![a4111, a4111a]);
    let a4112 = tree.add_leaf("A.4.1.2");
    let a4112a = tree.add_leaf("A.4.1.2.a");
    let a412 = tree.add_internal(vec![a4112, a4112a]);
    let a4 = tree.add_internal(vec![a411, a412]);

    let a6 = tree.add_leaf("A.6.3.12");
    let a3_to_a6 = tree.add_internal(vec![a3, a5, a4, a6]);
    let a = tree.add_internal(vec![a1_unary, a2, a3_to_a6]);

    // B
    let b111 = tree.add_leaf("B.1.1.1");
    let b12343 = tree.add_leaf("B.1.234.3");
    let b = tree.add_internal(vec![b111, b12343]);

    // C and QE
    let c111 = tree.add_leaf("C.1.1.1");
    let c112 = tree.add_leaf("C.1.1.2");
    let c11 = tree.add_internal(vec![c111, c112]);
    let c121 = tree.add_leaf("C.1.2.1");
    let c1 = tree.add_internal(vec![c11, c121]);
    let c21 = tree.add_leaf("C.2.1");
    let c1_c2 = tree.add_internal(vec![c1, c21]);
    let c3 = tree.add_leaf("C.3");
    let c = tree.add_internal(vec![c1_c2, c3]);
    let qe = tree.add_leaf("QE.1.1.1.2.1");
    let c_qe = tree.add_internal(vec![c, qe]);

    tree.add_root(vec![a, b, c_qe]);
    tree
}

/// Small reference tree `(((A.1.1, A.1.2), (A.2.1, A.2.2)), (B.1.1, B.1.2))`
/// with one placement grafted onto each of the branches leading to
/// `A.1.1`, `A.1.2` and `B.1.1`, named `names[0..3]` respectively.
pub fn placement_tree(names: [&str; 3]) -> PhyloTree {
    let mut tree = PhyloTree::new();

    let a11 = tree.add_leaf("A.1.1");
    let q1 = tree.add_leaf(names[0]);
    let x1 = tree.add_internal(vec![a11, q1]);
    let a12 = tree.add_leaf("A.1.2");
    let q2 = tree.add_leaf(names[1]);
    let x2 = tree.add_internal(vec![a12, q2]);
    let a1 = tree.add_internal(vec![x1, x2]);

    let a21 = tree.add_leaf("A.2.1");
    let a22 = tree.add_leaf("A.2.2");
    let a2 = tree.add_internal(vec![a21, a22]);
    let a = tree.add_internal(vec![a1, a2]);

    let b11 = tree.add_leaf("B.1.1");
    let q3 = tree.add_leaf(names[2]);
    let x3 = tree.add_internal(vec![b11, q3]);
    let b12 = tree.add_leaf("B.1.2");
    let b = tree.add_internal(vec![x3, b12]);

    tree.add_root(vec![a, b]);
    tree
}

/// [placement_tree] with placements of query `Q16611` weighted 0.6, 0.3 and 0.1.
pub fn default_placement_tree() -> PhyloTree {
    placement_tree([
        "Q16611_#1_M=0.6",
        "Q16611_#2_M=0.3",
        "Q16611_#3_M=0.1",
    ])
}

/// Returns the index of the vertex named `name`.
pub fn index_of(tree: &PhyloTree, name: &str) -> VertexIndex {
    tree.find_by_name(name).unwrap()
}

/// Returns the names of the external vertices, left to right.
pub fn external_names(tree: &PhyloTree) -> Vec<String> {
    tree.external_vertices()
        .map(|i| tree[i].name().to_string())
        .collect()
}
