mod common;

use cladewise::analysis::{
    AnalysisError, CladeWarning, ErrorCategory, QueryPattern, SingleAnalysis,
};
use cladewise::analyze_single;
use cladewise::model::tree::PhyloTree;
use cladewise::model::vertex::{BranchConfidence, UNSET_CONFIDENCE};
use common::reference_tree;

/// (query, prefix, down, up, lec size, number of warnings)
const EXPECTED: [(&str, &str, &str, &str, usize, usize); 26] = [
    ("A.1.1.1", "A.1", "A.1.1", "A.1.2.1", 4, 0),
    ("A.1.1.2", "A.1", "A.1.1", "A.1.2.1", 4, 0),
    ("A.1.1.3", "A.1", "A.1.1", "A.1.2.1", 4, 0),
    ("A.1.1.4", "A.1.1", "A.1.1", "A.1.1", 3, 0),
    ("A.1.2.1", "A", "A.1.1", "A", 17, 0),
    ("A.2.1.1", "A", "A.2.1.2", "A", 17, 0),
    ("A.2.1.2", "A", "A.2.1.1", "A", 17, 0),
    ("A.3.1.1", "A.3", "A.3.1.2", "A.3.2.1", 2, 0),
    ("A.3.1.2", "A.3", "A.3.1.1", "A.3.2.1", 2, 0),
    ("A.3.2.1", "A.3", "A.3.1", "A.3.3.1", 3, 0),
    ("A.3.3.1", "A", "A.3", "A", 10, 0),
    ("A.4.1.1", "A.4.1", "A.4.1.1.a", "A.4.1.2", 3, 0),
    ("A.4.1.1.a", "A.4.1", "A.4.1.1", "A.4.1.2", 3, 0),
    ("A.4.1.2", "A.4.1", "A.4.1.2.a", "A.4.1.1", 3, 0),
    ("A.4.1.2.a", "A.4.1", "A.4.1.2", "A.4.1.1", 3, 0),
    ("A.5.1.1", "A", "A.5.1.2", "A", 10, 0),
    ("A.5.1.2", "A", "A.5.1.1", "A", 10, 0),
    ("A.6.3.12", "A", "A", "A", 17, 0),
    ("B.1.1.1", "", "B.1.234.3", "", 25, 2),
    ("B.1.234.3", "", "B.1.1.1", "", 25, 2),
    ("C.1.1.1", "C.1", "C.1.1.2", "C.1.2.1", 2, 0),
    ("C.1.1.2", "C.1", "C.1.1.1", "C.1.2.1", 2, 0),
    ("C.1.2.1", "C", "C.1.1", "C.2.1", 3, 0),
    ("C.2.1", "C", "C.1", "C.3", 4, 0),
    ("C.3", "", "C", "QE.1.1.1.2.1", 5, 1),
    ("QE.1.1.1.2.1", "", "C", "", 25, 2),
];

#[test]
fn test_reference_tree_queries() {
    let tree = reference_tree();
    let analysis = SingleAnalysis::new();
    for (query, prefix, down, up, lec_size, warnings) in EXPECTED {
        let result = analysis.analyze(&tree, query).unwrap();
        assert_eq!(result.query(), query);
        assert_eq!(result.greatest_common_prefix(), prefix, "prefix of {query}");
        assert_eq!(result.greatest_common_prefix_down(), down, "down of {query}");
        assert_eq!(result.greatest_common_prefix_up(), up, "up of {query}");
        assert_eq!(result.least_encompassing_clade_size(), lec_size, "LEC of {query}");
        assert_eq!(result.tree_size(), 25, "tree size of {query}");
        assert_eq!(result.warnings().len(), warnings, "warnings of {query}");
    }
}

#[test]
fn test_query_in_a1() {
    let tree = reference_tree();
    let result = analyze_single(&tree, "A.1.1.1").unwrap();
    assert_eq!(result.greatest_common_prefix(), "A.1");
    assert_eq!(result.greatest_common_prefix_down(), "A.1.1");
    assert_eq!(result.greatest_common_prefix_up(), "A.1.2.1");
    assert_eq!(result.least_encompassing_clade_size(), 4);
    assert_eq!(result.tree_size(), 25);
    assert!(result.warnings().is_empty());
}

#[test]
fn test_lec_is_entire_tree() {
    let tree = reference_tree();
    let result = analyze_single(&tree, "B.1.1.1").unwrap();
    assert_eq!(result.greatest_common_prefix(), "");
    assert_eq!(result.least_encompassing_clade_size(), result.tree_size());
    assert!(result.has_warning(CladeWarning::NoCommonPrefix));
    assert!(result.has_warning(CladeWarning::LecIsEntireTree));
}

#[test]
fn test_no_common_prefix_below_root() {
    let tree = reference_tree();
    let result = analyze_single(&tree, "C.3").unwrap();
    assert_eq!(result.warnings(), &[CladeWarning::NoCommonPrefix]);
    assert!(result.least_encompassing_clade_size() < result.tree_size());
}

#[test]
fn test_lec_equals_tree_size_iff_warned() {
    let assert_iff = |tree: &PhyloTree, query: &str| {
        let result = analyze_single(tree, query).unwrap();
        assert_eq!(
            result.least_encompassing_clade_size() == result.tree_size(),
            result.has_warning(CladeWarning::LecIsEntireTree),
            "{query}"
        );
        result
    };

    let tree = reference_tree();
    for (query, ..) in EXPECTED {
        assert_iff(&tree, query);
    }

    // root((A.1.1, A.1.2), B.1): the LEC ends below the unary root
    let mut tree = PhyloTree::new();
    let a11 = tree.add_leaf("A.1.1");
    let a12 = tree.add_leaf("A.1.2");
    let a = tree.add_internal(vec![a11, a12]);
    let b = tree.add_leaf("B.1");
    let x = tree.add_internal(vec![a, b]);
    tree.add_root(vec![x]);

    let result = assert_iff(&tree, "A.1.1");
    assert_eq!(result.least_encompassing_clade_size(), 2);
    assert_eq!(result.tree_size(), 2);
    assert!(result.has_warning(CladeWarning::LecIsEntireTree));
    assert!(result.has_warning(CladeWarning::NoCommonPrefix));
}

#[test]
fn test_internal_query() {
    // (((A.1, A.2)X, A.3), B.1)
    let mut tree = PhyloTree::new();
    let a1 = tree.add_leaf("A.1");
    let a2 = tree.add_leaf("A.2");
    let x = tree.add_internal(vec![a1, a2]);
    tree.set_name(x, "X");
    let a3 = tree.add_leaf("A.3");
    let xa3 = tree.add_internal(vec![x, a3]);
    let b = tree.add_leaf("B.1");
    tree.add_root(vec![xa3, b]);

    let result = analyze_single(&tree, "X").unwrap();
    assert_eq!(result.least_encompassing_clade_size(), 4);
    assert_eq!(result.tree_size(), 4);
    assert!(result.has_warning(CladeWarning::LecIsEntireTree));
    assert_eq!(result.greatest_common_prefix_down(), "A.3");
    assert_eq!(result.greatest_common_prefix_up(), "B.1");
}

#[test]
fn test_query_not_found() {
    let tree = reference_tree();
    assert!(matches!(
        analyze_single(&tree, "D.1.1"),
        Err(AnalysisError::QueryNotFound(name)) if name == "D.1.1"
    ));
}

#[test]
fn test_query_is_root() {
    let mut tree = PhyloTree::new();
    let a = tree.add_leaf("A.1");
    let root = tree.add_root(vec![a]);
    tree.set_name(root, "root");

    let err = analyze_single(&tree, "root").unwrap_err();
    assert!(matches!(err, AnalysisError::QueryIsRoot(_)));
    assert_eq!(err.category(), ErrorCategory::Structural);
}

#[test]
fn test_query_parent_is_root() {
    let mut tree = PhyloTree::new();
    let q = tree.add_leaf("Q");
    let a = tree.add_leaf("A.1");
    tree.add_root(vec![q, a]);

    assert!(matches!(
        analyze_single(&tree, "Q"),
        Err(AnalysisError::QueryParentIsRoot(_))
    ));
}

#[test]
fn test_empty_label_in_lec() {
    let mut tree = PhyloTree::new();
    let q = tree.add_leaf("Q");
    let a = tree.add_leaf("A.1");
    let blank = tree.add_leaf(" ");
    let qa = tree.add_internal(vec![q, a]);
    let inner = tree.add_internal(vec![qa, blank]);
    let b = tree.add_leaf("B.1");
    tree.add_root(vec![inner, b]);

    assert!(matches!(
        analyze_single(&tree, "Q"),
        Err(AnalysisError::EmptyLabel { vertex }) if vertex == blank
    ));
}

#[test]
fn test_empty_separator() {
    let tree = reference_tree();
    let analysis = SingleAnalysis::new().with_separator("");
    assert!(matches!(
        analysis.analyze(&tree, "A.1.1.1"),
        Err(AnalysisError::EmptySeparator)
    ));
}

#[test]
fn test_custom_separator() {
    let mut tree = PhyloTree::new();
    let q = tree.add_leaf("Q");
    let a = tree.add_leaf("Aves|Apterygidae|Apteryx");
    let qa = tree.add_internal(vec![q, a]);
    let b = tree.add_leaf("Aves|Apterygidae|Kiwi");
    let inner = tree.add_internal(vec![qa, b]);
    let c = tree.add_leaf("Aves|Strigopidae");
    tree.add_root(vec![inner, c]);

    let result = SingleAnalysis::new()
        .with_separator("|")
        .analyze(&tree, "Q")
        .unwrap();
    assert_eq!(result.greatest_common_prefix(), "Aves|Apterygidae");
    assert_eq!(result.greatest_common_prefix_down(), "Aves|Apterygidae|Apteryx");
    assert_eq!(result.greatest_common_prefix_up(), "Aves|Apterygidae|Kiwi");
}

#[test]
fn test_bracket_confidences() {
    // ((Q, A.1.1), A.1.2), B.1
    let mut tree = PhyloTree::new();
    let q = tree.add_leaf("Q");
    let a11 = tree.add_leaf("A.1.1");
    let qa = tree.add_internal(vec![q, a11]);
    let a12 = tree.add_leaf("A.1.2");
    let inner = tree.add_internal(vec![qa, a12]);
    let b = tree.add_leaf("B.1");
    tree.add_root(vec![inner, b]);

    tree.set_branch_confidences(a11, vec![BranchConfidence::new("bootstrap", 90.0)]);
    tree.set_branch_confidences(
        a12,
        vec![
            BranchConfidence::new("posterior", 0.95),
            BranchConfidence::new("bootstrap", 70.0),
        ],
    );
    tree.set_branch_confidences(inner, vec![BranchConfidence::new("", 0.8)]);

    let result = analyze_single(&tree, "Q").unwrap();
    assert_eq!(result.down_confidence(), Some("bootstrap: 90.0"));
    assert_eq!(result.up_confidence(), Some("bootstrap: 70.0 / posterior: 0.95"));
    assert_eq!(result.clade_confidence(), Some("confidence: 0.8"));
}

#[test]
fn test_only_unset_confidences_not_shown() {
    // ((Q, A.1.1), A.1.2), B.1
    let mut tree = PhyloTree::new();
    let q = tree.add_leaf("Q");
    let a11 = tree.add_leaf("A.1.1");
    let qa = tree.add_internal(vec![q, a11]);
    let a12 = tree.add_leaf("A.1.2");
    let inner = tree.add_internal(vec![qa, a12]);
    let b = tree.add_leaf("B.1");
    tree.add_root(vec![inner, b]);

    tree.set_branch_confidences(
        a11,
        vec![
            BranchConfidence::new("bootstrap", UNSET_CONFIDENCE),
            BranchConfidence::new("posterior", UNSET_CONFIDENCE),
        ],
    );

    let result = analyze_single(&tree, "Q").unwrap();
    assert_eq!(result.down_confidence(), None);
    let text = result.to_string();
    assert!(text.contains("Down-tree Bracketing Clade: A.1.1\n"), "{text}");
    assert!(!text.contains("()"), "{text}");
}

#[test]
fn test_no_bracket_confidence_for_multifurcation() {
    let tree = reference_tree();
    let result = analyze_single(&tree, "A.1.1.1").unwrap();
    // siblings of A.1.1.1 are three subtrees, so no single branch describes them
    assert_eq!(result.down_confidence(), None);
    assert_eq!(result.clade_confidence(), None);
}

#[test]
fn test_pattern_queries() {
    let tree = common::default_placement_tree();
    let pattern = QueryPattern::new(r"_#\d+_M=(.+)").unwrap();
    let results = SingleAnalysis::new().analyze_pattern(&tree, &pattern).unwrap();
    assert_eq!(results.len(), 3);

    let expected = [
        ("Q16611_#1_M=0.6", "A.1", "A.1.1", "A.1.2"),
        ("Q16611_#2_M=0.3", "A.1", "A.1.2", "A.1.1"),
        ("Q16611_#3_M=0.1", "B.1", "B.1.1", "B.1.2"),
    ];
    for (result, (query, prefix, down, up)) in results.iter().zip(expected) {
        let result = result.as_ref().unwrap();
        assert_eq!(result.query(), query);
        assert_eq!(result.greatest_common_prefix(), prefix);
        assert_eq!(result.greatest_common_prefix_down(), down);
        assert_eq!(result.greatest_common_prefix_up(), up);
        assert_eq!(result.least_encompassing_clade_size(), 2);
        assert_eq!(result.tree_size(), 6);
    }
}

#[test]
fn test_pattern_without_match() {
    let tree = reference_tree();
    let pattern = QueryPattern::default();
    assert!(matches!(
        SingleAnalysis::new().analyze_pattern(&tree, &pattern),
        Err(AnalysisError::NoQueryMatch(_))
    ));
}

#[test]
fn test_pattern_failure_keeps_other_results() {
    // first placement hangs directly below the root
    let mut tree = PhyloTree::new();
    let q1 = tree.add_leaf("Q_#1_M=0.5");
    let q2 = tree.add_leaf("Q_#2_M=0.5");
    let a1 = tree.add_leaf("A.1");
    let a2 = tree.add_leaf("A.2");
    let qa = tree.add_internal(vec![q2, a1]);
    let a = tree.add_internal(vec![qa, a2]);
    tree.add_root(vec![q1, a]);

    let results = SingleAnalysis::new()
        .analyze_pattern(&tree, &QueryPattern::default())
        .unwrap();
    assert!(matches!(results[0], Err(AnalysisError::QueryParentIsRoot(_))));
    assert_eq!(results[1].as_ref().unwrap().greatest_common_prefix(), "A");
}

#[test]
fn test_display() {
    let tree = reference_tree();
    let text = analyze_single(&tree, "C.3").unwrap().to_string();
    assert!(text.starts_with("Query: C.3\n"));
    assert!(text.contains("Up-tree Bracketing Clade: QE.1.1.1.2.1\n"));
    assert!(text.contains("Least Encompassing Clade Size: 5/25\n"));
    assert!(text.contains("Warning: No greatest common prefix\n"));
}
