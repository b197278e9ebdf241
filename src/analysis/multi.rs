//! Consensus analysis over all placements of one query.
//!
//! Placement tools graft a query onto every candidate branch of the
//! reference tree, naming each copy `<query><suffix>` where the suffix
//! carries the placement confidence (`Q16611_#1_M=0.25`). The greatest
//! common prefixes around all copies are aggregated, weighted by
//! confidence, into a [MultiResult].

use tracing::{debug, info, warn};

use crate::analysis::error::AnalysisError;
use crate::analysis::lineage::{Placement, analyze_placement};
use crate::analysis::matcher::{QueryHit, QueryMatcher, QueryPattern};
use crate::analysis::result_multi::{Category, MultiResult, MultiResultBuilder};
use crate::analysis::single::DEFAULT_SEPARATOR;
use crate::labels::normalize_external_labels;
use crate::model::tree::{PhyloTree, VertexIndex};
use crate::prefix::UNKNOWN;

/// Default minimal confidence for secondary candidates.
pub const DEFAULT_CUTOFF_FOR_SPECIFICS: f64 = 0.5;

/// Classifies a query from all its placements in a tree.
///
/// # Example
/// ```
/// use cladewise::analysis::{Category, MultiAnalysis};
/// use cladewise::model::tree::PhyloTree;
///
/// let mut tree = PhyloTree::new();
/// let q1 = tree.add_leaf("Q_#1_M=0.75");
/// let a1 = tree.add_leaf("A.1");
/// let a2 = tree.add_leaf("A.2");
/// let q2 = tree.add_leaf("Q_#2_M=0.25");
/// let b1 = tree.add_leaf("B.1");
/// let b2 = tree.add_leaf("B.2");
/// let qa = tree.add_internal(vec![q1, a1]);
/// let a = tree.add_internal(vec![qa, a2]);
/// let qb = tree.add_internal(vec![q2, b1]);
/// let b = tree.add_internal(vec![qb, b2]);
/// tree.add_root(vec![a, b]);
///
/// let result = MultiAnalysis::new().analyze(&mut tree).unwrap();
/// assert_eq!(result.query_name_prefix(), "Q");
/// let collapsed = result.collapsed(Category::Clade);
/// assert_eq!(collapsed[0].label(), "A");
/// assert_eq!(collapsed[1].label(), "B");
/// ```
#[derive(Debug, Clone)]
pub struct MultiAnalysis {
    separator: String,
    query: QueryPattern,
    cutoff_for_specifics: f64,
}

impl Default for MultiAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiAnalysis {
    /// Creates an analysis with [DEFAULT_SEPARATOR], the default query
    /// pattern and [DEFAULT_CUTOFF_FOR_SPECIFICS].
    pub fn new() -> Self {
        MultiAnalysis {
            separator: DEFAULT_SEPARATOR.to_string(),
            query: QueryPattern::default(),
            cutoff_for_specifics: DEFAULT_CUTOFF_FOR_SPECIFICS,
        }
    }

    /// Sets the separator between label levels.
    pub fn with_separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_string();
        self
    }

    /// Sets the pattern identifying placements. Its first capture group
    /// must capture the placement confidence.
    ///
    /// # Errors
    /// * [AnalysisError::InvalidPattern] if `pattern` does not compile
    /// * [AnalysisError::MissingConfidenceGroup] if it has no capture group
    pub fn with_query_pattern(mut self, pattern: &str) -> Result<Self, AnalysisError> {
        let query = QueryPattern::new(pattern)?;
        if !query.captures_confidence() {
            return Err(AnalysisError::MissingConfidenceGroup(pattern.to_string()));
        }
        self.query = query;
        Ok(self)
    }

    /// Sets the minimal confidence for secondary candidates.
    pub fn with_cutoff_for_specifics(mut self, cutoff: f64) -> Self {
        self.cutoff_for_specifics = cutoff;
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn query_pattern(&self) -> &QueryPattern {
        &self.query
    }

    pub fn cutoff_for_specifics(&self) -> f64 {
        self.cutoff_for_specifics
    }

    /// Normalizes the external labels of `tree` and aggregates all
    /// placements of the query.
    ///
    /// # Errors
    /// * [AnalysisError::EmptySeparator] if no separator is configured
    /// * label errors of [normalize_external_labels]
    /// * [AnalysisError::NoQueryMatch] if no external vertex is a placement
    /// * [AnalysisError::EmptyQueryPrefix] / [AnalysisError::InconsistentQueryPrefix]
    ///   if the placements do not share a non-empty name
    /// * structural errors of the placements, see [crate::analysis::SingleAnalysis::analyze]
    /// * [AnalysisError::UnparsableConfidence] for a malformed or non-finite confidence
    /// * [AnalysisError::AggregationInvariantViolation] if the placement
    ///   confidences do not sum to 1
    ///
    /// No result is produced if any placement fails.
    pub fn analyze(&self, tree: &mut PhyloTree) -> Result<MultiResult, AnalysisError> {
        if self.separator.is_empty() {
            return Err(AnalysisError::EmptySeparator);
        }
        normalize_external_labels(tree, &self.separator)?;
        let tree: &PhyloTree = tree;

        let placements = tree.find_by(|v| self.query.is_match(v.name()));
        if placements.is_empty() {
            return Err(AnalysisError::NoQueryMatch(self.query.as_str().to_string()));
        }
        let query_name_prefix = self.common_query_name(tree, &placements)?;

        let mut builder = MultiResultBuilder::new(&self.separator)?;
        builder.set_query_name_prefix(query_name_prefix);
        builder.set_total_matches(placements.len());
        builder.set_reference_tree_external_nodes(tree.num_external() - placements.len());

        for &index in &placements {
            let Placement {
                prefix, down, up, ..
            } = analyze_placement(tree, index, &self.query, &self.separator)?;
            let confidence = self.placement_confidence(tree, index)?;

            debug!(
                placement = tree[index].name(),
                confidence,
                prefix = %prefix,
                down = %down.prefix,
                up = %up.prefix,
                "analyzed placement"
            );
            if prefix.is_empty() {
                warn!(placement = tree[index].name(), "no greatest common prefix");
            }

            builder.add(Category::Clade, or_unknown(prefix), confidence);
            builder.add(Category::Down, or_unknown(down.prefix), confidence);
            builder.add(Category::Up, or_unknown(up.prefix), confidence);
        }

        let result = builder.analyze(self.cutoff_for_specifics)?;
        info!(
            query = result.query_name_prefix(),
            matches = result.total_matches(),
            reference_tips = result.reference_tree_external_nodes(),
            clades = result.collapsed(Category::Clade).len(),
            "aggregated placements"
        );
        Ok(result)
    }

    /// Returns the name all placements share in front of the matched suffix.
    fn common_query_name(
        &self,
        tree: &PhyloTree,
        placements: &[VertexIndex],
    ) -> Result<String, AnalysisError> {
        let mut common: Option<&str> = None;
        for &index in placements {
            let name = tree[index].name();
            let Some(QueryHit { prefix, .. }) = self.query.match_name(name) else {
                continue;
            };
            if prefix.is_empty() {
                return Err(AnalysisError::EmptyQueryPrefix(name.to_string()));
            }
            match common {
                None => common = Some(prefix),
                Some(first) if first != prefix => {
                    return Err(AnalysisError::InconsistentQueryPrefix {
                        first: first.to_string(),
                        other: prefix.to_string(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(common.unwrap_or_default().to_string())
    }

    fn placement_confidence(&self, tree: &PhyloTree, index: VertexIndex) -> Result<f64, AnalysisError> {
        let name = tree[index].name();
        let text = self
            .query
            .match_name(name)
            .and_then(|hit| hit.confidence)
            .ok_or_else(|| AnalysisError::MissingConfidenceGroup(self.query.as_str().to_string()))?;
        let unparsable = || AnalysisError::UnparsableConfidence {
            name: name.to_string(),
            value: text.to_string(),
        };
        match text.trim().parse::<f64>() {
            Ok(confidence) if confidence.is_finite() => Ok(confidence),
            _ => Err(unparsable()),
        }
    }
}

fn or_unknown(prefix: String) -> String {
    if prefix.is_empty() {
        UNKNOWN.to_string()
    } else {
        prefix
    }
}
