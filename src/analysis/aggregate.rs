//! Aggregation of the prefixes recorded for many placements of one query
//! into a consensus.
//!
//! Each placement contributes its prefix with its confidence. The
//! confidence of a prefix is pushed to all its ancestors (`A.1.2` also
//! counts for `A.1` and `A`), the resulting list is ranked and pruned, and
//! finally collapsed to the best entry of each top-level family. Since each
//! placement lands in exactly one family, the collapsed confidences sum to
//! the total confidence of all placements, which must be 1.

use std::collections::{BTreeMap, HashSet};

use crate::analysis::error::AnalysisError;
use crate::analysis::result_multi::Category;
use crate::prefix::{Prefix, contains_prefix, split_into_prefixes};

/// Tolerance for the collapsed confidences summing up to 1.
pub const SUM_TOLERANCE: f64 = 1e-5;

/// Tolerance for two confidences being considered equal.
pub const EQUALITY_TOLERANCE: f64 = 1e-9;

/// Ranked prefixes of one category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// All prefixes by descending confidence, without less specific
    /// prefixes of equal confidence.
    pub all: Vec<Prefix>,
    /// Best prefix per top-level family, by descending confidence.
    pub collapsed: Vec<Prefix>,
}

/// Aggregates the recorded `records` of one category.
///
/// An empty input yields empty lists.
///
/// # Errors
/// Returns [AnalysisError::AggregationInvariantViolation] if the collapsed
/// confidences do not sum to 1 within [SUM_TOLERANCE], including a NaN sum.
///
/// # Example
/// ```
/// use cladewise::analysis::aggregate::aggregate;
/// use cladewise::analysis::Category;
/// use cladewise::prefix::Prefix;
///
/// let records = vec![
///     Prefix::new("A.1.1", 0.3),
///     Prefix::new("A.1.2", 0.3),
///     Prefix::new("A.1.3", 0.3),
///     Prefix::new("B.1", 0.1),
/// ];
/// let aggregation = aggregate(&records, ".", Category::Clade).unwrap();
/// assert_eq!(aggregation.collapsed[0].label(), "A.1");
/// assert_eq!(aggregation.collapsed[1].label(), "B.1");
/// ```
pub fn aggregate(
    records: &[Prefix],
    separator: &str,
    category: Category,
) -> Result<Aggregation, AnalysisError> {
    if records.is_empty() {
        return Ok(Aggregation::default());
    }

    let mut inflated = inflate(records, separator);
    sort_by_confidence(&mut inflated);
    let all = remove_less_specific(inflated, separator);
    let collapsed = collapse(&all, separator, category)?;

    Ok(Aggregation { all, collapsed })
}

/// Returns the entries of `all` with at least `cutoff` confidence that did
/// not make it into `collapsed`, leaving out those that are a less specific
/// prefix of another such entry.
///
/// These are secondary candidates worth a manual look.
pub fn obtain_specifics(
    cutoff: f64,
    all: &[Prefix],
    collapsed: &[Prefix],
    separator: &str,
) -> Vec<Prefix> {
    let collapsed_labels: HashSet<&str> = collapsed.iter().map(Prefix::label).collect();
    let candidates: Vec<&Prefix> = all
        .iter()
        .filter(|p| p.confidence() >= cutoff && !collapsed_labels.contains(p.label()))
        .collect();

    candidates
        .iter()
        .filter(|o| {
            !candidates.iter().any(|i| {
                i.label() != o.label() && contains_prefix(i.label(), o.label(), separator)
            })
        })
        .map(|p| (*p).clone())
        .collect()
}

/// Assigns to each ancestor prefix of any record the summed confidence of
/// all records below it. Ordered by label.
fn inflate(records: &[Prefix], separator: &str) -> Vec<Prefix> {
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for record in records {
        for prefix in split_into_prefixes(record.label(), separator) {
            sums.entry(prefix).or_insert(0.0);
        }
    }

    for (key, sum) in sums.iter_mut() {
        for record in records {
            if contains_prefix(record.label(), key, separator) {
                *sum += record.confidence();
            }
        }
    }

    sums.into_iter()
        .map(|(label, confidence)| Prefix::new(label, confidence))
        .collect()
}

/// Stable sort, descending by confidence; ties keep their order.
fn sort_by_confidence(prefixes: &mut [Prefix]) {
    prefixes.sort_by(|a, b| b.confidence().total_cmp(&a.confidence()));
}

/// Drops every prefix for which a more specific prefix with equal
/// confidence exists, e.g. `A.1 0.9` in presence of `A.1.1 0.9`.
fn remove_less_specific(prefixes: Vec<Prefix>, separator: &str) -> Vec<Prefix> {
    let keep: Vec<bool> = prefixes
        .iter()
        .map(|o| {
            !prefixes.iter().any(|i| {
                i.label() != o.label()
                    && contains_prefix(i.label(), o.label(), separator)
                    && (i.confidence() - o.confidence()).abs() < EQUALITY_TOLERANCE
            })
        })
        .collect();

    prefixes
        .into_iter()
        .zip(keep)
        .filter_map(|(p, keep)| keep.then_some(p))
        .collect()
}

/// Keeps the first prefix of each top-level family and checks the
/// confidence sum.
fn collapse(
    all: &[Prefix],
    separator: &str,
    category: Category,
) -> Result<Vec<Prefix>, AnalysisError> {
    let mut families = HashSet::new();
    let mut collapsed = Vec::new();
    let mut sum = 0.0;
    for prefix in all {
        if families.insert(prefix.first_element(separator)) {
            sum += prefix.confidence();
            collapsed.push(prefix.clone());
        }
    }

    if sum.is_nan() || (sum - 1.0).abs() > SUM_TOLERANCE {
        return Err(AnalysisError::AggregationInvariantViolation { category, sum });
    }
    Ok(collapsed)
}
