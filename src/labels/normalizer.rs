use tracing::trace;

use crate::analysis::error::{AnalysisError, SeparatorViolation};
use crate::model::tree::PhyloTree;

/// Validates and cleans the labels of all external vertices of `tree`
/// in place.
///
/// Each label is trimmed and internal whitespace runs are collapsed to a
/// single space. Labels are rejected if they are blank or misuse
/// `separator` (see [check_separator_usage]).
///
/// # Arguments
/// * `tree` - Tree whose external vertices get renamed
/// * `separator` - Lineage separator; must be non-empty
///
/// # Errors
/// * [AnalysisError::EmptySeparator] if `separator` is empty
/// * [AnalysisError::EmptyLabel] for a blank label
/// * [AnalysisError::IllegalSeparatorUsage] for a misused separator
///
/// Vertices visited before the failing one stay renamed.
pub fn normalize_external_labels(
    tree: &mut PhyloTree,
    separator: &str,
) -> Result<(), AnalysisError> {
    if separator.is_empty() {
        return Err(AnalysisError::EmptySeparator);
    }

    let externals: Vec<_> = tree.external_vertices().collect();
    for index in externals {
        let raw = tree[index].name();
        let label = raw.trim();
        if label.is_empty() {
            return Err(AnalysisError::EmptyLabel { vertex: index });
        }
        check_separator_usage(label, separator)?;

        let cleaned = collapse_whitespace(label);
        if cleaned != raw {
            trace!(vertex = index, from = raw, to = %cleaned, "normalized label");
            tree.set_name(index, cleaned);
        }
    }

    Ok(())
}

/// Checks that `label` uses `separator` only between non-empty,
/// non-blank-padded segments.
///
/// # Errors
/// Returns [AnalysisError::IllegalSeparatorUsage] naming the first
/// violation found.
pub fn check_separator_usage(label: &str, separator: &str) -> Result<(), AnalysisError> {
    let violation = if label.ends_with(separator) {
        Some(SeparatorViolation::Trailing)
    } else if label.starts_with(separator) {
        Some(SeparatorViolation::Leading)
    } else if label
        .match_indices(separator)
        .any(|(i, _)| next_is_whitespace(&label[i + separator.len()..]))
    {
        Some(SeparatorViolation::FollowedByWhitespace)
    } else if label
        .match_indices(separator)
        .any(|(i, _)| previous_is_whitespace(&label[..i]))
    {
        Some(SeparatorViolation::PrecededByWhitespace)
    } else if label.contains(&separator.repeat(2)) {
        Some(SeparatorViolation::EmptyLevel)
    } else {
        None
    };

    match violation {
        Some(violation) => Err(AnalysisError::illegal_separator(label, violation)),
        None => Ok(()),
    }
}

fn next_is_whitespace(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_whitespace)
}

fn previous_is_whitespace(s: &str) -> bool {
    s.chars().next_back().is_some_and(char::is_whitespace)
}

fn collapse_whitespace(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ")
}
