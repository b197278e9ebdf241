//! Label processing run before an analysis when reference tips are named by
//! identifiers rather than by their lineage.
//!
//! * [parse_mapping_table] + [apply_mapping]: replace identifiers through a
//!   two-column table (`Q16611<TAB>A.1.1`)
//! * [extract_annotations]: pull the lineage out of composite names
//!   (`Q16611|A.1.1` becomes `A.1.1`)
//!
//! Query vertices are recognised through a [QueryMatcher] and left untouched.

use std::collections::BTreeMap;

use tracing::trace;

use crate::analysis::error::AnalysisError;
use crate::analysis::matcher::QueryMatcher;
use crate::model::tree::PhyloTree;

/// Identifier to lineage annotation.
pub type MappingTable = BTreeMap<String, String>;

/// Parses a tab-separated, two-column mapping table.
///
/// Blank lines and lines starting with `#` are skipped; both columns are
/// trimmed.
///
/// # Errors
/// Returns [AnalysisError::MalformedMappingTable] (with 1-based line number)
/// for a row without exactly two columns, with an empty column, or with a
/// key already seen.
///
/// # Example
/// ```
/// use cladewise::labels::parse_mapping_table;
///
/// let map = parse_mapping_table("# id\tannotation\nQ16611\tA.1.1\n").unwrap();
/// assert_eq!(map["Q16611"], "A.1.1");
/// ```
pub fn parse_mapping_table(text: &str) -> Result<MappingTable, AnalysisError> {
    let mut map = MappingTable::new();
    for (i, line) in text.lines().enumerate() {
        let line_number = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let malformed = |reason: &str| AnalysisError::MalformedMappingTable {
            line: line_number,
            reason: reason.to_string(),
        };

        let columns: Vec<&str> = trimmed.split('\t').map(str::trim).collect();
        let [key, value] = columns[..] else {
            return Err(malformed("expected exactly two tab-separated columns"));
        };
        if key.is_empty() || value.is_empty() {
            return Err(malformed("empty column"));
        }
        if map.insert(key.to_string(), value.to_string()).is_some() {
            return Err(malformed("duplicate key"));
        }
    }
    Ok(map)
}

/// Renames every external vertex not matched by `query` through `map`.
///
/// # Errors
/// * [AnalysisError::EmptyLabel] if an external vertex (query or not) has a
///   blank name, or would be mapped to a blank name
/// * [AnalysisError::MissingMapping] if a reference name has no entry
pub fn apply_mapping<M: QueryMatcher>(
    tree: &mut PhyloTree,
    query: &M,
    map: &MappingTable,
) -> Result<(), AnalysisError> {
    let externals: Vec<_> = tree.external_vertices().collect();
    for index in externals {
        let name = tree[index].name().trim();
        if name.is_empty() {
            return Err(AnalysisError::EmptyLabel { vertex: index });
        }
        if query.is_match(name) {
            continue;
        }

        let mapped = map
            .get(name)
            .ok_or_else(|| AnalysisError::MissingMapping(name.to_string()))?
            .trim();
        if mapped.is_empty() {
            return Err(AnalysisError::EmptyLabel { vertex: index });
        }
        trace!(vertex = index, from = name, to = mapped, "mapped label");
        tree.set_name(index, mapped);
    }
    Ok(())
}

/// Replaces each reference name containing `extra_sep` by the annotation
/// following its last occurrence.
///
/// With `keep_extra`, the text before that occurrence is appended to the
/// annotation after `annotation_sep`, e.g. `Q16611|A.1.1` becomes
/// `A.1.1.Q16611` for `extra_sep = "|"` and `annotation_sep = "."`.
/// Names without `extra_sep` stay as they are.
///
/// # Errors
/// * [AnalysisError::EmptyLabel] if an external vertex has a blank name
/// * [AnalysisError::IllegalAnnotation] if the annotation part is blank
pub fn extract_annotations<M: QueryMatcher>(
    tree: &mut PhyloTree,
    query: &M,
    extra_sep: &str,
    keep_extra: bool,
    annotation_sep: &str,
) -> Result<(), AnalysisError> {
    let externals: Vec<_> = tree.external_vertices().collect();
    for index in externals {
        let name = tree[index].name().trim();
        if name.is_empty() {
            return Err(AnalysisError::EmptyLabel { vertex: index });
        }
        if query.is_match(name) {
            continue;
        }
        let Some(last) = name.rfind(extra_sep) else {
            continue;
        };

        let annotation = name[last + extra_sep.len()..].trim();
        if annotation.is_empty() {
            return Err(AnalysisError::IllegalAnnotation(name.to_string()));
        }
        let mut new_name = annotation.to_string();
        let extra = name[..last].trim();
        if keep_extra && !extra.is_empty() {
            new_name.push_str(annotation_sep);
            new_name.push_str(extra);
        }

        trace!(vertex = index, from = name, to = %new_name, "extracted annotation");
        tree.set_name(index, new_name);
    }
    Ok(())
}
