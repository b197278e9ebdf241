//! Prefix algebra over separator-delimited hierarchical labels.
//!
//! A label such as `A.1.2` (separator `.`) is read as a lineage of segments
//! `A`, `1`, `2`. All comparisons here respect segment boundaries: `A.1`
//! is a prefix of `A.1.2` but not of `A.12`.

/// Returns the greatest common prefix of `labels`, i.e. the longest leading
/// sequence of segments all labels agree on, joined with `separator`.
///
/// Returns the empty string for an empty slice or if the labels already
/// disagree on their first segment. The result does not depend on the order
/// of `labels`.
///
/// # Arguments
/// * `labels` - Labels to compare
/// * `separator` - Separator between segments; must be non-empty
///
/// # Example
/// ```
/// use cladewise::prefix::greatest_common_prefix;
///
/// assert_eq!(greatest_common_prefix(&["A.1.1", "A.1.2", "A.1"], "."), "A.1");
/// assert_eq!(greatest_common_prefix(&["A.1", "B.1"], "."), "");
/// ```
pub fn greatest_common_prefix<S: AsRef<str>>(labels: &[S], separator: &str) -> String {
    let Some((first, rest)) = labels.split_first() else {
        return String::new();
    };

    let mut common: Vec<&str> = first.as_ref().split(separator).collect();
    for label in rest {
        let agreed = common
            .iter()
            .zip(label.as_ref().split(separator))
            .take_while(|(a, b)| *a == b)
            .count();
        common.truncate(agreed);
        if common.is_empty() {
            break;
        }
    }

    common.join(separator)
}

/// Decomposes `label` into its chain of ancestor prefixes, from the least
/// to the most specific, ending with `label` itself.
///
/// # Example
/// ```
/// use cladewise::prefix::split_into_prefixes;
///
/// assert_eq!(split_into_prefixes("A.1.2", "."), vec!["A", "A.1", "A.1.2"]);
/// ```
pub fn split_into_prefixes(label: &str, separator: &str) -> Vec<String> {
    let mut prefixes = Vec::new();
    let mut current = String::with_capacity(label.len());
    for (i, segment) in label.split(separator).enumerate() {
        if i > 0 {
            current.push_str(separator);
        }
        current.push_str(segment);
        prefixes.push(current.clone());
    }
    prefixes
}

/// Returns whether `prefix` is a prefix of `label` at a segment boundary,
/// i.e. whether `label` equals `prefix` or starts with `prefix` followed by
/// `separator`.
pub fn contains_prefix(label: &str, prefix: &str, separator: &str) -> bool {
    match label.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with(separator),
        None => false,
    }
}

/// Returns the top-level segment of `label` (the text before the first
/// separator), which identifies its family.
pub fn first_element<'a>(label: &'a str, separator: &str) -> &'a str {
    label.split(separator).next().unwrap_or(label)
}
