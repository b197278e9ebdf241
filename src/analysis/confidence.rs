use crate::model::vertex::BranchConfidence;

/// Type shown for confidences without a type.
const UNTYPED_CONFIDENCE: &str = "confidence";

/// Renders the confidences of a branch as display text,
/// e.g. `bootstrap: 95.0 / posterior: 0.99`.
///
/// Confidences are ordered by type (case-insensitive); unset values are
/// skipped. Returns `None` if the branch has no set confidence.
pub fn confidence_display(confidences: &[BranchConfidence]) -> Option<String> {
    let mut sorted: Vec<&BranchConfidence> = confidences.iter().collect();
    sorted.sort_by_key(|c| c.kind.to_lowercase());

    let parts: Vec<String> = sorted
        .into_iter()
        .filter_map(|c| {
            let value = c.value?;
            let kind = if c.kind.is_empty() {
                UNTYPED_CONFIDENCE
            } else {
                c.kind.as_str()
            };
            Some(format!("{kind}: {}", format_value(value)))
        })
        .collect();

    if parts.is_empty() {
        return None;
    }
    Some(parts.join(" / "))
}

/// Formats integral values with a trailing `.0`, e.g. `95.0`.
fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
