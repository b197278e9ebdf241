//! Tabular classification report derived from a [MultiResult].
//!
//! One row per query (or per `_`-separated part of the query name), e.g.
//! ```text
//! #Tree #  Query   Assignment  Confidence  Brackets        Conclusion              Placement count
//! 1        Q16611  A.1         0.9         n/a             member of clade A.1     4
//! ```

use crate::analysis::result_multi::{Category, MultiResult};
use crate::prefix::{Prefix, UNKNOWN, format_confidence};

/// Header line of the report table.
pub const TSV_HEADER: &str =
    "#Tree #\tQuery\tAssignment\tConfidence\tBrackets\tConclusion\tPlacement count";

/// Default minimal confidence for a clade to be reported as assignment.
pub const DEFAULT_ASSIGNMENT_CUTOFF: f64 = 0.7;

/// Settings of the classification report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    assignment_cutoff: f64,
    split_query: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            assignment_cutoff: DEFAULT_ASSIGNMENT_CUTOFF,
            split_query: true,
        }
    }
}

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimal confidence for a clade to be reported as assignment.
    pub fn with_assignment_cutoff(mut self, cutoff: f64) -> Self {
        self.assignment_cutoff = cutoff;
        self
    }

    /// Sets whether query names joining several identifiers with `_` are
    /// reported as one row per identifier.
    pub fn with_split_query(mut self, split_query: bool) -> Self {
        self.split_query = split_query;
        self
    }
}

/// Classification of one query, ready to be written as report rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    queries: Vec<String>,
    matched: String,
    confidence: f64,
    down: String,
    up: String,
    placements: usize,
}

impl Assignment {
    /// Derives the assignment of `result`.
    ///
    /// The assigned clade is the first collapsed clade prefix reaching the
    /// cutoff, falling back to the down-tree and then the up-tree brackets;
    /// the brackets reported alongside are the top ranked ones. If no
    /// prefix reaches the cutoff, the top ranked clade prefix is reported
    /// with unknown brackets.
    pub fn from_result(result: &MultiResult, config: &ReportConfig) -> Self {
        let queries = if config.split_query {
            result
                .query_name_prefix()
                .split('_')
                .map(str::to_string)
                .collect()
        } else {
            vec![result.query_name_prefix().to_string()]
        };

        let confident = [Category::Clade, Category::Down, Category::Up]
            .into_iter()
            .find_map(|category| {
                result
                    .collapsed(category)
                    .iter()
                    .find(|p| p.confidence() >= config.assignment_cutoff && !p.is_unknown())
            });

        let (matched, down, up) = match confident {
            Some(prefix) => (
                Some(prefix),
                top_label(result.all(Category::Down)),
                top_label(result.all(Category::Up)),
            ),
            None => (
                result.all(Category::Clade).first(),
                UNKNOWN.to_string(),
                UNKNOWN.to_string(),
            ),
        };

        Assignment {
            queries,
            matched: matched.map_or_else(|| UNKNOWN.to_string(), |p| p.label().to_string()),
            confidence: matched.map_or(0.0, Prefix::confidence),
            down,
            up,
            placements: result.total_matches(),
        }
    }

    /// Returns the reported query names.
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    /// Returns the assigned clade, or "potentially novel" if a bracket is unknown.
    pub fn assignment(&self) -> &str {
        if self.brackets_known() {
            &self.matched
        } else {
            "potentially novel"
        }
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Returns `[down, up]` for a single placement with known brackets, else `n/a`.
    pub fn brackets(&self) -> String {
        if self.placements == 1 && self.brackets_known() {
            format!("[{}, {}]", self.down, self.up)
        } else {
            "n/a".to_string()
        }
    }

    /// Returns a short interpretation of the assignment.
    ///
    /// If both brackets are unknown but a clade was assigned, the query is
    /// reported as different from all current sub-species rather than as a
    /// member of that clade.
    pub fn conclusion(&self) -> String {
        let down_known = self.down != UNKNOWN;
        let up_known = self.up != UNKNOWN;
        if self.down != self.up {
            match (down_known, up_known) {
                (false, true) => {
                    format!("potential for novel sub-species similar to clade {}", self.up)
                }
                (true, false) => {
                    format!("potential for novel sub-species similar to clade {}", self.down)
                }
                _ => format!("potential for novel sub-species within clade {}", self.matched),
            }
        } else if !down_known {
            if self.matched == UNKNOWN {
                "potential for novel sub-species".to_string()
            } else {
                "potential for novel sub-species different from all current sub-species"
                    .to_string()
            }
        } else if self.matched == UNKNOWN {
            "potential for novel sub-species".to_string()
        } else {
            format!("member of clade {}", self.matched)
        }
    }

    pub fn placements(&self) -> usize {
        self.placements
    }

    /// Renders one tab-separated row per query name, each ending in a newline.
    pub fn to_tsv_rows(&self, tree_number: usize) -> String {
        let assignment = self.assignment();
        let confidence = format_confidence(self.confidence);
        let brackets = self.brackets();
        let conclusion = self.conclusion();

        self.queries
            .iter()
            .map(|query| {
                format!(
                    "{tree_number}\t{query}\t{assignment}\t{confidence}\t{brackets}\t{conclusion}\t{}\n",
                    self.placements
                )
            })
            .collect()
    }

    fn brackets_known(&self) -> bool {
        self.down != UNKNOWN && self.up != UNKNOWN
    }
}

fn top_label(prefixes: &[Prefix]) -> String {
    prefixes
        .first()
        .map_or_else(|| UNKNOWN.to_string(), |p| p.label().to_string())
}
