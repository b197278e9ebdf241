//! Clade analyses of query vertices.
//!
//! * [SingleAnalysis]: classifies query vertices one by one into a [CladeResult]
//! * [MultiAnalysis]: aggregates all placements of a query into a [MultiResult]
//! * [Assignment]: derives a report row from a [MultiResult]

pub mod aggregate;
pub mod confidence;
pub mod error;
pub(crate) mod lineage;
pub mod matcher;
pub mod multi;
pub mod report;
pub mod result;
pub mod result_multi;
pub mod single;

pub use error::{AnalysisError, ErrorCategory, SeparatorViolation};
pub use matcher::{DEFAULT_QUERY_PATTERN, ExactName, QueryHit, QueryMatcher, QueryPattern};
pub use multi::{DEFAULT_CUTOFF_FOR_SPECIFICS, MultiAnalysis};
pub use report::{Assignment, ReportConfig, TSV_HEADER};
pub use result::{CladeResult, CladeResultBuilder, CladeWarning};
pub use result_multi::{Category, CategoryResult, MultiResult, MultiResultBuilder};
pub use single::{DEFAULT_SEPARATOR, SingleAnalysis};
