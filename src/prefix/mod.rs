//! Greatest common prefix engine and the [Prefix] value type.
//!
//! Hierarchical labels are strings of segments joined by a separator,
//! e.g. `A.1.2`; prefixes here are always taken at segment boundaries.

pub mod gcp;
pub mod prefix;

pub use gcp::{contains_prefix, first_element, greatest_common_prefix, split_into_prefixes};
pub use prefix::{Prefix, UNKNOWN, format_confidence};
