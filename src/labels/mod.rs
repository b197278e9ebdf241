//! Preparation of leaf labels: normalization and identifier mapping.

pub mod mapping;
pub mod normalizer;

pub use mapping::{MappingTable, apply_mapping, extract_annotations, parse_mapping_table};
pub use normalizer::{check_separator_usage, normalize_external_labels};
