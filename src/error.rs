//! Error types.

use thiserror::Error;

use crate::selectors::SelectorMapping;
use crate::table::Solution;

/// Inputs that cannot produce a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TableError {
    /// No selector ranges were supplied.
    #[error("at least one selector range is required")]
    NoRanges,

    /// No selector mappings were supplied.
    #[error("at least one selector mapping is required")]
    NoMappings,

    /// A range is reversed or reaches past selector slot 3.
    #[error("selector range {index} is invalid: [{low}, {high}] (need low <= high <= 3)")]
    InvalidRange { index: usize, low: u8, high: u8 },

    /// A mapping points a slot at a palette lane other than 0..=3.
    #[error("selector mapping {index} references a lane outside 0..=3: {mapping:?}")]
    InvalidMapping {
        index: usize,
        mapping: SelectorMapping,
    },

    /// A serialized table is not a whole number of 4-byte records.
    #[error("table data is {0} bytes, not a multiple of the 4-byte record size")]
    TruncatedRecord(usize),

    /// A buffer or serialized table does not match the table layout.
    #[error("buffer holds {actual} entries, layout needs {needed}")]
    OutputSizeMismatch { needed: usize, actual: usize },
}

/// A generated table differs from the reference one.
///
/// Generation has already finished when this is reported; the caller decides
/// whether it matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("table has {actual} entries, reference has {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error(
        "{mismatches} entries differ; first at index {index}: expected {expected:?}, got {actual:?}"
    )]
    EntryMismatch {
        index: usize,
        expected: Solution,
        actual: Solution,
        mismatches: usize,
    },
}
