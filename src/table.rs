//! The generated table: record format, tuple indexing and golden comparison.

use alloc::vec::Vec;

use bytemuck::{Pod, Zeroable};

use crate::error::{TableError, VerifyError};
use crate::etc1::{BASE_LEVELS, INTENSITY_LEVELS};

/// Best endpoint pair for one tuple.
///
/// Laid out exactly as the transcoder reads it: low, high, then the squared
/// error as a `u16`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Solution {
    pub low: u8,
    pub high: u8,
    pub error: u16,
}

impl Solution {
    pub const SIZE: usize = 4;

    #[inline]
    pub const fn new(low: u8, high: u8, error: u16) -> Self {
        Self { low, high, error }
    }

    #[inline]
    pub fn to_le_bytes(self) -> [u8; 4] {
        let e = self.error.to_le_bytes();
        [self.low, self.high, e[0], e[1]]
    }

    #[inline]
    pub fn from_le_bytes(b: [u8; 4]) -> Self {
        Self::new(b[0], b[1], u16::from_le_bytes([b[2], b[3]]))
    }
}

/// One point of the search space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tuple {
    pub intensity: usize,
    pub green: usize,
    pub range: usize,
    pub mapping: usize,
}

/// Shape of a table: how many ranges and mappings each (intensity, green)
/// pair fans out into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TableLayout {
    pub ranges: usize,
    pub mappings: usize,
}

impl TableLayout {
    #[inline]
    pub const fn new(ranges: usize, mappings: usize) -> Self {
        Self { ranges, mappings }
    }

    /// Entries per intensity level.
    #[inline]
    pub const fn intensity_len(&self) -> usize {
        BASE_LEVELS * self.ranges * self.mappings
    }

    #[inline]
    pub const fn len(&self) -> usize {
        INTENSITY_LEVELS * self.intensity_len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear position of `t`, lexicographic in (intensity, green, range, mapping).
    #[inline]
    pub const fn index(&self, t: Tuple) -> usize {
        ((t.intensity * BASE_LEVELS + t.green) * self.ranges + t.range) * self.mappings + t.mapping
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub const fn tuple(&self, index: usize) -> Tuple {
        let mapping = index % self.mappings;
        let rest = index / self.mappings;
        let range = rest % self.ranges;
        let rest = rest / self.ranges;
        Tuple {
            intensity: rest / BASE_LEVELS,
            green: rest % BASE_LEVELS,
            range,
            mapping,
        }
    }
}

/// A finished table. Read-only once generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultTable {
    layout: TableLayout,
    entries: Vec<Solution>,
}

impl ResultTable {
    pub(crate) fn from_parts(layout: TableLayout, entries: Vec<Solution>) -> Self {
        debug_assert_eq!(layout.len(), entries.len());
        Self { layout, entries }
    }

    #[inline]
    pub fn layout(&self) -> TableLayout {
        self.layout
    }

    #[inline]
    pub fn entries(&self) -> &[Solution] {
        &self.entries
    }

    #[inline]
    pub fn into_entries(self) -> Vec<Solution> {
        self.entries
    }

    #[inline]
    pub fn get(&self, t: Tuple) -> Solution {
        self.entries[self.layout.index(t)]
    }

    /// In-memory records, native byte order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.entries)
    }

    /// Portable serialization: 4 bytes per record, error little-endian.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.entries.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    /// Reads a table written by [`to_le_bytes`](Self::to_le_bytes).
    pub fn from_le_bytes(layout: TableLayout, bytes: &[u8]) -> Result<Self, TableError> {
        let entries = solutions_from_le_bytes(bytes)?;
        if entries.len() != layout.len() {
            return Err(TableError::OutputSizeMismatch {
                needed: layout.len(),
                actual: entries.len(),
            });
        }
        Ok(Self { layout, entries })
    }

    /// Compares against a reference table entry by entry.
    ///
    /// Every field must match. On mismatch the first differing index and the
    /// total count are returned and logged; nothing else happens.
    pub fn verify(&self, golden: &[Solution]) -> Result<(), VerifyError> {
        verify(&self.entries, golden)
    }
}

/// Parses records written by [`ResultTable::to_le_bytes`].
pub fn solutions_from_le_bytes(bytes: &[u8]) -> Result<Vec<Solution>, TableError> {
    if bytes.len() % Solution::SIZE != 0 {
        return Err(TableError::TruncatedRecord(bytes.len()));
    }
    Ok(bytes
        .chunks_exact(Solution::SIZE)
        .map(|c| Solution::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Entry-by-entry comparison of two solution sequences.
pub fn verify(actual: &[Solution], golden: &[Solution]) -> Result<(), VerifyError> {
    if actual.len() != golden.len() {
        log::warn!(
            "table length mismatch: generated {}, reference {}",
            actual.len(),
            golden.len()
        );
        return Err(VerifyError::LengthMismatch {
            expected: golden.len(),
            actual: actual.len(),
        });
    }

    let mut first = None;
    let mut mismatches = 0;
    for (index, (a, g)) in actual.iter().zip(golden).enumerate() {
        if a != g {
            first.get_or_insert((index, *g, *a));
            mismatches += 1;
        }
    }

    match first {
        None => Ok(()),
        Some((index, expected, actual)) => {
            log::warn!(
                "generated table differs from reference at index {index} ({mismatches} total)"
            );
            Err(VerifyError::EntryMismatch {
                index,
                expected,
                actual,
                mismatches,
            })
        }
    }
}
