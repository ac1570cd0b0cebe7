//! Selector ranges, selector mappings and the lane descriptors derived from them.
//!
//! A [`SelectorRange`] says which of an ETC1 sub-block's four selector slots
//! take part in the fit. A [`SelectorMapping`] says which DXT1 palette entry
//! each slot is compared against. Both are turned into [`Lanes`] once per
//! generation (a lane mask and a byte-shuffle index), so the search loop only
//! ever does vector logic on them.

use alloc::vec::Vec;

use crate::error::TableError;
use crate::lanes::{Lanes, ZERO_LANE, lane_select};

/// Inclusive span `[low, high]` of active selector slots, `low ≤ high ≤ 3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SelectorRange {
    pub low: u8,
    pub high: u8,
}

impl SelectorRange {
    pub const ALL: SelectorRange = SelectorRange::new(0, 3);

    #[inline]
    pub const fn new(low: u8, high: u8) -> Self {
        Self { low, high }
    }

    #[inline]
    pub const fn contains(&self, slot: usize) -> bool {
        self.low as usize <= slot && slot <= self.high as usize
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.low <= self.high && self.high <= 3
    }

    /// All-ones in active lanes, zero elsewhere.
    pub fn mask(&self) -> Lanes {
        Lanes::new(core::array::from_fn(|s| if self.contains(s) { -1 } else { 0 }))
    }
}

/// Where one selector slot reads its palette value from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Palette entry `0..4`: low, ⅓, ⅔, high.
    Lane(u8),
    /// Always compares against zero.
    Zero,
}

/// Per-slot palette assignment for one candidate selector layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SelectorMapping(pub [Slot; 4]);

impl SelectorMapping {
    pub const IDENTITY: SelectorMapping = SelectorMapping::from_lanes([0, 1, 2, 3]);

    /// Mapping with every slot assigned a palette lane.
    #[inline]
    pub const fn from_lanes(lanes: [u8; 4]) -> Self {
        Self([
            Slot::Lane(lanes[0]),
            Slot::Lane(lanes[1]),
            Slot::Lane(lanes[2]),
            Slot::Lane(lanes[3]),
        ])
    }

    #[inline]
    pub fn slot(&self, s: usize) -> Slot {
        self.0[s]
    }

    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|s| match *s {
            Slot::Lane(l) => l < 4,
            Slot::Zero => true,
        })
    }

    /// Byte-shuffle index moving each slot's palette lane into place, or
    /// [`ZERO_LANE`] for [`Slot::Zero`].
    pub fn shuffle(&self) -> Lanes {
        Lanes::new(self.0.map(|s| match s {
            Slot::Lane(l) => lane_select(l),
            Slot::Zero => ZERO_LANE,
        }))
    }
}

// ===========================================================================
// basis universal's ETC1 → DXT1 input sets
// ===========================================================================

/// The six selector ranges basis universal fits.
pub const DEFAULT_RANGES: [SelectorRange; 6] = [
    SelectorRange::new(0, 3),
    SelectorRange::new(1, 3),
    SelectorRange::new(0, 2),
    SelectorRange::new(1, 2),
    SelectorRange::new(2, 3),
    SelectorRange::new(0, 1),
];

/// The ten selector mappings basis universal fits.
pub const DEFAULT_MAPPINGS: [SelectorMapping; 10] = [
    SelectorMapping::from_lanes([0, 0, 1, 1]),
    SelectorMapping::from_lanes([0, 0, 1, 2]),
    SelectorMapping::from_lanes([0, 0, 1, 3]),
    SelectorMapping::from_lanes([0, 0, 2, 3]),
    SelectorMapping::from_lanes([0, 1, 1, 1]),
    SelectorMapping::from_lanes([0, 1, 2, 2]),
    SelectorMapping::from_lanes([0, 1, 2, 3]),
    SelectorMapping::from_lanes([0, 2, 3, 3]),
    SelectorMapping::from_lanes([1, 2, 2, 2]),
    SelectorMapping::from_lanes([1, 2, 3, 3]),
];

// ===========================================================================
// Precomputed descriptors
// ===========================================================================

/// Range masks and shuffle indices for a whole input set, independent of
/// intensity and green.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Descriptors {
    pub range_masks: Vec<Lanes>,
    pub shuffles: Vec<Lanes>,
}

impl Descriptors {
    /// Validates every range and mapping, then derives their lanes.
    pub fn new(
        ranges: &[SelectorRange],
        mappings: &[SelectorMapping],
    ) -> Result<Self, TableError> {
        if ranges.is_empty() {
            return Err(TableError::NoRanges);
        }
        if mappings.is_empty() {
            return Err(TableError::NoMappings);
        }
        if let Some((index, r)) = ranges.iter().enumerate().find(|(_, r)| !r.is_valid()) {
            return Err(TableError::InvalidRange {
                index,
                low: r.low,
                high: r.high,
            });
        }
        if let Some((index, m)) = mappings.iter().enumerate().find(|(_, m)| !m.is_valid()) {
            return Err(TableError::InvalidMapping { index, mapping: *m });
        }
        Ok(Self {
            range_masks: ranges.iter().map(SelectorRange::mask).collect(),
            shuffles: mappings.iter().map(SelectorMapping::shuffle).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::all(SelectorRange::new(0, 3), [-1, -1, -1, -1])]
    #[case::tail(SelectorRange::new(1, 3), [0, -1, -1, -1])]
    #[case::middle(SelectorRange::new(1, 2), [0, -1, -1, 0])]
    #[case::single(SelectorRange::new(2, 2), [0, 0, -1, 0])]
    #[case::head(SelectorRange::new(0, 1), [-1, -1, 0, 0])]
    fn range_masks(#[case] range: SelectorRange, #[case] want: [i32; 4]) {
        assert_eq!(range.mask().0, want);
    }

    #[test]
    fn shuffle_indices() {
        let m = SelectorMapping::from_lanes([0, 0, 1, 3]);
        assert_eq!(
            m.shuffle().0,
            [0x0302_0100, 0x0302_0100, 0x0706_0504, 0x0F0E_0D0C]
        );
        let z = SelectorMapping([Slot::Zero, Slot::Lane(2), Slot::Zero, Slot::Lane(1)]);
        assert_eq!(z.shuffle().0, [-1, 0x0B0A_0908, -1, 0x0706_0504]);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(DEFAULT_RANGES.iter().all(SelectorRange::is_valid));
        assert!(DEFAULT_MAPPINGS.iter().all(SelectorMapping::is_valid));
        assert_eq!(DEFAULT_MAPPINGS[6], SelectorMapping::IDENTITY);
        assert_eq!(DEFAULT_RANGES[0], SelectorRange::ALL);
    }

    #[test]
    fn descriptors_follow_input_order() {
        let d = Descriptors::new(&DEFAULT_RANGES, &DEFAULT_MAPPINGS).unwrap();
        assert_eq!(d.range_masks.len(), 6);
        assert_eq!(d.shuffles.len(), 10);
        assert_eq!(d.range_masks[4].0, [0, 0, -1, -1]);
        assert_eq!(d.shuffles[6].0, [0x0302_0100, 0x0706_0504, 0x0B0A_0908, 0x0F0E_0D0C]);
    }

    #[rstest]
    #[case::reversed(SelectorRange::new(2, 1), 1)]
    #[case::past_end(SelectorRange::new(0, 4), 1)]
    fn rejects_bad_ranges(#[case] bad: SelectorRange, #[case] index: usize) {
        let ranges = [SelectorRange::ALL, bad];
        let err = Descriptors::new(&ranges, &DEFAULT_MAPPINGS).unwrap_err();
        assert_eq!(
            err,
            TableError::InvalidRange {
                index,
                low: bad.low,
                high: bad.high
            }
        );
    }

    #[test]
    fn rejects_bad_mappings_and_empty_sets() {
        let bad = SelectorMapping::from_lanes([0, 1, 4, 3]);
        assert_eq!(
            Descriptors::new(&DEFAULT_RANGES, &[SelectorMapping::IDENTITY, bad]),
            Err(TableError::InvalidMapping {
                index: 1,
                mapping: bad
            })
        );
        assert_eq!(
            Descriptors::new(&[], &DEFAULT_MAPPINGS),
            Err(TableError::NoRanges)
        );
        assert_eq!(
            Descriptors::new(&DEFAULT_RANGES, &[]),
            Err(TableError::NoMappings)
        );
    }
}
