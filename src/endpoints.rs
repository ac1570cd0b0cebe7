//! DXT1 endpoint expansion and the precomputed color table.
//!
//! Every (low, high) endpoint pair at a given bit-width is expanded and
//! interpolated once, up front, instead of once per search tuple.
//!
//! The table is enumerated **high-major**: entry `high * 2^B + low`. Searches
//! scan it in that order and keep the first strictly-better pair, so this order
//! decides which pair wins a tie.

use alloc::vec::Vec;

use crate::lanes::Lanes;

/// Endpoint precision of the DXT1 channel being fitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EndpointBits {
    /// Red and blue in RGB565.
    Five,
    /// Green in RGB565.
    #[default]
    Six,
}

impl EndpointBits {
    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            EndpointBits::Five => 5,
            EndpointBits::Six => 6,
        }
    }

    /// Number of distinct endpoint values, `2^B`.
    #[inline]
    pub const fn levels(self) -> usize {
        1 << self.bits()
    }

    /// Number of (low, high) pairs, `2^B × 2^B`.
    #[inline]
    pub const fn pairs(self) -> usize {
        self.levels() * self.levels()
    }

    /// Widens a `B`-bit endpoint to 8 bits by replicating its top bits into
    /// the vacated low bits (`0b101101` → `0b1011_0110`).
    #[inline]
    pub const fn expand(self, v: u8) -> u8 {
        let b = self.bits();
        debug_assert!((v as usize) < self.levels());
        (v << (8 - b)) | (v >> (2 * b - 8))
    }

    /// Splits a table index back into `(low, high)`.
    #[inline]
    pub const fn split(self, index: usize) -> (u8, u8) {
        let low = index & (self.levels() - 1);
        let high = index >> self.bits();
        (low as u8, high as u8)
    }
}

/// The four DXT1 palette values for one endpoint pair:
/// `[low, (2·low + high) / 3, (2·high + low) / 3, high]`, truncating.
#[inline]
pub const fn interpolate(low8: u8, high8: u8) -> [i32; 4] {
    let (l, h) = (low8 as i32, high8 as i32);
    [l, (2 * l + h) / 3, (2 * h + l) / 3, h]
}

/// Every interpolated palette for one bit-width, high-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorTable {
    bits: EndpointBits,
    entries: Vec<Lanes>,
}

impl ColorTable {
    pub fn new(bits: EndpointBits) -> Self {
        let levels = bits.levels() as u8;
        let mut entries = Vec::with_capacity(bits.pairs());
        for high in 0..levels {
            let high8 = bits.expand(high);
            for low in 0..levels {
                entries.push(Lanes::new(interpolate(bits.expand(low), high8)));
            }
        }
        Self { bits, entries }
    }

    #[inline]
    pub fn bits(&self) -> EndpointBits {
        self.bits
    }

    #[inline]
    pub fn entries(&self) -> &[Lanes] {
        &self.entries
    }

    /// Palette for one pair.
    #[inline]
    pub fn get(&self, low: u8, high: u8) -> &Lanes {
        &self.entries[((high as usize) << self.bits.bits()) | low as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::six_zero(EndpointBits::Six, 0, 0)]
    #[case::six_one(EndpointBits::Six, 1, 4)]
    #[case::six_sixteen(EndpointBits::Six, 16, 65)]
    #[case::six_max(EndpointBits::Six, 63, 255)]
    #[case::five_zero(EndpointBits::Five, 0, 0)]
    #[case::five_one(EndpointBits::Five, 1, 8)]
    #[case::five_sixteen(EndpointBits::Five, 16, 132)]
    #[case::five_max(EndpointBits::Five, 31, 255)]
    fn expands_by_bit_replication(#[case] bits: EndpointBits, #[case] v: u8, #[case] want: u8) {
        assert_eq!(bits.expand(v), want);
    }

    #[test]
    fn expansion_is_monotonic_and_spans_the_byte() {
        for bits in [EndpointBits::Five, EndpointBits::Six] {
            let expanded: Vec<u8> = (0..bits.levels() as u8).map(|v| bits.expand(v)).collect();
            assert_eq!(expanded[0], 0);
            assert_eq!(*expanded.last().unwrap(), 255);
            assert!(expanded.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn interpolation_truncates() {
        // 2·0 + 255 = 255 → 85; 2·255 + 0 = 510 → 170.
        assert_eq!(interpolate(0, 255), [0, 85, 170, 255]);
        // 2·4 + 9 = 17 → 5; 2·9 + 4 = 22 → 7.
        assert_eq!(interpolate(4, 9), [4, 5, 7, 9]);
        assert_eq!(interpolate(200, 100), [200, 166, 133, 100]);
    }

    #[rstest]
    #[case::five(EndpointBits::Five)]
    #[case::six(EndpointBits::Six)]
    fn table_is_high_major(#[case] bits: EndpointBits) {
        let table = ColorTable::new(bits);
        assert_eq!(table.entries().len(), bits.pairs());
        for (i, entry) in table.entries().iter().enumerate() {
            let (low, high) = bits.split(i);
            assert_eq!(i, (high as usize) * bits.levels() + low as usize);
            assert_eq!(entry.0, interpolate(bits.expand(low), bits.expand(high)));
            assert_eq!(table.get(low, high), entry);
        }
    }

    #[test]
    fn second_entry_moves_low_first() {
        let table = ColorTable::new(EndpointBits::Six);
        // high = 0, low = 1 → low8 = 4.
        assert_eq!(table.entries()[1].0, [4, 2, 1, 0]);
        // high = 1, low = 0 → high8 = 4.
        assert_eq!(table.entries()[64].0, [0, 1, 2, 4]);
    }
}
