//! ETC1 differential-mode sub-block reconstruction, one channel at a time.
//!
//! In differential mode a sub-block's base color is stored as 5 bits per
//! channel. Each pixel's 2-bit selector picks one of four signed offsets from
//! the sub-block's intensity table; the offset is added to the expanded base
//! and clamped.

/// The eight ETC1 intensity modifier tables, selectors in ascending order.
pub const INTENSITY_MODIFIERS: [[i32; 4]; 8] = [
    [-8, -2, 2, 8],
    [-17, -5, 5, 17],
    [-29, -9, 9, 29],
    [-42, -13, 13, 42],
    [-60, -18, 18, 60],
    [-80, -24, 24, 80],
    [-106, -33, 33, 106],
    [-183, -47, 47, 183],
];

pub const INTENSITY_LEVELS: usize = INTENSITY_MODIFIERS.len();

/// Number of 5-bit base values.
pub const BASE_LEVELS: usize = 32;

/// 5-bit → 8-bit base expansion, `(v << 3) | (v >> 2)`.
#[inline]
pub const fn expand5(v: u8) -> u8 {
    (v << 3) | (v >> 2)
}

/// The four reconstructed values of one channel for selectors 0..4.
///
/// # Panics
///
/// If `base5 >= 32` or `intensity >= 8`.
pub fn subblock_channel(base5: u8, intensity: usize) -> [u8; 4] {
    assert!((base5 as usize) < BASE_LEVELS, "5-bit base out of range: {base5}");
    let base = expand5(base5) as i32;
    INTENSITY_MODIFIERS[intensity].map(|m| (base + m).clamp(0, 255) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::black_low(0, 0, [0, 0, 2, 8])]
    #[case::black_high(0, 7, [0, 0, 47, 183])]
    #[case::mid(16, 0, [124, 130, 134, 140])]
    #[case::mid_wide(16, 3, [90, 119, 145, 174])]
    #[case::white(31, 7, [72, 208, 255, 255])]
    #[case::near_white(30, 1, [230, 242, 252, 255])]
    fn reconstructs_and_clamps(#[case] base5: u8, #[case] intensity: usize, #[case] want: [u8; 4]) {
        assert_eq!(subblock_channel(base5, intensity), want);
    }

    #[test]
    fn tables_are_symmetric() {
        for row in INTENSITY_MODIFIERS {
            assert_eq!(row[0], -row[3]);
            assert_eq!(row[1], -row[2]);
            assert!(row[0] < row[1]);
        }
    }

    #[test]
    #[should_panic]
    fn rejects_wide_base() {
        let _ = subblock_channel(32, 0);
    }
}
