// ---------------------------------------------------------------------------
// Four packed 32-bit integer lanes, one implementation per instruction set.
//
// Architecture: `I32x4` is implemented directly on archmage capability
// tokens. Every SIMD method is an `#[arcane(in_trait)]` boundary, so it is
// safe to call anywhere a token exists. Kernels written generically over
// `I32x4` are `#[inline(always)]` and get monomorphized inside an `#[arcane]`
// entry point of the same tier, where the method bodies inline.
// ---------------------------------------------------------------------------

//! Portable 4×i32 vector operations.
//!
//! The catalogue is deliberately tiny: exactly what the endpoint search needs,
//! nothing more. Every backend is bit-exact with the [`ScalarToken`](archmage::ScalarToken) one.
//!
//! ```rust
//! use archmage::ScalarToken;
//! use etcdxt::lanes::{I32x4, Lanes};
//!
//! let t = ScalarToken;
//! let a = t.load(&Lanes::new([1, 2, 3, 4]));
//! let b = t.init(10, 20, 30, 40);
//! assert_eq!(t.horizontal_sum(t.mul(a, b)), 10 + 40 + 90 + 160);
//! ```

use bytemuck::{Pod, Zeroable};

mod scalar;

#[cfg(target_arch = "x86_64")]
mod sse41;

#[cfg(target_arch = "aarch64")]
mod neon;

#[cfg(target_arch = "wasm32")]
mod wasm;


// ===========================================================================
// Storage
// ===========================================================================

/// Sixteen-byte-aligned storage for one register's worth of lanes.
///
/// This is the only thing [`I32x4::load`] accepts, so loads are aligned by
/// construction. A `Vec<Lanes>` keeps every element aligned too.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C, align(16))]
pub struct Lanes(pub [i32; 4]);

impl Lanes {
    #[inline]
    pub const fn new(lanes: [i32; 4]) -> Self {
        Self(lanes)
    }

    #[inline]
    pub const fn splat(v: i32) -> Self {
        Self([v; 4])
    }
}

/// Shuffle index for a whole lane that reads as zero: every index byte is
/// `0xFF`, which is out of range on every backend.
pub const ZERO_LANE: i32 = -1;

/// Shuffle index selecting all four bytes of source lane `lane` (`0..4`).
#[inline]
pub const fn lane_select(lane: u8) -> i32 {
    // Bytes 4n, 4n+1, 4n+2, 4n+3 in little-endian order.
    (0x0302_0100 + (lane as u32) * 0x0404_0404) as i32
}

// ===========================================================================
// Operation catalogue
// ===========================================================================

/// The fixed 4×i32 operation set.
///
/// All arithmetic wraps on overflow. None of the operations allocate or fail,
/// apart from [`lane`](I32x4::lane) panicking on an out-of-range index.
pub trait I32x4: Copy {
    /// Backend register type.
    type Reg: Copy;

    /// Reads four lanes from aligned storage.
    fn load(self, src: &Lanes) -> Self::Reg;

    /// Builds a register from four scalars, lane 0 first.
    fn init(self, a: i32, b: i32, c: i32, d: i32) -> Self::Reg;

    /// Extracts lane `n`.
    ///
    /// # Panics
    ///
    /// If `n >= 4`.
    fn lane(self, v: Self::Reg, n: usize) -> i32;

    fn add(self, a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn sub(self, a: Self::Reg, b: Self::Reg) -> Self::Reg;
    /// Low 32 bits of each lane product.
    fn mul(self, a: Self::Reg, b: Self::Reg) -> Self::Reg;

    /// Wrapping sum of all four lanes.
    fn horizontal_sum(self, v: Self::Reg) -> i32;

    fn not(self, v: Self::Reg) -> Self::Reg;
    fn and(self, a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn or(self, a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn xor(self, a: Self::Reg, b: Self::Reg) -> Self::Reg;

    /// Byte permutation of `v`.
    ///
    /// Output byte `i` is byte `idx[i]` of `v` (little-endian lane order) when
    /// `idx[i] < 16`, and zero for any index byte of 16 or more. The hardware
    /// rules differ (x86 zeroes only on the high bit, NEON and WASM on any
    /// index past 15); each backend normalizes to this one.
    fn shuffle_bytes(self, v: Self::Reg, idx: Self::Reg) -> Self::Reg;
}

/// Reads every lane back out, mostly for tests and diagnostics.
#[inline]
pub fn to_array<V: I32x4>(token: V, v: V::Reg) -> [i32; 4] {
    [
        token.lane(v, 0),
        token.lane(v, 1),
        token.lane(v, 2),
        token.lane(v, 3),
    ]
}
