use core::arch::wasm32::{
    i8x16_swizzle, i32x4, i32x4_add, i32x4_extract_lane, i32x4_mul, i32x4_shuffle, i32x4_sub,
    v128, v128_and, v128_not, v128_or, v128_xor,
};

use archmage::{Wasm128Token, arcane};
use safe_unaligned_simd::wasm32::{v128_load, v128_store};

use super::{I32x4, Lanes};

// ===========================================================================
// WASM SIMD128 backend
// ===========================================================================

impl I32x4 for Wasm128Token {
    type Reg = v128;

    #[arcane(in_trait, _self = Wasm128Token)]
    fn load(self, src: &Lanes) -> v128 {
        v128_load(&src.0)
    }

    #[arcane(in_trait, _self = Wasm128Token)]
    fn init(self, a: i32, b: i32, c: i32, d: i32) -> v128 {
        i32x4(a, b, c, d)
    }

    #[arcane(in_trait, _self = Wasm128Token)]
    fn lane(self, v: v128, n: usize) -> i32 {
        let mut out = [0i32; 4];
        v128_store(&mut out, v);
        out[n]
    }

    #[arcane(in_trait, _self = Wasm128Token)]
    fn add(self, a: v128, b: v128) -> v128 {
        i32x4_add(a, b)
    }

    #[arcane(in_trait, _self = Wasm128Token)]
    fn sub(self, a: v128, b: v128) -> v128 {
        i32x4_sub(a, b)
    }

    #[arcane(in_trait, _self = Wasm128Token)]
    fn mul(self, a: v128, b: v128) -> v128 {
        i32x4_mul(a, b)
    }

    #[arcane(in_trait, _self = Wasm128Token)]
    fn horizontal_sum(self, v: v128) -> i32 {
        // No across-lanes add in SIMD128: fold halves, then pairs.
        let v = i32x4_add(v, i32x4_shuffle::<2, 3, 0, 1>(v, v));
        let v = i32x4_add(v, i32x4_shuffle::<1, 0, 3, 2>(v, v));
        i32x4_extract_lane::<0>(v)
    }

    #[arcane(in_trait, _self = Wasm128Token)]
    fn not(self, v: v128) -> v128 {
        v128_not(v)
    }

    #[arcane(in_trait, _self = Wasm128Token)]
    fn and(self, a: v128, b: v128) -> v128 {
        v128_and(a, b)
    }

    #[arcane(in_trait, _self = Wasm128Token)]
    fn or(self, a: v128, b: v128) -> v128 {
        v128_or(a, b)
    }

    #[arcane(in_trait, _self = Wasm128Token)]
    fn xor(self, a: v128, b: v128) -> v128 {
        v128_xor(a, b)
    }

    #[arcane(in_trait, _self = Wasm128Token)]
    fn shuffle_bytes(self, v: v128, idx: v128) -> v128 {
        i8x16_swizzle(v, idx)
    }
}
