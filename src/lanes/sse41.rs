use core::arch::x86_64::{
    __m128i, _mm_add_epi32, _mm_and_si128, _mm_cmpgt_epi8, _mm_cvtsi128_si32, _mm_mullo_epi32,
    _mm_or_si128, _mm_set_epi32, _mm_set1_epi8, _mm_set1_epi32, _mm_shuffle_epi8,
    _mm_shuffle_epi32, _mm_sub_epi32, _mm_xor_si128,
};

use archmage::{X64V2Token, arcane};
use safe_unaligned_simd::x86_64::{_mm_loadu_si128, _mm_storeu_si128};

use super::{I32x4, Lanes};

// ===========================================================================
// x86-64 SSE4.1 backend (x86-64-v2 token)
//
// Each method is an `#[arcane]` boundary: the body is compiled with the v2
// features and inlines into kernels that already have them.
// ===========================================================================

impl I32x4 for X64V2Token {
    type Reg = __m128i;

    #[arcane(in_trait, _self = X64V2Token)]
    fn load(self, src: &Lanes) -> __m128i {
        _mm_loadu_si128(&src.0)
    }

    #[arcane(in_trait, _self = X64V2Token)]
    fn init(self, a: i32, b: i32, c: i32, d: i32) -> __m128i {
        _mm_set_epi32(d, c, b, a)
    }

    #[arcane(in_trait, _self = X64V2Token)]
    fn lane(self, v: __m128i, n: usize) -> i32 {
        let mut out = [0i32; 4];
        _mm_storeu_si128(&mut out, v);
        out[n]
    }

    #[arcane(in_trait, _self = X64V2Token)]
    fn add(self, a: __m128i, b: __m128i) -> __m128i {
        _mm_add_epi32(a, b)
    }

    #[arcane(in_trait, _self = X64V2Token)]
    fn sub(self, a: __m128i, b: __m128i) -> __m128i {
        _mm_sub_epi32(a, b)
    }

    #[arcane(in_trait, _self = X64V2Token)]
    fn mul(self, a: __m128i, b: __m128i) -> __m128i {
        _mm_mullo_epi32(a, b)
    }

    #[arcane(in_trait, _self = X64V2Token)]
    fn horizontal_sum(self, v: __m128i) -> i32 {
        let v = _mm_add_epi32(v, _mm_shuffle_epi32::<0b01_00_11_10>(v));
        let v = _mm_add_epi32(v, _mm_shuffle_epi32::<0b10_11_00_01>(v));
        _mm_cvtsi128_si32(v)
    }

    #[arcane(in_trait, _self = X64V2Token)]
    fn not(self, v: __m128i) -> __m128i {
        _mm_xor_si128(v, _mm_set1_epi32(-1))
    }

    #[arcane(in_trait, _self = X64V2Token)]
    fn and(self, a: __m128i, b: __m128i) -> __m128i {
        _mm_and_si128(a, b)
    }

    #[arcane(in_trait, _self = X64V2Token)]
    fn or(self, a: __m128i, b: __m128i) -> __m128i {
        _mm_or_si128(a, b)
    }

    #[arcane(in_trait, _self = X64V2Token)]
    fn xor(self, a: __m128i, b: __m128i) -> __m128i {
        _mm_xor_si128(a, b)
    }

    #[arcane(in_trait, _self = X64V2Token)]
    fn shuffle_bytes(self, v: __m128i, idx: __m128i) -> __m128i {
        // pshufb only zeroes on the high bit; indices 16..=127 would wrap.
        // Signed compare flags exactly those, and OR-ing sets their high bit.
        let wraps = _mm_cmpgt_epi8(idx, _mm_set1_epi8(15));
        _mm_shuffle_epi8(v, _mm_or_si128(idx, wraps))
    }
}
