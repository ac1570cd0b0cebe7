use archmage::ScalarToken;

use super::{I32x4, Lanes};

// ===========================================================================
// Scalar backend: plain arrays, the reference every SIMD backend matches
// ===========================================================================

#[inline(always)]
fn map2(a: [i32; 4], b: [i32; 4], f: impl Fn(i32, i32) -> i32) -> [i32; 4] {
    [f(a[0], b[0]), f(a[1], b[1]), f(a[2], b[2]), f(a[3], b[3])]
}

impl I32x4 for ScalarToken {
    type Reg = [i32; 4];

    #[inline(always)]
    fn load(self, src: &Lanes) -> [i32; 4] {
        src.0
    }

    #[inline(always)]
    fn init(self, a: i32, b: i32, c: i32, d: i32) -> [i32; 4] {
        [a, b, c, d]
    }

    #[inline(always)]
    fn lane(self, v: [i32; 4], n: usize) -> i32 {
        v[n]
    }

    #[inline(always)]
    fn add(self, a: [i32; 4], b: [i32; 4]) -> [i32; 4] {
        map2(a, b, i32::wrapping_add)
    }

    #[inline(always)]
    fn sub(self, a: [i32; 4], b: [i32; 4]) -> [i32; 4] {
        map2(a, b, i32::wrapping_sub)
    }

    #[inline(always)]
    fn mul(self, a: [i32; 4], b: [i32; 4]) -> [i32; 4] {
        map2(a, b, i32::wrapping_mul)
    }

    #[inline(always)]
    fn horizontal_sum(self, v: [i32; 4]) -> i32 {
        v[0].wrapping_add(v[1]).wrapping_add(v[2]).wrapping_add(v[3])
    }

    #[inline(always)]
    fn not(self, v: [i32; 4]) -> [i32; 4] {
        v.map(|x| !x)
    }

    #[inline(always)]
    fn and(self, a: [i32; 4], b: [i32; 4]) -> [i32; 4] {
        map2(a, b, |x, y| x & y)
    }

    #[inline(always)]
    fn or(self, a: [i32; 4], b: [i32; 4]) -> [i32; 4] {
        map2(a, b, |x, y| x | y)
    }

    #[inline(always)]
    fn xor(self, a: [i32; 4], b: [i32; 4]) -> [i32; 4] {
        map2(a, b, |x, y| x ^ y)
    }

    #[inline(always)]
    fn shuffle_bytes(self, v: [i32; 4], idx: [i32; 4]) -> [i32; 4] {
        let src: [u8; 16] = bytemuck::cast(v.map(i32::to_le));
        let sel: [u8; 16] = bytemuck::cast(idx.map(i32::to_le));
        let out: [u8; 16] = sel.map(|i| if i < 16 { src[i as usize] } else { 0 });
        bytemuck::cast::<[u8; 16], [i32; 4]>(out).map(i32::from_le)
    }
}
