use core::arch::aarch64::{
    int32x4_t, vaddq_s32, vaddvq_s32, vandq_s32, veorq_s32, vmulq_s32, vmvnq_s32, vorrq_s32,
    vqtbl1q_u8, vreinterpretq_s32_u8, vreinterpretq_u8_s32, vsubq_s32,
};

use archmage::{NeonToken, arcane};
use safe_unaligned_simd::aarch64::{vld1q_s32, vst1q_s32};

use super::{I32x4, Lanes};

// ===========================================================================
// AArch64 NEON backend
// ===========================================================================

impl I32x4 for NeonToken {
    type Reg = int32x4_t;

    #[arcane(in_trait, _self = NeonToken)]
    fn load(self, src: &Lanes) -> int32x4_t {
        vld1q_s32(&src.0)
    }

    #[arcane(in_trait, _self = NeonToken)]
    fn init(self, a: i32, b: i32, c: i32, d: i32) -> int32x4_t {
        vld1q_s32(&[a, b, c, d])
    }

    #[arcane(in_trait, _self = NeonToken)]
    fn lane(self, v: int32x4_t, n: usize) -> i32 {
        let mut out = [0i32; 4];
        vst1q_s32(&mut out, v);
        out[n]
    }

    #[arcane(in_trait, _self = NeonToken)]
    fn add(self, a: int32x4_t, b: int32x4_t) -> int32x4_t {
        vaddq_s32(a, b)
    }

    #[arcane(in_trait, _self = NeonToken)]
    fn sub(self, a: int32x4_t, b: int32x4_t) -> int32x4_t {
        vsubq_s32(a, b)
    }

    #[arcane(in_trait, _self = NeonToken)]
    fn mul(self, a: int32x4_t, b: int32x4_t) -> int32x4_t {
        vmulq_s32(a, b)
    }

    #[arcane(in_trait, _self = NeonToken)]
    fn horizontal_sum(self, v: int32x4_t) -> i32 {
        vaddvq_s32(v)
    }

    #[arcane(in_trait, _self = NeonToken)]
    fn not(self, v: int32x4_t) -> int32x4_t {
        vmvnq_s32(v)
    }

    #[arcane(in_trait, _self = NeonToken)]
    fn and(self, a: int32x4_t, b: int32x4_t) -> int32x4_t {
        vandq_s32(a, b)
    }

    #[arcane(in_trait, _self = NeonToken)]
    fn or(self, a: int32x4_t, b: int32x4_t) -> int32x4_t {
        vorrq_s32(a, b)
    }

    #[arcane(in_trait, _self = NeonToken)]
    fn xor(self, a: int32x4_t, b: int32x4_t) -> int32x4_t {
        veorq_s32(a, b)
    }

    #[arcane(in_trait, _self = NeonToken)]
    fn shuffle_bytes(self, v: int32x4_t, idx: int32x4_t) -> int32x4_t {
        // tbl already yields zero for any index past 15.
        let bytes = vqtbl1q_u8(vreinterpretq_u8_s32(v), vreinterpretq_u8_s32(idx));
        vreinterpretq_s32_u8(bytes)
    }
}
