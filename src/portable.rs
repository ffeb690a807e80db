#![forbid(unsafe_code)]
// Portable kernels.
// - Always available; the accelerated kernels must match them bit for bit.
// - XOR walks 16/8/1-byte chunks so any length is handled.
// - Operate on already-resolved slices; offset handling lives in `xor`/`counter`.

use crate::block::{BLOCK_LEN, LANE_LEN};

#[inline(always)]
fn load_u64(bytes: &[u8]) -> u64 {
    let mut w = [0u8; 8];
    w.copy_from_slice(&bytes[..8]);
    u64::from_ne_bytes(w)
}

/// `dst[i] ^= src[i]` for every `i < dst.len()`.
/// Requires: `src.len() >= dst.len()`.
#[inline]
pub fn xor_into(src: &[u8], dst: &mut [u8]) {
    debug_assert!(src.len() >= dst.len());
    let len = dst.len();
    let mut i = 0;

    while i + 16 <= len {
        let x0 = load_u64(&src[i..]) ^ load_u64(&dst[i..]);
        let x1 = load_u64(&src[i + 8..]) ^ load_u64(&dst[i + 8..]);
        dst[i..i + 8].copy_from_slice(&x0.to_ne_bytes());
        dst[i + 8..i + 16].copy_from_slice(&x1.to_ne_bytes());
        i += 16;
    }

    while i + 8 <= len {
        let x = load_u64(&src[i..]) ^ load_u64(&dst[i..]);
        dst[i..i + 8].copy_from_slice(&x.to_ne_bytes());
        i += 8;
    }

    while i < len {
        dst[i] ^= src[i];
        i += 1;
    }
}

/// Writes `blocks` GCM counters starting at `seed`, counting on the last
/// 32 bits and ignoring carry.
/// Requires: `dst.len() >= blocks * 16`.
#[inline]
pub fn count_16_be_4(seed: &[u8; BLOCK_LEN], dst: &mut [u8], blocks: usize) {
    debug_assert!(dst.len() >= blocks * BLOCK_LEN);
    let split = BLOCK_LEN - LANE_LEN;
    let mut lane = [0u8; LANE_LEN];
    lane.copy_from_slice(&seed[split..]);
    let mut low = u32::from_be_bytes(lane);

    for out in dst.chunks_exact_mut(BLOCK_LEN).take(blocks) {
        out[..split].copy_from_slice(&seed[..split]);
        out[split..].copy_from_slice(&low.to_be_bytes());
        low = low.wrapping_add(1);
    }
}

/// Writes `blocks` 128-bit big-endian counters starting at `seed`; carries
/// across the whole block.
/// Requires: `dst.len() >= blocks * 16`.
#[inline]
pub fn count_16_be(seed: &[u8; BLOCK_LEN], dst: &mut [u8], blocks: usize) {
    debug_assert!(dst.len() >= blocks * BLOCK_LEN);
    let mut ctr = u128::from_be_bytes(*seed);
    for out in dst.chunks_exact_mut(BLOCK_LEN).take(blocks) {
        out.copy_from_slice(&ctr.to_be_bytes());
        ctr = ctr.wrapping_add(1);
    }
}

/// Writes `blocks` 64-bit big-endian counters starting at `seed`.
/// Requires: `dst.len() >= blocks * 8`.
#[inline]
pub fn count_8_be(seed: &[u8; 8], dst: &mut [u8], blocks: usize) {
    debug_assert!(dst.len() >= blocks * 8);
    let mut ctr = u64::from_be_bytes(*seed);
    for out in dst.chunks_exact_mut(8).take(blocks) {
        out.copy_from_slice(&ctr.to_be_bytes());
        ctr = ctr.wrapping_add(1);
    }
}
