//! Counter block generation.
//!
//! [`count_be`] is the GCM counter: the last 32 bits count and wrap on their
//! own, the first 96 bits are copied from the seed unchanged. Counter streams
//! from interoperating implementations depend on this exact behaviour, so it
//! is not a full 128-bit increment.
//!
//! [`count_16_be`] and [`count_8_be`] are full-width counters for plain CTR
//! mode over 128-bit and 64-bit block ciphers.

use crate::block::{Block, BLOCK_LEN};
use crate::dispatch::{CtrKernel, Kernels};
use crate::portable;

#[inline(always)]
fn check_dst(dst: &[u8], dst_off: usize, bytes: usize) {
    debug_assert!(
        dst_off.checked_add(bytes).map_or(false, |end| end <= dst.len()),
        "counter: destination range out of bounds"
    );
}

/// Writes `blocks` GCM counters starting at `seed` into `dst` at `dst_off`.
///
/// Block `k` is `seed` with its big-endian low lane advanced by `k` mod 2^32.
/// `blocks = 0` writes nothing.
#[inline]
pub fn count_be(seed: &Block, dst: &mut [u8], dst_off: usize, blocks: usize) {
    count_be_with(&Kernels::detect(), seed, dst, dst_off, blocks);
}

/// As [`count_be`], with an explicit kernel.
#[inline]
pub fn count_be_with<K: CtrKernel + ?Sized>(
    kernel: &K,
    seed: &Block,
    dst: &mut [u8],
    dst_off: usize,
    blocks: usize,
) {
    let bytes = blocks * BLOCK_LEN;
    check_dst(dst, dst_off, bytes);
    kernel.count_be(seed, &mut dst[dst_off..dst_off + bytes], blocks);
}

/// Writes `blocks` 128-bit big-endian counters; the increment carries across
/// the whole block and wraps at 2^128.
#[inline]
pub fn count_16_be(seed: &Block, dst: &mut [u8], dst_off: usize, blocks: usize) {
    let bytes = blocks * BLOCK_LEN;
    check_dst(dst, dst_off, bytes);
    portable::count_16_be(seed, &mut dst[dst_off..dst_off + bytes], blocks);
}

/// Writes `blocks` 64-bit big-endian counters for 8-byte block ciphers.
#[inline]
pub fn count_8_be(seed: &[u8; 8], dst: &mut [u8], dst_off: usize, blocks: usize) {
    let bytes = blocks * 8;
    check_dst(dst, dst_off, bytes);
    portable::count_8_be(seed, &mut dst[dst_off..dst_off + bytes], blocks);
}
