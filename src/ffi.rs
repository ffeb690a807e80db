//! C ABI for the embedding layer.
//!
//! Buffers arrive as a base pointer plus a byte offset. None of these functions
//! check bounds; see each `# Safety` section.
//!
//! The `_sse` entry points do nothing when the accelerated kernels are not
//! available; callers consult [`mc_misc_mode_sse`] first and use the
//! `_generic` entry points otherwise.

use core::ffi::c_int;
use core::slice;

use crate::block::BLOCK_LEN;
use crate::caps;
use crate::portable;

/// Resolves a handle + offset pair into the two slices of an XOR.
///
/// Returns `None` when source and destination are the same region, which
/// cannot be expressed as a shared and a unique borrow.
unsafe fn xor_regions<'a>(
    src: *const u8,
    src_off: usize,
    dst: *mut u8,
    dst_off: usize,
    n: usize,
) -> Option<(&'a [u8], &'a mut [u8])> {
    let s = src.add(src_off);
    let d = dst.add(dst_off);
    if core::ptr::eq(s, d) {
        return None;
    }
    Some((slice::from_raw_parts(s, n), slice::from_raw_parts_mut(d, n)))
}

/// `dst[dst_off + i] ^= src[src_off + i]` for `i < n`, portable kernel.
///
/// # Safety
/// Both ranges must be valid for `n` bytes and must either coincide exactly or
/// not overlap.
#[no_mangle]
pub unsafe extern "C" fn mc_xor_into_generic(
    src: *const u8,
    src_off: usize,
    dst: *mut u8,
    dst_off: usize,
    n: usize,
) {
    if n == 0 {
        return;
    }
    match xor_regions(src, src_off, dst, dst_off, n) {
        Some((s, d)) => portable::xor_into(s, d),
        None => slice::from_raw_parts_mut(dst.add(dst_off), n).fill(0),
    }
}

/// As [`mc_xor_into_generic`], SSE kernel. No-op without acceleration.
///
/// # Safety
/// As [`mc_xor_into_generic`].
#[no_mangle]
pub unsafe extern "C" fn mc_xor_into_sse(
    src: *const u8,
    src_off: usize,
    dst: *mut u8,
    dst_off: usize,
    n: usize,
) {
    #[cfg(all(feature = "accelerate", target_arch = "x86_64"))]
    if n != 0 && caps::accelerated() {
        match xor_regions(src, src_off, dst, dst_off, n) {
            Some((s, d)) => crate::x86_64::xor_into(s, d),
            None => slice::from_raw_parts_mut(dst.add(dst_off), n).fill(0),
        }
    }
    #[cfg(not(all(feature = "accelerate", target_arch = "x86_64")))]
    let _ = (src, src_off, dst, dst_off, n);
}

/// Writes `blocks` GCM counters from the 16 bytes at `ctr` to `dst + off`,
/// portable kernel.
///
/// # Safety
/// `ctr` must be valid for 16 bytes; `dst + off` for `blocks * 16` bytes; the
/// two must not overlap.
#[no_mangle]
pub unsafe extern "C" fn mc_count_16_be_4_generic(
    ctr: *const u8,
    dst: *mut u8,
    off: usize,
    blocks: usize,
) {
    if blocks == 0 {
        return;
    }
    let seed = &*(ctr as *const [u8; BLOCK_LEN]);
    let out = slice::from_raw_parts_mut(dst.add(off), blocks * BLOCK_LEN);
    portable::count_16_be_4(seed, out, blocks);
}

/// As [`mc_count_16_be_4_generic`], SSSE3 kernel. No-op without acceleration.
///
/// # Safety
/// As [`mc_count_16_be_4_generic`].
#[no_mangle]
pub unsafe extern "C" fn mc_count_16_be_4_sse(
    ctr: *const u8,
    dst: *mut u8,
    off: usize,
    blocks: usize,
) {
    #[cfg(all(feature = "accelerate", target_arch = "x86_64"))]
    if blocks != 0 && caps::accelerated() {
        let seed = &*(ctr as *const [u8; BLOCK_LEN]);
        let out = slice::from_raw_parts_mut(dst.add(off), blocks * BLOCK_LEN);
        crate::x86_64::count_16_be_4(seed, out, blocks);
    }
    #[cfg(not(all(feature = "accelerate", target_arch = "x86_64")))]
    let _ = (ctr, dst, off, blocks);
}

/// Writes `blocks` 128-bit big-endian counters, carrying across all 128 bits.
///
/// # Safety
/// As [`mc_count_16_be_4_generic`].
#[no_mangle]
pub unsafe extern "C" fn mc_count_16_be(ctr: *const u8, dst: *mut u8, off: usize, blocks: usize) {
    if blocks == 0 {
        return;
    }
    let seed = &*(ctr as *const [u8; BLOCK_LEN]);
    let out = slice::from_raw_parts_mut(dst.add(off), blocks * BLOCK_LEN);
    portable::count_16_be(seed, out, blocks);
}

/// Writes `blocks` 64-bit big-endian counters.
///
/// # Safety
/// `ctr` must be valid for 8 bytes; `dst + off` for `blocks * 8` bytes; the
/// two must not overlap.
#[no_mangle]
pub unsafe extern "C" fn mc_count_8_be(ctr: *const u8, dst: *mut u8, off: usize, blocks: usize) {
    if blocks == 0 {
        return;
    }
    let seed = &*(ctr as *const [u8; 8]);
    let out = slice::from_raw_parts_mut(dst.add(off), blocks * 8);
    portable::count_8_be(seed, out, blocks);
}

/// `1` when the `_sse` entry points are live, `0` otherwise.
#[no_mangle]
pub extern "C" fn mc_misc_mode_sse() -> c_int {
    caps::accelerated() as c_int
}

/// Crate version as `0xMMmmpp` (major, minor, patch).
#[no_mangle]
pub extern "C" fn mc_version() -> u32 {
    0x000300
}
