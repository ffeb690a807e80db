//! SSE2/SSSE3 kernels.
//!
//! # Safety
//! Every function here requires the CPU features named in its
//! `#[target_feature]` attribute. Callers go through [`crate::caps`] first.

use core::arch::x86_64::{
    __m128i, _mm_add_epi32, _mm_loadu_si128, _mm_set_epi32, _mm_set_epi64x, _mm_shuffle_epi8,
    _mm_storeu_si128, _mm_xor_si128,
};
use core::ptr;

use crate::block::BLOCK_LEN;

/// `dst[i] ^= src[i]` for every `i < dst.len()`.
///
/// 16-byte `pxor` chunks, then one 8-byte word, then bytes.
///
/// # Safety
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub unsafe fn xor_into(src: &[u8], dst: &mut [u8]) {
    let len = dst.len();
    let src = &src[..len];
    let s = src.as_ptr();
    let d = dst.as_mut_ptr();
    let mut i = 0;

    while i + 16 <= len {
        let a = _mm_loadu_si128(s.add(i) as *const __m128i);
        let b = _mm_loadu_si128(d.add(i) as *const __m128i);
        _mm_storeu_si128(d.add(i) as *mut __m128i, _mm_xor_si128(a, b));
        i += 16;
    }

    while i + 8 <= len {
        let a = ptr::read_unaligned(s.add(i) as *const u64);
        let b = ptr::read_unaligned(d.add(i) as *const u64);
        ptr::write_unaligned(d.add(i) as *mut u64, a ^ b);
        i += 8;
    }

    while i < len {
        *d.add(i) ^= *s.add(i);
        i += 1;
    }
}

/// Byte-reverses each 32-bit lane; its own inverse.
#[inline(always)]
unsafe fn lane_swap_mask() -> __m128i {
    _mm_set_epi64x(0x0c0d_0e0f_0809_0a0b, 0x0405_0607_0001_0203)
}

/// GCM counter blocks: counts on the last 32 bits, ignoring carry.
///
/// Four counters are kept in flight, offset by 0..3 and stepped by 4; the
/// remainder is emitted one block at a time.
///
/// # Safety
/// The CPU must support SSE2 and SSSE3.
#[target_feature(enable = "sse2,ssse3")]
pub unsafe fn count_16_be_4(seed: &[u8; BLOCK_LEN], dst: &mut [u8], blocks: usize) {
    let dst = &mut dst[..blocks * BLOCK_LEN];
    let d = dst.as_mut_ptr() as *mut __m128i;

    let mask = lane_swap_mask();
    let one = _mm_set_epi32(1, 0, 0, 0);
    let four = _mm_set_epi32(4, 0, 0, 0);

    let mut c0 = _mm_shuffle_epi8(_mm_loadu_si128(seed.as_ptr() as *const __m128i), mask);
    let mut c1 = _mm_add_epi32(c0, one);
    let mut c2 = _mm_add_epi32(c1, one);
    let mut c3 = _mm_add_epi32(c2, one);

    let mut i = 0;
    while i + 4 <= blocks {
        _mm_storeu_si128(d.add(i), _mm_shuffle_epi8(c0, mask));
        _mm_storeu_si128(d.add(i + 1), _mm_shuffle_epi8(c1, mask));
        _mm_storeu_si128(d.add(i + 2), _mm_shuffle_epi8(c2, mask));
        _mm_storeu_si128(d.add(i + 3), _mm_shuffle_epi8(c3, mask));
        c0 = _mm_add_epi32(c0, four);
        c1 = _mm_add_epi32(c1, four);
        c2 = _mm_add_epi32(c2, four);
        c3 = _mm_add_epi32(c3, four);
        i += 4;
    }

    while i < blocks {
        _mm_storeu_si128(d.add(i), _mm_shuffle_epi8(c0, mask));
        c0 = _mm_add_epi32(c0, one);
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::portable;
    use alloc::vec;
    use alloc::vec::Vec;

    fn supported() -> bool {
        std::is_x86_feature_detected!("sse2") && std::is_x86_feature_detected!("ssse3")
    }

    #[test]
    fn test_xor_matches_portable() {
        if !supported() {
            return;
        }
        for len in [0usize, 1, 7, 8, 15, 16, 17, 24, 31, 33, 100, 257] {
            let src = (0..len).map(|i| (i as u8).wrapping_mul(13)).collect::<Vec<u8>>();
            let mut a = (0..len).map(|i| (i as u8).wrapping_add(0x40)).collect::<Vec<u8>>();
            let mut b = a.clone();
            unsafe { xor_into(&src, &mut a) };
            portable::xor_into(&src, &mut b);
            assert_eq!(a, b, "len {}", len);
        }
    }

    #[test]
    fn test_counter_matches_portable_around_wrap() {
        if !supported() {
            return;
        }
        let mut seed = [0xA5u8; 16];
        for start in [0u32, 1, 0xFFFF_FFFA, 0xFFFF_FFFF] {
            seed[12..].copy_from_slice(&start.to_be_bytes());
            for blocks in 0..11usize {
                let mut a = vec![0u8; blocks * 16];
                let mut b = a.clone();
                unsafe { count_16_be_4(&seed, &mut a, blocks) };
                portable::count_16_be_4(&seed, &mut b, blocks);
                assert_eq!(a, b, "start {:#x} blocks {}", start, blocks);
            }
        }
    }
}
