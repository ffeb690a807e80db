// In-place XOR accumulation.
// - `dst[dst_off + i] ^= src[src_off + i]` for `i < len`; nothing else is touched.
// - Offsets are the caller's precondition: checked by `debug_assert!` and by
//   slicing, so a violation panics instead of reaching the kernels.

use crate::dispatch::{CtrKernel, Kernels};

#[inline(always)]
fn in_bounds(off: usize, len: usize, buf_len: usize) -> bool {
    off.checked_add(len).map_or(false, |end| end <= buf_len)
}

/// XORs `len` bytes of `src` at `src_off` into `dst` at `dst_off` using the
/// best kernels for this process.
#[inline]
pub fn xor_into(src: &[u8], src_off: usize, dst: &mut [u8], dst_off: usize, len: usize) {
    xor_into_with(&Kernels::detect(), src, src_off, dst, dst_off, len);
}

/// As [`xor_into`], with an explicit kernel.
#[inline]
pub fn xor_into_with<K: CtrKernel + ?Sized>(
    kernel: &K,
    src: &[u8],
    src_off: usize,
    dst: &mut [u8],
    dst_off: usize,
    len: usize,
) {
    debug_assert!(in_bounds(src_off, len, src.len()), "xor_into: source range out of bounds");
    debug_assert!(in_bounds(dst_off, len, dst.len()), "xor_into: destination range out of bounds");
    kernel.xor_into(&src[src_off..src_off + len], &mut dst[dst_off..dst_off + len]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_ones_into_ff() {
        let src = [0x01u8; 16];
        let mut dst = [0xFFu8; 16];
        xor_into(&src, 0, &mut dst, 0, 16);
        assert_eq!(dst, [0xFEu8; 16]);
    }

    #[test]
    fn test_equal_buffers_cancel() {
        let src = [0xAAu8; 16];
        let mut dst = [0xAAu8; 16];
        xor_into(&src, 0, &mut dst, 0, 16);
        assert_eq!(dst, [0u8; 16]);
    }

    #[test]
    fn test_self_inverse() {
        let key = (0..100).map(|i| (i as u8).wrapping_mul(3)).collect::<Vec<u8>>();
        let data = (0..100).map(|i| i as u8).collect::<Vec<u8>>();
        let mut buf = data.clone();
        xor_into(&key, 0, &mut buf, 0, 100);
        xor_into(&key, 0, &mut buf, 0, 100);
        assert_eq!(buf, data);
    }

    #[test]
    fn test_offsets_leave_surroundings_untouched() {
        let src = (0..64).map(|i| i as u8 | 0x80).collect::<Vec<u8>>();
        let mut dst = vec![0u8; 64];
        xor_into(&src, 5, &mut dst, 9, 27);
        assert!(dst[..9].iter().all(|&b| b == 0));
        assert_eq!(&dst[9..36], &src[5..32]);
        assert!(dst[36..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_zero_length_is_noop() {
        let src = [0xFFu8; 4];
        let mut dst = [0x11u8; 4];
        xor_into(&src, 4, &mut dst, 4, 0);
        assert_eq!(dst, [0x11u8; 4]);
    }
}
