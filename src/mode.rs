//! Counter-mode driver.
//!
//! Glues the kernels to an external block cipher: counters are generated into
//! a stack scratch buffer, encrypted in place by the cipher, and XORed into the
//! data. The scratch is wiped before returning.

use zeroize::Zeroizing;

use crate::block::{Counter, BLOCK_LEN};
use crate::dispatch::CtrKernel;

/// Blocks of keystream produced per batch.
pub const BATCH_BLOCKS: usize = 8;

/// A block cipher's forward direction, supplied by the caller.
pub trait BlockEncrypt {
    /// Encrypts each 16-byte block of `blocks` in place.
    /// `blocks.len()` is always a multiple of 16.
    fn encrypt_blocks(&self, blocks: &mut [u8]);
}

/// Encrypts or decrypts `data` in place in GCM counter mode starting at `ctr`.
///
/// Returns the counter following the last one consumed; a trailing partial
/// block still consumes a whole counter.
pub fn apply_keystream<K, C>(kernel: &K, cipher: &C, ctr: Counter, data: &mut [u8]) -> Counter
where
    K: CtrKernel + ?Sized,
    C: BlockEncrypt + ?Sized,
{
    let mut scratch = Zeroizing::new([0u8; BATCH_BLOCKS * BLOCK_LEN]);
    let mut ctr = ctr;

    for chunk in data.chunks_mut(BATCH_BLOCKS * BLOCK_LEN) {
        let blocks = chunk.len().div_ceil(BLOCK_LEN);
        let keystream = &mut scratch[..blocks * BLOCK_LEN];
        kernel.count_be(ctr.as_block(), keystream, blocks);
        cipher.encrypt_blocks(keystream);
        kernel.xor_into(keystream, chunk);
        ctr = ctr.wrapping_add_low(blocks as u32);
    }

    ctr
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Kernels;
    use alloc::vec::Vec;

    /// Toy cipher: XOR every byte with a constant. Enough to check plumbing.
    struct XorCipher(u8);

    impl BlockEncrypt for XorCipher {
        fn encrypt_blocks(&self, blocks: &mut [u8]) {
            assert_eq!(blocks.len() % BLOCK_LEN, 0);
            for b in blocks.iter_mut() {
                *b ^= self.0;
            }
        }
    }

    #[test]
    fn test_roundtrip_and_next_counter() {
        let kernels = Kernels::detect();
        let cipher = XorCipher(0x3C);
        let start = Counter::from_parts(&[7u8; 12], u32::MAX - 2);
        let data = (0..300).map(|i| i as u8).collect::<Vec<u8>>();

        let mut buf = data.clone();
        let next = apply_keystream(&kernels, &cipher, start, &mut buf);
        assert_ne!(buf, data);
        // 300 bytes = 18 full blocks + 1 partial.
        assert_eq!(next, start.wrapping_add_low(19));
        assert_eq!(next.upper(), start.upper());

        let back = apply_keystream(&kernels, &cipher, start, &mut buf);
        assert_eq!(back, next);
        assert_eq!(buf, data);
    }

    #[test]
    fn test_keystream_is_encrypted_counters() {
        let cipher = XorCipher(0xFF);
        let start = Counter::from_parts(&[0u8; 12], 5);
        let mut buf = [0u8; 32];
        apply_keystream(&Kernels::portable(), &cipher, start, &mut buf);

        let mut expected = [0u8; 32];
        expected[..16].copy_from_slice(start.as_block());
        expected[16..].copy_from_slice(start.wrapping_add_low(1).as_block());
        for b in expected.iter_mut() {
            *b ^= 0xFF;
        }
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_empty_data_keeps_counter() {
        let start = Counter::from_parts(&[1u8; 12], 9);
        let next = apply_keystream(&Kernels::detect(), &XorCipher(1), start, &mut []);
        assert_eq!(next, start);
    }
}
