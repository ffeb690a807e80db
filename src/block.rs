//! Block and counter value types.
//!
//! A [`Block`] is the 16-byte operand of the counter kernels. A [`Counter`] views
//! a block as four big-endian 32-bit lanes where only the last lane counts.

use core::fmt;

/// Size in bytes of a cipher block.
pub const BLOCK_LEN: usize = 16;

/// Size in bytes of the counting lane at the end of a block.
pub const LANE_LEN: usize = 4;

/// A 16-byte cipher block.
pub type Block = [u8; BLOCK_LEN];

/// A GCM-style counter: 96 fixed bits followed by a 32-bit big-endian count.
///
/// Incrementing wraps the low lane modulo 2^32 and never carries into the
/// upper 96 bits.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct Counter(pub Block);

impl Counter {
    /// Builds a counter from a 12-byte nonce and an initial low lane.
    #[inline]
    pub fn from_parts(upper: &[u8; BLOCK_LEN - LANE_LEN], low: u32) -> Self {
        let mut block = [0u8; BLOCK_LEN];
        block[..BLOCK_LEN - LANE_LEN].copy_from_slice(upper);
        block[BLOCK_LEN - LANE_LEN..].copy_from_slice(&low.to_be_bytes());
        Counter(block)
    }

    /// The fixed upper 96 bits.
    #[inline]
    pub fn upper(&self) -> &[u8] {
        &self.0[..BLOCK_LEN - LANE_LEN]
    }

    /// The low lane as a native integer.
    #[inline]
    pub fn low(&self) -> u32 {
        let mut lane = [0u8; LANE_LEN];
        lane.copy_from_slice(&self.0[BLOCK_LEN - LANE_LEN..]);
        u32::from_be_bytes(lane)
    }

    /// Returns a copy with the low lane replaced.
    #[inline]
    pub fn with_low(mut self, low: u32) -> Self {
        self.0[BLOCK_LEN - LANE_LEN..].copy_from_slice(&low.to_be_bytes());
        self
    }

    /// Advances the low lane by `n`, wrapping at 2^32.
    #[inline]
    pub fn wrapping_add_low(self, n: u32) -> Self {
        let low = self.low().wrapping_add(n);
        self.with_low(low)
    }

    #[inline]
    pub fn as_block(&self) -> &Block {
        &self.0
    }
}

impl From<Block> for Counter {
    #[inline(always)]
    fn from(block: Block) -> Self {
        Counter(block)
    }
}

impl From<Counter> for Block {
    #[inline(always)]
    fn from(ctr: Counter) -> Block {
        ctr.0
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Counter(")?;
        for b in self.upper() {
            write!(f, "{:02x}", b)?;
        }
        write!(f, "|{:08x})", self.low())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_split() {
        let ctr = Counter::from_parts(&[0x11; 12], 0xDEAD_BEEF);
        assert_eq!(ctr.upper(), &[0x11; 12]);
        assert_eq!(ctr.low(), 0xDEAD_BEEF);
        assert_eq!(&ctr.0[12..], &[0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_low_lane_wraps_without_carry() {
        let ctr = Counter::from_parts(&[0xFF; 12], u32::MAX).wrapping_add_low(1);
        assert_eq!(ctr.low(), 0);
        assert_eq!(ctr.upper(), &[0xFF; 12]);
    }

    #[test]
    fn test_debug_format() {
        let ctr = Counter::from_parts(&[0u8; 12], 1);
        assert_eq!(
            alloc::format!("{:?}", ctr),
            "Counter(000000000000000000000000|00000001)"
        );
    }

    struct FixedBuf {
        bytes: [u8; 64],
        len: usize,
    }

    impl fmt::Write for FixedBuf {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let end = self.len + s.len();
            if end > self.bytes.len() {
                return Err(fmt::Error);
            }
            self.bytes[self.len..end].copy_from_slice(s.as_bytes());
            self.len = end;
            Ok(())
        }
    }

    #[test]
    fn test_debug_writes_without_allocating() {
        use core::fmt::Write;
        let ctr = Counter::from_parts(&[0xAB; 12], 0x0102_0304);
        let mut buf = FixedBuf { bytes: [0u8; 64], len: 0 };
        write!(buf, "{:?}", ctr).unwrap();
        assert_eq!(
            &buf.bytes[..buf.len],
            b"Counter(abababababababababababab|01020304)"
        );
    }
}
