//! Kernel selection.
//!
//! [`CtrKernel`] is the contract shared by the two variants, [`Portable`] and
//! [`Accelerated`]. [`Kernels`] holds a choice made once, from the capability
//! probe or from a [`KernelConfig`], and forwards every call to it.

use crate::block::{Block, BLOCK_LEN};
use crate::caps::{self, Capability};
use crate::config::{BackendPreference, ConfigError, KernelConfig};
use crate::portable;

/// The operations every kernel variant provides. Implementations must agree
/// byte for byte.
pub trait CtrKernel {
    /// The variant this kernel runs.
    fn capability(&self) -> Capability;

    /// `dst[i] ^= src[i]` for every `i < dst.len()`.
    /// Requires: `src.len() >= dst.len()`.
    fn xor_into(&self, src: &[u8], dst: &mut [u8]);

    /// Writes `blocks` GCM counters starting at `seed` into `dst`, counting on
    /// the last 32 bits without carry.
    /// Requires: `dst.len() >= blocks * 16`.
    fn count_be(&self, seed: &Block, dst: &mut [u8], blocks: usize);
}

/// Scalar kernels, available everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Portable;

impl CtrKernel for Portable {
    fn capability(&self) -> Capability {
        Capability::Portable
    }

    #[inline]
    fn xor_into(&self, src: &[u8], dst: &mut [u8]) {
        portable::xor_into(src, dst);
    }

    #[inline]
    fn count_be(&self, seed: &Block, dst: &mut [u8], blocks: usize) {
        portable::count_16_be_4(seed, dst, blocks);
    }
}

/// SSE kernels. Only constructible when the probe reports support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accelerated {
    _private: (),
}

impl Accelerated {
    /// Returns `None` if the accelerated path is not compiled in or the CPU
    /// lacks the required features.
    pub fn new() -> Option<Self> {
        if caps::accelerated() {
            Some(Self { _private: () })
        } else {
            None
        }
    }
}

impl CtrKernel for Accelerated {
    fn capability(&self) -> Capability {
        Capability::Accelerated
    }

    #[inline]
    fn xor_into(&self, src: &[u8], dst: &mut [u8]) {
        debug_assert!(src.len() >= dst.len());
        #[cfg(all(feature = "accelerate", target_arch = "x86_64"))]
        // SAFETY: `Accelerated` only exists after the probe confirmed SSE2 + SSSE3.
        unsafe {
            crate::x86_64::xor_into(src, dst);
        }
        #[cfg(not(all(feature = "accelerate", target_arch = "x86_64")))]
        portable::xor_into(src, dst);
    }

    #[inline]
    fn count_be(&self, seed: &Block, dst: &mut [u8], blocks: usize) {
        debug_assert!(dst.len() >= blocks * BLOCK_LEN);
        #[cfg(all(feature = "accelerate", target_arch = "x86_64"))]
        // SAFETY: as above.
        unsafe {
            crate::x86_64::count_16_be_4(seed, dst, blocks);
        }
        #[cfg(not(all(feature = "accelerate", target_arch = "x86_64")))]
        portable::count_16_be_4(seed, dst, blocks);
    }
}

/// A kernel variant chosen once and reused for every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernels {
    Portable(Portable),
    Accelerated(Accelerated),
}

impl Kernels {
    /// The best variant the probe allows.
    #[inline]
    pub fn detect() -> Self {
        match Accelerated::new() {
            Some(k) => Kernels::Accelerated(k),
            None => Kernels::Portable(Portable),
        }
    }

    pub fn portable() -> Self {
        Kernels::Portable(Portable)
    }

    /// Selects a variant according to `config`.
    ///
    /// Fails only when the accelerated variant is demanded but unavailable.
    pub fn from_config(config: &KernelConfig) -> Result<Self, ConfigError> {
        let kernels = match config.backend {
            BackendPreference::Auto => {
                let k = Self::detect();
                if cfg!(all(feature = "accelerate", target_arch = "x86_64"))
                    && k.capability() == Capability::Portable
                {
                    log::warn!("ctrmode: SSSE3 not available, falling back to generic kernels");
                }
                k
            }
            BackendPreference::Portable => Self::portable(),
            BackendPreference::Accelerated => Accelerated::new()
                .map(Kernels::Accelerated)
                .ok_or(ConfigError::AccelerationUnavailable)?,
        };
        log::info!("ctrmode: using {} kernels", kernels.capability());
        Ok(kernels)
    }
}

impl Default for Kernels {
    fn default() -> Self {
        Self::detect()
    }
}

impl CtrKernel for Kernels {
    #[inline]
    fn capability(&self) -> Capability {
        match self {
            Kernels::Portable(k) => k.capability(),
            Kernels::Accelerated(k) => k.capability(),
        }
    }

    #[inline]
    fn xor_into(&self, src: &[u8], dst: &mut [u8]) {
        match self {
            Kernels::Portable(k) => k.xor_into(src, dst),
            Kernels::Accelerated(k) => k.xor_into(src, dst),
        }
    }

    #[inline]
    fn count_be(&self, seed: &Block, dst: &mut [u8], blocks: usize) {
        match self {
            Kernels::Portable(k) => k.count_be(seed, dst, blocks),
            Kernels::Accelerated(k) => k.count_be(seed, dst, blocks),
        }
    }
}
