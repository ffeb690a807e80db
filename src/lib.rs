//! Counter-mode cipher kernels.
//!
//! Two primitives for CTR/GCM: [`xor_into`] accumulates a keystream into a
//! buffer in place, and [`count_be`] lays out successive big-endian counter
//! blocks whose low 32-bit lane wraps without carrying. Each has an SSE kernel
//! (feature `accelerate`, x86_64) and a portable kernel with the same output;
//! [`capability_probe`] tells which one is live.
//!
//! The [`ffi`] module exposes the same operations over a pointer + offset C ABI.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
extern crate alloc;

#[cfg(all(not(feature = "std"), not(test)))]
use core::panic::PanicInfo;

#[cfg(all(not(feature = "std"), not(test)))]
#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    loop {}
}

pub mod block;
pub mod caps;
pub mod config;
pub mod counter;
pub mod dispatch;
pub mod ffi;
pub mod mode;
pub mod portable;
pub mod xor;

#[cfg(all(feature = "accelerate", target_arch = "x86_64"))]
pub mod x86_64;

pub use block::{Block, Counter, BLOCK_LEN};
pub use caps::Capability;
pub use config::{BackendPreference, ConfigError, KernelConfig};
pub use counter::{count_16_be, count_8_be, count_be};
pub use dispatch::{CtrKernel, Kernels};
pub use mode::{apply_keystream, BlockEncrypt};
pub use xor::xor_into;

/// Whether the accelerated kernels are compiled in and usable here.
#[inline]
pub fn capability_probe() -> bool {
    caps::accelerated()
}
