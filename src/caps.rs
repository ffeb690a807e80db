//! Capability probe for the accelerated kernels.
//!
//! The accelerated path exists only when the `accelerate` feature is enabled on
//! `x86_64` and the CPU provides SSE2 and SSSE3. If the build already targets
//! those features the answer is a compile-time constant; otherwise, with `std`,
//! it is detected once at runtime and cached.

use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

/// Which kernel variant a probe selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// SSE2/SSSE3 kernels.
    Accelerated,
    /// Portable scalar kernels.
    Portable,
}

impl Capability {
    /// Probes the current process. Cached after the first call.
    #[inline]
    pub fn detect() -> Self {
        if accelerated() {
            Capability::Accelerated
        } else {
            Capability::Portable
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Capability::Accelerated => "sse",
            Capability::Portable => "generic",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const UNKNOWN: u8 = 0;
const PORTABLE: u8 = 1;
const ACCELERATED: u8 = 2;

static STATE: AtomicU8 = AtomicU8::new(UNKNOWN);

/// Returns `true` when the accelerated kernels are compiled in and usable.
///
/// The value never changes within a process.
#[inline]
pub fn accelerated() -> bool {
    match STATE.load(Ordering::Relaxed) {
        ACCELERATED => true,
        PORTABLE => false,
        _ => probe(),
    }
}

#[cold]
fn probe() -> bool {
    let found = detect();
    // Racing first callers store the same value.
    STATE.store(if found { ACCELERATED } else { PORTABLE }, Ordering::Relaxed);
    log::debug!(
        "ctrmode capability probe: {}",
        if found { Capability::Accelerated } else { Capability::Portable }
    );
    found
}

#[cfg(all(feature = "accelerate", target_arch = "x86_64"))]
fn detect() -> bool {
    if cfg!(all(target_feature = "sse2", target_feature = "ssse3")) {
        return true;
    }
    runtime_detect()
}

#[cfg(not(all(feature = "accelerate", target_arch = "x86_64")))]
fn detect() -> bool {
    false
}

#[cfg(all(feature = "accelerate", target_arch = "x86_64", feature = "std"))]
fn runtime_detect() -> bool {
    std::is_x86_feature_detected!("sse2") && std::is_x86_feature_detected!("ssse3")
}

// CPUID needs the std detection macros; without them only static target
// features count.
#[cfg(all(feature = "accelerate", target_arch = "x86_64", not(feature = "std")))]
fn runtime_detect() -> bool {
    false
}
