//! Runtime configuration.
//!
//! Lets the embedding application pin a kernel variant instead of trusting
//! the capability probe, e.g. to force the portable path while debugging.

use core::fmt;
use core::str::FromStr;

/// Environment variable read by [`KernelConfig::from_env`].
pub const BACKEND_ENV: &str = "CTRMODE_BACKEND";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The backend name is not one of `auto`, `portable`/`generic`, `accelerated`/`sse`.
    UnknownBackend,
    /// The accelerated backend was demanded but is not compiled in or not supported.
    AccelerationUnavailable,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownBackend => write!(f, "Unknown kernel backend"),
            ConfigError::AccelerationUnavailable => {
                write!(f, "Accelerated kernels not available on this build or CPU")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Which kernel variant to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendPreference {
    /// Accelerated if the probe allows, portable otherwise.
    #[default]
    Auto,
    Portable,
    /// Accelerated or fail.
    Accelerated,
}

impl FromStr for BackendPreference {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            Ok(BackendPreference::Auto)
        } else if s.eq_ignore_ascii_case("portable") || s.eq_ignore_ascii_case("generic") {
            Ok(BackendPreference::Portable)
        } else if s.eq_ignore_ascii_case("accelerated") || s.eq_ignore_ascii_case("sse") {
            Ok(BackendPreference::Accelerated)
        } else {
            Err(ConfigError::UnknownBackend)
        }
    }
}

/// Kernel configuration, populated by the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KernelConfig {
    pub backend: BackendPreference,
}

impl KernelConfig {
    /// Reads [`BACKEND_ENV`]. Unset means the default configuration.
    #[cfg(feature = "std")]
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(BACKEND_ENV) {
            Ok(value) => Ok(Self {
                backend: value.parse()?,
            }),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::UnknownBackend),
        }
    }
}


#[cfg(all(test, feature = "std"))]
mod env_tests {
    use super::*;
    use crate::caps::Capability;
    use crate::dispatch::{CtrKernel, Kernels};

    // One test owns the variable so parallel tests never observe a half-set state.
    #[test]
    fn test_from_env() {
        std::env::remove_var(BACKEND_ENV);
        assert_eq!(KernelConfig::from_env(), Ok(KernelConfig::default()));

        std::env::set_var(BACKEND_ENV, "generic");
        let config = KernelConfig::from_env().unwrap();
        assert_eq!(config.backend, BackendPreference::Portable);
        let kernels = Kernels::from_config(&config).unwrap();
        assert_eq!(kernels.capability(), Capability::Portable);

        std::env::set_var(BACKEND_ENV, "Auto");
        let kernels = Kernels::from_config(&KernelConfig::from_env().unwrap()).unwrap();
        assert_eq!(kernels, Kernels::detect());

        std::env::set_var(BACKEND_ENV, "neon");
        assert_eq!(KernelConfig::from_env(), Err(ConfigError::UnknownBackend));

        #[cfg(unix)]
        {
            use std::ffi::OsStr;
            use std::os::unix::ffi::OsStrExt;
            std::env::set_var(BACKEND_ENV, OsStr::from_bytes(b"sse\xff"));
            assert_eq!(KernelConfig::from_env(), Err(ConfigError::UnknownBackend));
        }

        std::env::remove_var(BACKEND_ENV);
    }
}
