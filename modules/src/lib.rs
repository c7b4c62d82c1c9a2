//! # simsched Module System
//!
//! Every scheduling policy ships as a module. The module system provides:
//!
//! - Policy metadata (name, version, behavioural flags)
//! - A key/value configuration context read once at build time
//! - A registry that turns a policy name into a ready policy instance
//!
//! ## Module Lifecycle
//!
//! 1. Registration (metadata + factory)
//! 2. Selection by name, before the simulation loop starts
//! 3. Build from configuration
//! 4. One decision per tick for the length of the run

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

pub mod interface;
pub mod registry;

pub use interface::{Context, PolicyInfo, PolicyModule};
pub use registry::PolicyRegistry;

use alloc::string::String;
use bitflags::bitflags;

/// Module version (semantic versioning)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PolicyVersion {
    /// Major version
    pub major: u16,
    /// Minor version
    pub minor: u16,
    /// Patch version
    pub patch: u16,
}

impl PolicyVersion {
    /// Create a new version
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self { major, minor, patch }
    }
}

impl core::fmt::Display for PolicyVersion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

bitflags! {
    /// Policy behaviour flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PolicyFlags: u32 {
        /// May switch away from a running process that has not finished
        const PREEMPTIVE = 1 << 0;
        /// Carries state between ticks
        const STATEFUL = 1 << 1;
        /// Never selects a process that is performing I/O
        const IO_AWARE = 1 << 2;
        /// Consults the burst oracle
        const USES_ORACLE = 1 << 3;
    }
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
///
/// All of these surface at setup time, before the first tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No policy registered under this name
    UnknownPolicy(String),
    /// A policy with this name is already registered
    AlreadyRegistered(String),
    /// A configuration value could not be parsed or is out of range
    InvalidValue {
        /// Configuration key
        key: String,
        /// Offending value
        value: String,
    },
}

impl ConfigError {
    /// Build an `InvalidValue` error
    pub fn invalid(key: &str, value: &str) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownPolicy(name) => write!(f, "invalid scheduler name: '{}'", name),
            Self::AlreadyRegistered(name) => write!(f, "scheduler '{}' is already registered", name),
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value '{}' for configuration key '{}'", value, key)
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_version_display() {
        assert_eq!(PolicyVersion::new(1, 2, 0).to_string(), "1.2.0");
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::UnknownPolicy("lottery".into());
        assert_eq!(err.to_string(), "invalid scheduler name: 'lottery'");

        let err = ConfigError::invalid("rr.cursor", "sideways");
        assert_eq!(
            err.to_string(),
            "invalid value 'sideways' for configuration key 'rr.cursor'"
        );
    }
}
