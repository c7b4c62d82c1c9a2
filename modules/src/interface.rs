//! # Policy Module Interface
//!
//! What a policy module exposes to the registry: its metadata and a
//! factory that builds a fresh policy instance from configuration.

use crate::{ConfigError, ConfigResult, PolicyFlags, PolicyVersion};
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use simsched_execution::scheduler::SchedulingPolicy;

// =============================================================================
// Policy Metadata
// =============================================================================

/// Policy metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyInfo {
    /// Policy name (the string operators select it by)
    pub name: &'static str,
    /// Version
    pub version: PolicyVersion,
    /// Description
    pub description: &'static str,
    /// Behaviour flags
    pub flags: PolicyFlags,
}

impl PolicyInfo {
    /// Create new policy info with builder pattern
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            version: PolicyVersion::new(0, 1, 0),
            description: "",
            flags: PolicyFlags::empty(),
        }
    }

    /// Set version
    pub const fn version(mut self, major: u16, minor: u16, patch: u16) -> Self {
        self.version = PolicyVersion::new(major, minor, patch);
        self
    }

    /// Set description
    pub const fn description(mut self, desc: &'static str) -> Self {
        self.description = desc;
        self
    }

    /// Set flags
    pub const fn flags(mut self, flags: PolicyFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Check if the policy may preempt a running process
    pub fn is_preemptive(&self) -> bool {
        self.flags.contains(PolicyFlags::PREEMPTIVE)
    }
}

// =============================================================================
// Configuration Context
// =============================================================================

/// Configuration handed to a module when it builds a policy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    config: BTreeMap<String, String>,
}

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configuration value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a configuration value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.config.insert(key.into(), value.into());
    }

    /// Get a configuration value
    pub fn config(&self, key: &str) -> Option<&str> {
        self.config.get(key).map(String::as_str)
    }

    /// Get a configuration value as a number
    ///
    /// A present but unparsable value is an error, not a silent default.
    pub fn config_u64(&self, key: &str) -> ConfigResult<Option<u64>> {
        self.config_parse(key)
    }

    /// Parse a configuration value with `FromStr`
    pub fn config_parse<T>(&self, key: &str) -> ConfigResult<Option<T>>
    where
        T: core::str::FromStr,
    {
        self.config(key)
            .map(|raw| raw.trim().parse().map_err(|_| ConfigError::invalid(key, raw)))
            .transpose()
    }
}

// =============================================================================
// Policy Module Trait
// =============================================================================

/// The policy module trait
///
/// A module is a stateless factory. Every call to [`PolicyModule::build`]
/// returns a policy with fresh state, so each simulation run gets its own.
pub trait PolicyModule: Send + Sync {
    /// Get policy metadata
    fn info(&self) -> PolicyInfo;

    /// Build a policy instance from configuration
    fn build(&self, ctx: &Context) -> ConfigResult<Box<dyn SchedulingPolicy>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_info_builder() {
        let info = PolicyInfo::new("lottery")
            .version(2, 1, 0)
            .description("A test policy")
            .flags(PolicyFlags::PREEMPTIVE | PolicyFlags::STATEFUL);

        assert_eq!(info.name, "lottery");
        assert_eq!(info.version, PolicyVersion::new(2, 1, 0));
        assert_eq!(info.description, "A test policy");
        assert!(info.is_preemptive());
        assert!(!info.flags.contains(PolicyFlags::IO_AWARE));
    }

    #[test]
    fn test_policy_info_defaults() {
        let info = PolicyInfo::new("simple");

        assert_eq!(info.version, PolicyVersion::new(0, 1, 0));
        assert!(info.flags.is_empty());
        assert!(!info.is_preemptive());
    }

    #[test]
    fn test_context_lookup() {
        let ctx = Context::new()
            .with("mlfq.boost_interval", "500")
            .with("rr.cursor", "identity");

        assert_eq!(ctx.config("rr.cursor"), Some("identity"));
        assert_eq!(ctx.config("missing"), None);
        assert_eq!(ctx.config_u64("mlfq.boost_interval"), Ok(Some(500)));
        assert_eq!(ctx.config_u64("missing"), Ok(None));
    }

    #[test]
    fn test_context_rejects_garbage_numbers() {
        let ctx = Context::new().with("mlfq.boost_interval", "soon");

        assert_eq!(
            ctx.config_u64("mlfq.boost_interval"),
            Err(ConfigError::invalid("mlfq.boost_interval", "soon"))
        );
    }
}
