//! # Round-Robin Scheduler Module
//!
//! A simple, fair round-robin policy for simsched.
//!
//! ## Features
//! - One-tick time slice
//! - Cursor that survives idle ticks
//! - Positional or identity-based rotation
//!
//! ## Usage
//!
//! The module is registered under `rr` and builds a fresh
//! [`RoundRobinScheduler`] for every simulation run.

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

mod config;
mod scheduler;

pub use config::{CursorMode, RoundRobinConfig};
pub use scheduler::RoundRobinScheduler;

use alloc::boxed::Box;
use simsched_execution::scheduler::SchedulingPolicy;
use simsched_modules::{ConfigResult, Context, PolicyFlags, PolicyInfo, PolicyModule};

// =============================================================================
// Module Definition
// =============================================================================

/// Round-Robin policy module
#[derive(Debug, Default)]
pub struct RoundRobinModule {
    /// Configuration used when the context carries no overrides
    config: Option<RoundRobinConfig>,
}

impl RoundRobinModule {
    /// Create a new module instance with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    ///
    /// Context keys still take precedence at build time.
    pub fn with_config(config: RoundRobinConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

impl PolicyModule for RoundRobinModule {
    fn info(&self) -> PolicyInfo {
        PolicyInfo::new("rr")
            .version(1, 0, 0)
            .description("Round-robin with a one-tick time slice")
            .flags(PolicyFlags::PREEMPTIVE.union(PolicyFlags::STATEFUL))
    }

    fn build(&self, ctx: &Context) -> ConfigResult<Box<dyn SchedulingPolicy>> {
        let config = match (&self.config, ctx.config(RoundRobinConfig::CURSOR_KEY)) {
            (Some(config), None) => config.clone(),
            _ => RoundRobinConfig::from_context(ctx)?,
        };

        log::info!("[round-robin] Building policy, cursor: {}", config.cursor.as_str());
        Ok(Box::new(RoundRobinScheduler::new(config)))
    }
}

/// Create a new instance of this module
pub fn create_module() -> RoundRobinModule {
    RoundRobinModule::new()
}

/// Create module with custom config
pub fn create_module_with_config(config: RoundRobinConfig) -> RoundRobinModule {
    RoundRobinModule::with_config(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use simsched_modules::ConfigError;

    #[test]
    fn test_module_builds_named_policy() {
        let policy = create_module().build(&Context::new()).expect("default config");
        assert_eq!(policy.name(), "rr");
    }

    #[test]
    fn test_bad_cursor_is_config_error() {
        let ctx = Context::new().with("rr.cursor", "backwards");
        let result = create_module().build(&ctx).map(|p| p.name());
        assert_eq!(result, Err(ConfigError::invalid("rr.cursor", "backwards")));
    }

    #[test]
    fn test_module_flags() {
        let info = create_module_with_config(RoundRobinConfig::identity()).info();
        assert!(info.is_preemptive());
        assert!(info.flags.contains(PolicyFlags::STATEFUL));
    }
}
