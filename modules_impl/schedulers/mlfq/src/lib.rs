//! # MLFQ Scheduler Module
//!
//! Three-level multi-level feedback queue policy for simsched.
//!
//! ## Features
//! - New processes start at the top level
//! - Every tick of CPU use costs one level
//! - Periodic priority boost against starvation
//! - Processes blocked on I/O keep their place but are never selected
//!
//! ## Configuration
//!
//! | Key                   | Values              | Default  |
//! |-----------------------|---------------------|----------|
//! | `mlfq.boost_interval` | ticks, non-zero     | `1000`   |
//! | `mlfq.requeue`        | `always` \| `alive` | `alive`  |

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

mod config;
mod scheduler;

pub use config::{MlfqConfig, RequeuePolicy};
pub use scheduler::MlfqScheduler;

use alloc::boxed::Box;
use simsched_execution::scheduler::SchedulingPolicy;
use simsched_modules::{ConfigResult, Context, PolicyFlags, PolicyInfo, PolicyModule};

// =============================================================================
// Module Definition
// =============================================================================

/// MLFQ policy module
#[derive(Debug, Default)]
pub struct MlfqModule {
    /// Base configuration; context keys override it field by field
    config: MlfqConfig,
}

impl MlfqModule {
    /// Create a new module instance with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: MlfqConfig) -> Self {
        Self { config }
    }
}

impl PolicyModule for MlfqModule {
    fn info(&self) -> PolicyInfo {
        PolicyInfo::new("mlfq")
            .version(1, 0, 0)
            .description("Three-level feedback queue with periodic boost")
            .flags(
                PolicyFlags::PREEMPTIVE
                    .union(PolicyFlags::STATEFUL)
                    .union(PolicyFlags::IO_AWARE),
            )
    }

    fn build(&self, ctx: &Context) -> ConfigResult<Box<dyn SchedulingPolicy>> {
        let config = self.config.clone().apply(ctx)?;

        log::info!(
            "[mlfq] Building policy, boost every {} ticks, requeue: {}",
            config.boost_interval(),
            config.requeue.as_str()
        );
        Ok(Box::new(MlfqScheduler::new(config)))
    }
}

/// Create a new instance of this module
pub fn create_module() -> MlfqModule {
    MlfqModule::new()
}

/// Create module with custom config
pub fn create_module_with_config(config: MlfqConfig) -> MlfqModule {
    MlfqModule::with_config(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use simsched_execution::process::NoOracle;
    use simsched_execution::scheduler::TickContext;
    use simsched_execution::{Pid, ProcessDescriptor};
    use simsched_modules::ConfigError;

    #[test]
    fn test_module_builds_named_policy() {
        let policy = create_module().build(&Context::new()).expect("default config");
        assert_eq!(policy.name(), "mlfq");
    }

    #[test]
    fn test_context_overrides_base_config() {
        let module = create_module_with_config(MlfqConfig::parity());
        let ctx = Context::new().with("mlfq.boost_interval", "0");

        let result = module.build(&ctx).map(|p| p.name());
        assert_eq!(result, Err(ConfigError::invalid("mlfq.boost_interval", "0")));
    }

    #[test]
    fn test_base_config_cannot_carry_zero_interval() {
        assert_eq!(
            MlfqConfig::new().with_boost_interval(0),
            Err(ConfigError::invalid("mlfq.boost_interval", "0"))
        );

        let base = MlfqConfig::new().with_boost_interval(3).expect("non-zero");
        let mut policy = create_module_with_config(base)
            .build(&Context::new())
            .expect("valid base config");

        let procs = [ProcessDescriptor::new(Pid::from_raw(1))];
        let mut current = None;
        for now in 0..10 {
            current = policy.decide(&TickContext::new(&procs, now, current, &NoOracle));
            assert_eq!(current, Some(Pid::from_raw(1)));
        }
    }

    #[test]
    fn test_module_flags() {
        let info = create_module().info();
        assert!(info.is_preemptive());
        assert!(info.flags.contains(PolicyFlags::STATEFUL | PolicyFlags::IO_AWARE));
        assert!(!info.flags.contains(PolicyFlags::USES_ORACLE));
    }
}
