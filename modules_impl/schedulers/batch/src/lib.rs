//! # Batch Scheduling Policies
//!
//! The classic run-to-completion family:
//!
//! - **FIFO**: first arrival runs first
//! - **SJF**: shortest total burst runs first, never preempted
//! - **STCF**: shortest remaining time runs, preempting every tick
//!
//! FIFO is stateless. SJF and STCF consult the burst oracle.

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

mod fifo;
mod sjf;
mod stcf;

pub use fifo::FifoScheduler;
pub use sjf::SjfScheduler;
pub use stcf::StcfScheduler;

use alloc::boxed::Box;
use simsched_execution::scheduler::SchedulingPolicy;
use simsched_modules::{ConfigResult, Context, PolicyFlags, PolicyInfo, PolicyModule};

// =============================================================================
// Module Definitions
// =============================================================================

/// FIFO policy module
#[derive(Debug, Default)]
pub struct FifoModule;

impl PolicyModule for FifoModule {
    fn info(&self) -> PolicyInfo {
        PolicyInfo::new("fifo")
            .version(1, 0, 0)
            .description("First-in-first-out: the earliest arrival runs")
    }

    fn build(&self, _ctx: &Context) -> ConfigResult<Box<dyn SchedulingPolicy>> {
        log::info!("[fifo] Building policy");
        Ok(Box::new(FifoScheduler::new()))
    }
}

/// SJF policy module
#[derive(Debug, Default)]
pub struct SjfModule;

impl PolicyModule for SjfModule {
    fn info(&self) -> PolicyInfo {
        PolicyInfo::new("sjf")
            .version(1, 0, 0)
            .description("Shortest job first, non-preemptive")
            .flags(PolicyFlags::USES_ORACLE)
    }

    fn build(&self, _ctx: &Context) -> ConfigResult<Box<dyn SchedulingPolicy>> {
        log::info!("[sjf] Building policy");
        Ok(Box::new(SjfScheduler::new()))
    }
}

/// STCF policy module
#[derive(Debug, Default)]
pub struct StcfModule;

impl PolicyModule for StcfModule {
    fn info(&self) -> PolicyInfo {
        PolicyInfo::new("stcf")
            .version(1, 0, 0)
            .description("Shortest time-to-completion first, preemptive")
            .flags(PolicyFlags::PREEMPTIVE.union(PolicyFlags::USES_ORACLE))
    }

    fn build(&self, _ctx: &Context) -> ConfigResult<Box<dyn SchedulingPolicy>> {
        log::info!("[stcf] Building policy");
        Ok(Box::new(StcfScheduler::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_names_match_policies() {
        let ctx = Context::new();
        let modules: [&dyn PolicyModule; 3] = [&FifoModule, &SjfModule, &StcfModule];

        for module in modules {
            let policy = module.build(&ctx).expect("batch policies take no config");
            assert_eq!(policy.name(), module.info().name);
        }
    }

    #[test]
    fn test_only_stcf_preempts() {
        assert!(!FifoModule.info().is_preemptive());
        assert!(!SjfModule.info().is_preemptive());
        assert!(StcfModule.info().is_preemptive());
    }
}
