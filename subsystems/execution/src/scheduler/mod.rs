//! # Scheduler Framework
//!
//! This module defines the scheduler FRAMEWORK, not a specific policy.
//! Actual policies are provided as modules and plugged into a
//! [`SchedulerFramework`] once, before the simulation loop starts.

pub mod traits;
pub mod queue;
pub mod priority;
pub mod metrics;

use crate::{BurstOracle, Pid, ProcessDescriptor, Tick};
use alloc::boxed::Box;

pub use traits::*;
pub use priority::*;
pub use queue::{FeedbackQueues, QueueEntry};

/// Scheduler framework
///
/// Holds the policy chosen for one simulation run together with its
/// metrics, and provides the per-tick entry point the harness calls.
/// Independent runs use independent frameworks.
pub struct SchedulerFramework {
    /// Policy for this run
    policy: Box<dyn SchedulingPolicy>,
    /// Scheduler metrics
    metrics: metrics::SchedulerMetrics,
}

impl SchedulerFramework {
    /// Create a framework around a policy
    pub fn new(policy: Box<dyn SchedulingPolicy>) -> Self {
        log::info!("Setting scheduling policy: {}", policy.name());
        Self {
            policy,
            metrics: metrics::SchedulerMetrics::new(),
        }
    }

    /// Get the active policy name
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Ask the policy which process runs this tick
    ///
    /// An empty snapshot selects nothing without consulting the policy.
    pub fn decide(
        &mut self,
        snapshot: &[ProcessDescriptor],
        now: Tick,
        current: Option<Pid>,
        oracle: &dyn BurstOracle,
    ) -> Option<Pid> {
        self.metrics.record_tick();

        if snapshot.is_empty() {
            self.metrics.record_idle();
            return None;
        }

        let tick = TickContext::new(snapshot, now, current, oracle);
        let selected = self.policy.decide(&tick);
        log::trace!("t={} current={:?} -> {:?}", now, current, selected);

        match (current, selected) {
            (_, None) => self.metrics.record_idle(),
            (Some(running), Some(next)) if running != next => {
                self.metrics.record_context_switch();
                if tick.is_active(running) {
                    self.metrics.record_preemption();
                }
            }
            (None, Some(_)) => self.metrics.record_context_switch(),
            _ => {}
        }

        selected
    }

    /// Reset the policy and metrics for a new run
    pub fn reset(&mut self) {
        log::info!("Resetting scheduling policy: {}", self.policy.name());
        self.policy.reset();
        self.metrics.reset();
    }

    /// Get policy statistics
    pub fn stats(&self) -> PolicyStats {
        self.policy.stats()
    }

    /// Get scheduler metrics
    pub fn metrics(&self) -> &metrics::SchedulerMetrics {
        &self.metrics
    }
}

impl core::fmt::Debug for SchedulerFramework {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SchedulerFramework")
            .field("policy", &self.policy.name())
            .field("metrics", &self.metrics)
            .finish()
    }
}
