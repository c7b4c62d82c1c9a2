//! # Scheduler Metrics
//!
//! Decision counters for one simulation run.

use core::sync::atomic::{AtomicU64, Ordering};

/// Scheduler metrics
#[derive(Debug)]
pub struct SchedulerMetrics {
    /// Total decisions requested
    ticks: AtomicU64,
    /// Decisions that named no process
    idle_ticks: AtomicU64,
    /// Decisions that named a process other than the running one
    context_switches: AtomicU64,
    /// Switches away from a running process that was still active
    preemptions: AtomicU64,
}

impl SchedulerMetrics {
    /// Create new metrics
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU64::new(0),
            idle_ticks: AtomicU64::new(0),
            context_switches: AtomicU64::new(0),
            preemptions: AtomicU64::new(0),
        }
    }

    /// Record a decision
    pub fn record_tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a decision that selected nothing
    pub fn record_idle(&self) {
        self.idle_ticks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a context switch
    pub fn record_context_switch(&self) {
        self.context_switches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a preemption
    pub fn record_preemption(&self) {
        self.preemptions.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total ticks
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Get idle ticks
    pub fn idle_ticks(&self) -> u64 {
        self.idle_ticks.load(Ordering::Relaxed)
    }

    /// Get total context switches
    pub fn context_switches(&self) -> u64 {
        self.context_switches.load(Ordering::Relaxed)
    }

    /// Get preemptions
    pub fn preemptions(&self) -> u64 {
        self.preemptions.load(Ordering::Relaxed)
    }

    /// Get CPU utilization (percentage of ticks with a process selected)
    pub fn cpu_utilization(&self) -> u8 {
        let total = self.ticks();
        let idle = self.idle_ticks();

        if total == 0 {
            0
        } else {
            (((total - idle) * 100) / total) as u8
        }
    }

    /// Reset all metrics
    pub fn reset(&self) {
        self.ticks.store(0, Ordering::Relaxed);
        self.idle_ticks.store(0, Ordering::Relaxed);
        self.context_switches.store(0, Ordering::Relaxed);
        self.preemptions.store(0, Ordering::Relaxed);
    }
}

impl Default for SchedulerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utilization() {
        let metrics = SchedulerMetrics::new();
        assert_eq!(metrics.cpu_utilization(), 0);

        for _ in 0..4 {
            metrics.record_tick();
        }
        metrics.record_idle();

        assert_eq!(metrics.cpu_utilization(), 75);
    }

    #[test]
    fn test_reset() {
        let metrics = SchedulerMetrics::new();
        metrics.record_tick();
        metrics.record_context_switch();
        metrics.record_preemption();
        metrics.reset();

        assert_eq!(metrics.ticks(), 0);
        assert_eq!(metrics.context_switches(), 0);
        assert_eq!(metrics.preemptions(), 0);
    }
}
