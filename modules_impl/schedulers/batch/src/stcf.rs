//! # Shortest Time-to-Completion First
//!
//! Preemptive: every tick the active process closest to finishing wins,
//! whatever is currently running.

use simsched_execution::scheduler::{PolicyStats, SchedulingPolicy, TickContext};
use simsched_execution::Pid;

/// Shortest-time-to-completion-first policy
#[derive(Debug, Default)]
pub struct StcfScheduler {
    stats: PolicyStats,
}

impl StcfScheduler {
    /// Create a new scheduler
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchedulingPolicy for StcfScheduler {
    fn name(&self) -> &'static str {
        "stcf"
    }

    fn decide(&mut self, tick: &TickContext<'_>) -> Option<Pid> {
        let selected = tick
            .snapshot
            .iter()
            .min_by_key(|p| tick.oracle.time_to_completion(p))
            .map(|p| p.pid);

        if selected.is_some() && tick.current.is_some() && selected != tick.current {
            log::debug!("[stcf] t={} preempting {:?} for {:?}", tick.now, tick.current, selected);
        }

        self.stats.record(selected);
        selected
    }

    fn reset(&mut self) {
        self.stats = PolicyStats::default();
    }

    fn stats(&self) -> PolicyStats {
        self.stats.clone()
    }
}
