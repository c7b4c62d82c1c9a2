//! # FIFO Policy
//!
//! Runs whichever active process arrived first. The harness keeps the
//! snapshot in arrival order, so that is simply its head.

use simsched_execution::scheduler::{PolicyStats, SchedulingPolicy, TickContext};
use simsched_execution::Pid;

/// First-in-first-out policy
#[derive(Debug, Default)]
pub struct FifoScheduler {
    stats: PolicyStats,
}

impl FifoScheduler {
    /// Create a new scheduler
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchedulingPolicy for FifoScheduler {
    fn name(&self) -> &'static str {
        "fifo"
    }

    fn decide(&mut self, tick: &TickContext<'_>) -> Option<Pid> {
        let selected = tick.snapshot.first().map(|p| p.pid);
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

#[cfg(test)]
mod tests {
    use super::*;
    use simsched_execution::process::NoOracle;
    use simsched_execution::ProcessDescriptor;

    fn snapshot(pids: &[u64]) -> alloc::vec::Vec<ProcessDescriptor> {
        pids.iter()
            .map(|&pid| ProcessDescriptor::new(Pid::from_raw(pid)))
            .collect()
    }

    #[test]
    fn test_returns_head_regardless_of_time_and_current() {
        let mut fifo = FifoScheduler::new();
        let procs = snapshot(&[4, 2, 9]);

        for (now, current) in [(0, None), (17, Some(9)), (1000, Some(2))] {
            let tick = TickContext::new(&procs, now, current.map(Pid::from_raw), &NoOracle);
            assert_eq!(fifo.decide(&tick), Some(Pid::from_raw(4)));
        }
        assert_eq!(fifo.stats().decisions, 3);
    }

    #[test]
    fn test_head_on_io_is_still_returned() {
        let mut fifo = FifoScheduler::new();
        let procs = [
            ProcessDescriptor::new(Pid::from_raw(1)).on_io(true),
            ProcessDescriptor::new(Pid::from_raw(2)),
        ];

        let tick = TickContext::new(&procs, 0, None, &NoOracle);
        assert_eq!(fifo.decide(&tick), Some(Pid::from_raw(1)));
    }

    #[test]
    fn test_empty_snapshot() {
        let mut fifo = FifoScheduler::new();
        let tick = TickContext::new(&[], 0, None, &NoOracle);

        assert_eq!(fifo.decide(&tick), None);
        assert_eq!(fifo.stats().idle_decisions, 1);
    }
}
