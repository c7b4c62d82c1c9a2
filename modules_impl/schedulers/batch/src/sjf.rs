//! # Shortest Job First
//!
//! Non-preemptive: once a process holds the CPU it keeps it until the
//! harness reports nothing running. Only then is the shortest total burst
//! among the active processes chosen.

use simsched_execution::scheduler::{PolicyStats, SchedulingPolicy, TickContext};
use simsched_execution::Pid;

/// Shortest-job-first policy
#[derive(Debug, Default)]
pub struct SjfScheduler {
    stats: PolicyStats,
}

impl SjfScheduler {
    /// Create a new scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Active process with the smallest total burst, first one on ties
    fn shortest(tick: &TickContext<'_>) -> Option<Pid> {
        tick.snapshot
            .iter()
            .min_by_key(|p| tick.oracle.total_time(p.pid))
            .map(|p| p.pid)
    }
}

impl SchedulingPolicy for SjfScheduler {
    fn name(&self) -> &'static str {
        "sjf"
    }

    fn decide(&mut self, tick: &TickContext<'_>) -> Option<Pid> {
        let selected = match tick.current {
            Some(running) => Some(running),
            None => {
                let shortest = Self::shortest(tick);
                log::debug!("[sjf] t={} dispatching {:?}", tick.now, shortest);
                shortest
            }
        };
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
    use alloc::collections::BTreeMap;
    use simsched_execution::{ProcessDescriptor, Tick};

    fn pid(raw: u64) -> Pid {
        Pid::from_raw(raw)
    }

    fn totals(pairs: &[(u64, Tick)]) -> BTreeMap<Pid, Tick> {
        pairs.iter().map(|&(p, t)| (pid(p), t)).collect()
    }

    #[test]
    fn test_picks_shortest_total() {
        let mut sjf = SjfScheduler::new();
        let oracle = totals(&[(1, 5), (2, 1), (3, 8)]);
        let procs = [1, 2, 3].map(|p| ProcessDescriptor::new(pid(p)));

        let tick = TickContext::new(&procs, 0, None, &oracle);
        assert_eq!(sjf.decide(&tick), Some(pid(2)));
    }

    #[test]
    fn test_ties_go_to_first_in_snapshot() {
        let mut sjf = SjfScheduler::new();
        let oracle = totals(&[(7, 3), (4, 3), (9, 6)]);
        let procs = [7, 4, 9].map(|p| ProcessDescriptor::new(pid(p)));

        let tick = TickContext::new(&procs, 0, None, &oracle);
        assert_eq!(sjf.decide(&tick), Some(pid(7)));
    }

    #[test]
    fn test_never_preempts_running_process() {
        let mut sjf = SjfScheduler::new();
        let oracle = totals(&[(1, 50), (2, 1)]);
        let procs = [1, 2].map(|p| ProcessDescriptor::new(pid(p)));

        let tick = TickContext::new(&procs, 3, Some(pid(1)), &oracle);
        assert_eq!(sjf.decide(&tick), Some(pid(1)));
    }
}
