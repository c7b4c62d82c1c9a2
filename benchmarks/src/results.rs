//! Run Results & Reporting
//!
//! Per-process timing outcomes of one simulation run and the usual
//! scheduling figures derived from them.

use alloc::collections::BTreeMap;
use core::fmt;
use simsched_execution::{Pid, Tick};

// =============================================================================
// Per-process outcome
// =============================================================================

/// Timing of one process over a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobOutcome {
    /// Arrival tick
    pub arrival: Tick,
    /// Tick at which the process first held the CPU
    pub first_run: Option<Tick>,
    /// End of the tick in which the process finished
    pub completion: Option<Tick>,
}

impl JobOutcome {
    /// Outcome for a process that has not run yet
    pub const fn pending(arrival: Tick) -> Self {
        Self {
            arrival,
            first_run: None,
            completion: None,
        }
    }

    /// Completion minus arrival
    pub fn turnaround(&self) -> Option<Tick> {
        self.completion.map(|c| c - self.arrival)
    }

    /// First run minus arrival
    pub fn response(&self) -> Option<Tick> {
        self.first_run.map(|r| r - self.arrival)
    }

    /// Check if the process finished
    pub fn is_complete(&self) -> bool {
        self.completion.is_some()
    }
}

// =============================================================================
// Run report
// =============================================================================

/// Result of one simulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Policy that made the decisions
    pub policy: &'static str,
    /// Ticks simulated
    pub total_ticks: Tick,
    /// Ticks in which no process ran
    pub idle_ticks: Tick,
    /// Selections naming an absent or I/O-busy process
    pub rejected_selections: u64,
    /// Context switches seen by the framework
    pub context_switches: u64,
    /// Switches away from a process that had not finished
    pub preemptions: u64,
    /// Outcome per process
    pub jobs: BTreeMap<Pid, JobOutcome>,
}

impl RunReport {
    /// Create an empty report
    pub fn new(policy: &'static str) -> Self {
        Self {
            policy,
            total_ticks: 0,
            idle_ticks: 0,
            rejected_selections: 0,
            context_switches: 0,
            preemptions: 0,
            jobs: BTreeMap::new(),
        }
    }

    /// Outcome of one process
    pub fn job(&self, pid: Pid) -> Option<&JobOutcome> {
        self.jobs.get(&pid)
    }

    /// Completion tick of one process
    pub fn completion(&self, pid: Pid) -> Option<Tick> {
        self.job(pid).and_then(|job| job.completion)
    }

    /// Check if every process finished
    pub fn is_complete(&self) -> bool {
        self.jobs.values().all(JobOutcome::is_complete)
    }

    /// Mean turnaround over finished processes
    pub fn average_turnaround(&self) -> Option<f64> {
        Self::mean(self.jobs.values().filter_map(JobOutcome::turnaround))
    }

    /// Mean response time over processes that ran
    pub fn average_response(&self) -> Option<f64> {
        Self::mean(self.jobs.values().filter_map(JobOutcome::response))
    }

    /// Percentage of ticks in which a process ran
    pub fn cpu_utilization(&self) -> u8 {
        if self.total_ticks == 0 {
            return 0;
        }
        let busy = self.total_ticks - self.idle_ticks;
        ((busy * 100) / self.total_ticks) as u8
    }

    fn mean(values: impl Iterator<Item = Tick>) -> Option<f64> {
        let (sum, count) = values.fold((0u64, 0u64), |(sum, count), v| (sum + v, count + 1));
        (count > 0).then(|| sum as f64 / count as f64)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "policy {}: {} ticks, {} idle, {} switches, {} preemptions",
            self.policy, self.total_ticks, self.idle_ticks, self.context_switches, self.preemptions)?;
        writeln!(f, "{:>6} {:>8} {:>10} {:>11} {:>9}", "pid", "arrival", "completion", "turnaround", "response")?;

        for (pid, job) in &self.jobs {
            let column = |value: Option<Tick>| value.map_or(-1, |v| v as i64);
            writeln!(f, "{:>6} {:>8} {:>10} {:>11} {:>9}",
                pid.as_u64(), job.arrival, column(job.completion), column(job.turnaround()), column(job.response()))?;
        }

        if let (Some(turnaround), Some(response)) = (self.average_turnaround(), self.average_response()) {
            writeln!(f, "average turnaround {:.2}, average response {:.2}", turnaround, response)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn report() -> RunReport {
        let mut report = RunReport::new("fifo");
        report.total_ticks = 10;
        report.idle_ticks = 2;
        report.jobs.insert(
            Pid::from_raw(1),
            JobOutcome { arrival: 0, first_run: Some(0), completion: Some(4) },
        );
        report.jobs.insert(
            Pid::from_raw(2),
            JobOutcome { arrival: 1, first_run: Some(6), completion: Some(9) },
        );
        report
    }

    #[test]
    fn test_outcome_figures() {
        let job = JobOutcome { arrival: 3, first_run: Some(5), completion: Some(11) };
        assert_eq!(job.turnaround(), Some(8));
        assert_eq!(job.response(), Some(2));

        let pending = JobOutcome::pending(3);
        assert_eq!(pending.turnaround(), None);
        assert!(!pending.is_complete());
    }

    #[test]
    fn test_averages() {
        let report = report();

        assert_eq!(report.average_turnaround(), Some(6.0));
        assert_eq!(report.average_response(), Some(2.5));
        assert_eq!(report.cpu_utilization(), 80);
        assert!(report.is_complete());
    }

    #[test]
    fn test_empty_report() {
        let report = RunReport::new("rr");

        assert_eq!(report.average_turnaround(), None);
        assert_eq!(report.cpu_utilization(), 0);
        assert!(report.is_complete());
    }

    #[test]
    fn test_display_lists_every_job() {
        let text = report().to_string();

        assert!(text.starts_with("policy fifo: 10 ticks, 2 idle"));
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("average turnaround 6.00, average response 2.50"));
    }
}
