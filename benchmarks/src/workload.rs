//! Workload description
//!
//! A workload is the static input of a simulation run: which processes
//! exist, when they arrive, how long they need the CPU, and at which
//! points of their execution they stop for I/O.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use simsched_execution::{BurstOracle, Pid, Tick};

// =============================================================================
// Jobs
// =============================================================================

/// One simulated process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    /// Process identity
    pub pid: Pid,
    /// First tick at which the process is active
    pub arrival: Tick,
    /// CPU ticks needed to finish
    pub total_time: Tick,
    /// Executed-time offsets at which the process is I/O-busy for one tick
    pub io_ticks: BTreeSet<Tick>,
}

impl JobSpec {
    /// Create a CPU-bound job
    pub fn new(pid: u64, arrival: Tick, total_time: Tick) -> Self {
        Self {
            pid: Pid::from_raw(pid),
            arrival,
            total_time,
            io_ticks: BTreeSet::new(),
        }
    }

    /// Block for one tick once `executed` ticks have run
    pub fn io_at(mut self, executed: Tick) -> Self {
        self.io_ticks.insert(executed);
        self
    }
}

// =============================================================================
// Workload
// =============================================================================

/// Workload validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadError {
    /// Two jobs share a pid
    DuplicatePid(Pid),
    /// A job needs no CPU time
    ZeroLength(Pid),
    /// An I/O offset lies at or beyond the job's end
    IoAfterCompletion {
        /// Job
        pid: Pid,
        /// Offending offset
        offset: Tick,
    },
}

impl core::fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DuplicatePid(pid) => write!(f, "pid {} appears more than once", pid),
            Self::ZeroLength(pid) => write!(f, "pid {} has a zero total time", pid),
            Self::IoAfterCompletion { pid, offset } => {
                write!(f, "pid {} blocks at offset {} after it would finish", pid, offset)
            }
        }
    }
}

impl core::error::Error for WorkloadError {}

/// A set of jobs to simulate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workload {
    jobs: Vec<JobSpec>,
}

impl Workload {
    /// Create an empty workload
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a job
    pub fn with_job(mut self, job: JobSpec) -> Self {
        self.jobs.push(job);
        self
    }

    /// Add a job
    pub fn push(&mut self, job: JobSpec) {
        self.jobs.push(job);
    }

    /// Jobs in insertion order
    pub fn jobs(&self) -> &[JobSpec] {
        &self.jobs
    }

    /// Look up a job
    pub fn job(&self, pid: Pid) -> Option<&JobSpec> {
        self.jobs.iter().find(|job| job.pid == pid)
    }

    /// Number of jobs
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Check if there are no jobs
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Sum of all CPU demand
    pub fn total_work(&self) -> Tick {
        self.jobs.iter().map(|job| job.total_time).sum()
    }

    /// Check that the workload can be simulated
    pub fn validate(&self) -> Result<(), WorkloadError> {
        let mut seen = BTreeSet::new();

        for job in &self.jobs {
            if !seen.insert(job.pid) {
                return Err(WorkloadError::DuplicatePid(job.pid));
            }
            if job.total_time == 0 {
                return Err(WorkloadError::ZeroLength(job.pid));
            }
            if let Some(&offset) = job.io_ticks.range(job.total_time..).next() {
                return Err(WorkloadError::IoAfterCompletion { pid: job.pid, offset });
            }
        }

        Ok(())
    }
}

/// Total times come straight from the job list.
impl BurstOracle for Workload {
    fn total_time(&self, pid: Pid) -> Tick {
        self.job(pid).map_or(0, |job| job.total_time)
    }
}
