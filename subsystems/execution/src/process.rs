//! # Process Model
//!
//! What a policy sees of a simulated process: one descriptor per active
//! process per tick, plus an oracle for total burst lengths.

use crate::{Pid, Tick};
use alloc::collections::BTreeMap;

/// Per-tick view of one active process
///
/// Descriptors are owned by the harness and handed to policies read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessDescriptor {
    /// Process ID
    pub pid: Pid,
    /// Process is performing I/O and cannot be given the CPU this tick
    pub on_io: bool,
    /// Ticks already executed (on CPU or in I/O)
    pub executed_time: Tick,
}

impl ProcessDescriptor {
    /// Create a descriptor for an idle process that has not run yet
    pub const fn new(pid: Pid) -> Self {
        Self {
            pid,
            on_io: false,
            executed_time: 0,
        }
    }

    /// Set the I/O-busy flag
    pub const fn on_io(mut self, on_io: bool) -> Self {
        self.on_io = on_io;
        self
    }

    /// Set the executed time
    pub const fn executed(mut self, executed_time: Tick) -> Self {
        self.executed_time = executed_time;
        self
    }

    /// Check if the process can be given the CPU
    pub const fn is_idle(&self) -> bool {
        !self.on_io
    }
}

/// Source of total execution times, maintained by the harness
///
/// SJF and STCF are the only policies that consult it.
pub trait BurstOracle {
    /// Total CPU time the process needs to complete
    fn total_time(&self, pid: Pid) -> Tick;

    /// Ticks left before the process completes
    ///
    /// Signed: a harness that charges I/O time to `executed_time` can push
    /// a process past its nominal total. Times beyond `i64::MAX` saturate.
    fn time_to_completion(&self, process: &ProcessDescriptor) -> i64 {
        let total = i64::try_from(self.total_time(process.pid)).unwrap_or(i64::MAX);
        let executed = i64::try_from(process.executed_time).unwrap_or(i64::MAX);
        total.saturating_sub(executed)
    }
}

impl<F> BurstOracle for F
where
    F: Fn(Pid) -> Tick,
{
    fn total_time(&self, pid: Pid) -> Tick {
        self(pid)
    }
}

/// Unknown pids report a zero-length burst.
impl BurstOracle for BTreeMap<Pid, Tick> {
    fn total_time(&self, pid: Pid) -> Tick {
        self.get(&pid).copied().unwrap_or(0)
    }
}

/// Oracle for policies that never ask
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOracle;

impl BurstOracle for NoOracle {
    fn total_time(&self, _pid: Pid) -> Tick {
        0
    }
}
