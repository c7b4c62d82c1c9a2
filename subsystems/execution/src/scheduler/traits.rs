//! # Scheduler Traits
//!
//! Defines the decision contract every scheduling policy implements.

use super::priority::LEVEL_COUNT;
use crate::{BurstOracle, Pid, ProcessDescriptor, Tick};

/// Everything a policy may look at when asked for a decision
#[derive(Clone, Copy)]
pub struct TickContext<'a> {
    /// Active processes this tick, in the harness's order
    pub snapshot: &'a [ProcessDescriptor],
    /// Current simulation time
    pub now: Tick,
    /// Process that ran during the previous tick, if any
    pub current: Option<Pid>,
    /// Total burst lengths
    pub oracle: &'a dyn BurstOracle,
}

impl<'a> TickContext<'a> {
    /// Create a new tick context
    pub fn new(
        snapshot: &'a [ProcessDescriptor],
        now: Tick,
        current: Option<Pid>,
        oracle: &'a dyn BurstOracle,
    ) -> Self {
        Self { snapshot, now, current, oracle }
    }

    /// Check if a process is present in the snapshot
    pub fn is_active(&self, pid: Pid) -> bool {
        self.snapshot.iter().any(|p| p.pid == pid)
    }

    /// Find a process in the snapshot
    pub fn find(&self, pid: Pid) -> Option<&'a ProcessDescriptor> {
        self.snapshot.iter().find(|p| p.pid == pid)
    }
}

impl core::fmt::Debug for TickContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TickContext")
            .field("snapshot", &self.snapshot)
            .field("now", &self.now)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

/// The core policy trait
///
/// A policy is asked once per tick which process should hold the CPU.
/// Policies own whatever state they carry between ticks; that state lives
/// exactly as long as the simulation run the policy was built for.
pub trait SchedulingPolicy: Send {
    /// Get the policy name
    fn name(&self) -> &'static str;

    /// Pick the process to run this tick, or `None` to leave the CPU idle
    ///
    /// Callers only invoke this with a non-empty snapshot; an empty one
    /// yields `None`.
    fn decide(&mut self, tick: &TickContext<'_>) -> Option<Pid>;

    /// Forget all cross-tick state, as at the start of a run
    fn reset(&mut self);

    /// Get policy statistics
    fn stats(&self) -> PolicyStats {
        PolicyStats::default()
    }
}

/// Policy statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyStats {
    /// Decisions made since the last reset
    pub decisions: u64,
    /// Decisions that selected no process
    pub idle_decisions: u64,
    /// Entries waiting at each feedback level (all zero for flat policies)
    pub queued: [usize; LEVEL_COUNT],
}

impl PolicyStats {
    /// Record one decision
    pub fn record(&mut self, selected: Option<Pid>) {
        self.decisions += 1;
        if selected.is_none() {
            self.idle_decisions += 1;
        }
    }

    /// Total queued entries
    pub fn total_queued(&self) -> usize {
        self.queued.iter().sum()
    }
}
