//! # simsched Execution Subsystem
//!
//! The execution subsystem provides:
//! - The process model seen by a scheduling policy (snapshots, burst oracle)
//! - The per-tick decision contract every policy implements
//! - The three-level feedback queue store used by MLFQ
//! - Decision metrics and the per-run scheduler framework
//!
//! ## Key Principle
//!
//! This subsystem provides FRAMEWORKS, not policies.
//! The actual policy is a module that is selected once, at configuration time.

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

pub mod process;
pub mod scheduler;

pub use process::{BurstOracle, ProcessDescriptor};

/// Identifier of a simulated process
///
/// Pids are chosen by the harness and stay stable for the lifetime of
/// the process they name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(u64);

impl Pid {
    /// Create from raw value
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw ID value
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for Pid {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for Pid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Simulation time, in ticks
pub type Tick = u64;

static_assertions::assert_impl_all!(Pid: Copy, Send, Sync, Ord);
static_assertions::assert_eq_size!(Pid, u64);
