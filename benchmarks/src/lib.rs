//! # simsched Simulation Harness
//!
//! Reference tick-driven harness for exercising scheduling policies.
//! Runs are deterministic: the same workload and policy always produce
//! the same report.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   WORKLOAD   │────▶│  SIMULATION  │────▶│  RUN REPORT  │
//! │  (job list)  │     │    ENGINE    │     │  (timings)   │
//! └──────────────┘     └──────┬───────┘     └──────────────┘
//!                             │ snapshot / decision
//!                      ┌──────▼───────┐
//!                      │  SCHEDULER   │
//!                      │  FRAMEWORK   │
//!                      └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use simsched_benchmarks::{JobSpec, Simulation, Workload};
//!
//! let workload = Workload::new()
//!     .with_job(JobSpec::new(1, 0, 5))
//!     .with_job(JobSpec::new(2, 0, 1).io_at(0));
//!
//! let mut framework = simsched_profile::select("mlfq", &Context::new())?;
//! let report = Simulation::run(&mut framework, &workload, 10_000)?;
//! ```

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

pub mod engine;
pub mod results;
pub mod workload;

// Re-exports
pub use engine::Simulation;
pub use results::{JobOutcome, RunReport};
pub use workload::{JobSpec, Workload, WorkloadError};

use alloc::vec::Vec;
use simsched_execution::Tick;
use simsched_modules::{ConfigError, Context};
use simsched_profile::PolicyKind;

/// Failure of a comparison run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The policy could not be built
    Config(ConfigError),
    /// The workload cannot be simulated
    Workload(WorkloadError),
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<WorkloadError> for RunError {
    fn from(e: WorkloadError) -> Self {
        Self::Workload(e)
    }
}

impl core::fmt::Display for RunError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {}", e),
            Self::Workload(e) => write!(f, "workload: {}", e),
        }
    }
}

impl core::error::Error for RunError {}

/// Run one workload under a named policy
pub fn run_policy(name: &str, ctx: &Context, workload: &Workload, max_ticks: Tick) -> Result<RunReport, RunError> {
    let mut framework = simsched_profile::select(name, ctx)?;
    Ok(Simulation::run(&mut framework, workload, max_ticks)?)
}

/// Run one workload under every builtin policy, each with a fresh instance
pub fn compare_all(ctx: &Context, workload: &Workload, max_ticks: Tick) -> Result<Vec<RunReport>, RunError> {
    PolicyKind::ALL
        .into_iter()
        .map(|kind| {
            log::info!("[sim] Running workload of {} jobs under {}", workload.len(), kind);
            run_policy(kind.as_str(), ctx, workload, max_ticks)
        })
        .collect()
}
