//! # simsched Simulator Profile
//!
//! Composes the builtin policy modules into a registry and turns a policy
//! name into a ready [`SchedulerFramework`].
//!
//! ## Builtin policies
//!
//! | Name   | Policy                                  |
//! |--------|-----------------------------------------|
//! | `fifo` | First-in-first-out                      |
//! | `sjf`  | Shortest job first, non-preemptive      |
//! | `stcf` | Shortest time-to-completion first       |
//! | `rr`   | Round-robin, one-tick slice             |
//! | `mlfq` | Three-level feedback queue with boost   |
//!
//! Selection happens once, before the first tick, by looking the name up
//! in a [`PolicyRegistry`]. An unrecognised name is a
//! [`ConfigError::UnknownPolicy`].

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

use alloc::boxed::Box;
use simsched_execution::scheduler::SchedulerFramework;
use simsched_modules::{ConfigError, ConfigResult, Context, PolicyModule, PolicyRegistry};

/// Builtin policy identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PolicyKind {
    /// First-in-first-out
    Fifo,
    /// Shortest job first
    Sjf,
    /// Shortest time-to-completion first
    Stcf,
    /// Round-robin
    RoundRobin,
    /// Multi-level feedback queue
    Mlfq,
}

impl PolicyKind {
    /// All builtin policies
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::Fifo,
        PolicyKind::Sjf,
        PolicyKind::Stcf,
        PolicyKind::RoundRobin,
        PolicyKind::Mlfq,
    ];

    /// Registered name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::Sjf => "sjf",
            Self::Stcf => "stcf",
            Self::RoundRobin => "rr",
            Self::Mlfq => "mlfq",
        }
    }

    /// Module that builds this policy
    pub fn module(self) -> Box<dyn PolicyModule> {
        match self {
            Self::Fifo => Box::new(simsched_scheduler_batch::FifoModule),
            Self::Sjf => Box::new(simsched_scheduler_batch::SjfModule),
            Self::Stcf => Box::new(simsched_scheduler_batch::StcfModule),
            Self::RoundRobin => Box::new(simsched_scheduler_round_robin::create_module()),
            Self::Mlfq => Box::new(simsched_scheduler_mlfq::create_module()),
        }
    }
}

impl core::str::FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownPolicy(s.into()))
    }
}

impl core::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry holding every builtin policy
pub fn builtin_registry() -> PolicyRegistry {
    let registry = PolicyRegistry::new();

    for kind in PolicyKind::ALL {
        if let Err(e) = registry.register(kind.module()) {
            log::warn!("Skipping builtin policy {}: {}", kind, e);
        }
    }

    registry
}

/// Build a framework for a builtin policy
pub fn select_kind(kind: PolicyKind, ctx: &Context) -> ConfigResult<SchedulerFramework> {
    let policy = kind.module().build(ctx)?;
    Ok(SchedulerFramework::new(policy))
}

/// Build a framework for the policy registered under `name` in `registry`
pub fn select_from(registry: &PolicyRegistry, name: &str, ctx: &Context) -> ConfigResult<SchedulerFramework> {
    let policy = registry.create(name, ctx)?;
    Ok(SchedulerFramework::new(policy))
}

/// Build a framework for the builtin policy registered under `name`
pub fn select(name: &str, ctx: &Context) -> ConfigResult<SchedulerFramework> {
    select_from(&builtin_registry(), name, ctx)
}
