//! # Round-Robin Scheduler Implementation
//!
//! One-tick quantum: every tick with a process running, the cursor moves
//! one step through the snapshot. A tick that follows an idle one resumes
//! where the cursor stopped.

use crate::config::{CursorMode, RoundRobinConfig};
use simsched_execution::scheduler::{PolicyStats, SchedulingPolicy, TickContext};
use simsched_execution::Pid;

/// Round-Robin Scheduler
#[derive(Debug)]
pub struct RoundRobinScheduler {
    /// Configuration
    config: RoundRobinConfig,
    /// Snapshot index of the last selection
    cursor: usize,
    /// Last selected process
    last: Option<Pid>,
    /// Statistics
    stats: PolicyStats,
}

impl RoundRobinScheduler {
    /// Create a new scheduler
    pub fn new(config: RoundRobinConfig) -> Self {
        Self {
            config,
            cursor: 0,
            last: None,
            stats: PolicyStats::default(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &RoundRobinConfig {
        &self.config
    }

    /// Snapshot index of the last selection
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index to select this tick, before range normalization
    fn next_index(&self, tick: &TickContext<'_>) -> usize {
        let position = |pid: Pid| tick.snapshot.iter().position(|p| p.pid == pid);

        match (self.config.cursor, tick.current) {
            (CursorMode::Positional, None) => self.cursor,
            (CursorMode::Positional, Some(_)) => self.cursor + 1,
            (CursorMode::Identity, None) => self.last.and_then(position).unwrap_or(self.cursor),
            // A departed process leaves its successor sitting at its old index
            (CursorMode::Identity, Some(running)) => {
                position(running).map_or(self.cursor, |index| index + 1)
            }
        }
    }
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        Self::new(RoundRobinConfig::default())
    }
}

impl SchedulingPolicy for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "rr"
    }

    fn decide(&mut self, tick: &TickContext<'_>) -> Option<Pid> {
        if tick.snapshot.is_empty() {
            self.stats.record(None);
            return None;
        }

        let index = self.next_index(tick);
        self.cursor = if index >= tick.snapshot.len() { 0 } else { index };

        let selected = tick.snapshot[self.cursor].pid;
        log::trace!("[round-robin] t={} cursor={} -> {}", tick.now, self.cursor, selected);

        self.last = Some(selected);
        self.stats.record(Some(selected));
        Some(selected)
    }

    fn reset(&mut self) {
        log::debug!("[round-robin] Resetting cursor");
        self.cursor = 0;
        self.last = None;
        self.stats = PolicyStats::default();
    }

    fn stats(&self) -> PolicyStats {
        self.stats.clone()
    }
}
