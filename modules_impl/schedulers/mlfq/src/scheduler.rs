//! # MLFQ Scheduler Implementation
//!
//! Every tick runs four steps in a fixed order:
//!
//! 1. Demote the process that ran last tick one level (level 3 is a sink)
//! 2. Admit processes seen for the first time at the tail of level 1
//! 3. On boost ticks, move level 3 and then level 2 onto the tail of level 1
//! 4. Pop the first non-busy entry of the highest non-exhausted level
//!
//! The selected entry is held outside the queues while it runs, so a
//! process is either queued at exactly one level or running, never both.

use crate::config::{MlfqConfig, RequeuePolicy};
use alloc::vec::Vec;
use simsched_execution::scheduler::{
    FeedbackQueues, PolicyStats, QueueEntry, QueueLevel, SchedulingPolicy, TickContext,
};
use simsched_execution::Pid;

/// The selected process and the level it was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Running {
    entry: QueueEntry,
    level: QueueLevel,
}

/// Multi-level feedback queue scheduler
#[derive(Debug)]
pub struct MlfqScheduler {
    /// Configuration
    config: MlfqConfig,
    /// Waiting processes, by level
    queues: FeedbackQueues,
    /// Last selection
    running: Option<Running>,
    /// Statistics
    stats: PolicyStats,
}

impl MlfqScheduler {
    /// Create a new scheduler
    pub fn new(config: MlfqConfig) -> Self {
        Self {
            config,
            queues: FeedbackQueues::new(),
            running: None,
            stats: PolicyStats::default(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &MlfqConfig {
        &self.config
    }

    /// Pids waiting at a level, head first
    pub fn level_pids(&self, level: QueueLevel) -> Vec<Pid> {
        self.queues.pids(level)
    }

    /// Last selected process and the level it came from
    pub fn running(&self) -> Option<(Pid, QueueLevel)> {
        self.running.map(|r| (r.entry.pid(), r.level))
    }

    /// Read-only view of the queue store
    pub fn queues(&self) -> &FeedbackQueues {
        &self.queues
    }

    /// Step 1: push last tick's selection one level down
    fn demote_previous(&mut self, tick: &TickContext<'_>) {
        let Some(previous) = self.running.take() else {
            return;
        };
        // Nothing ran: the selection went unused and is re-admitted fresh
        if tick.current.is_none() {
            return;
        }

        let pid = previous.entry.pid();
        if self.config.requeue == RequeuePolicy::Alive && !tick.is_active(pid) {
            log::debug!("[mlfq] t={} pid {} finished, not re-queued", tick.now, pid);
            return;
        }

        let level = previous.level.demoted();
        log::debug!("[mlfq] t={} demoting pid {} {} -> {}", tick.now, pid, previous.level, level);
        self.queues.push(previous.entry, level);
    }

    /// Step 2: admit unseen processes, then sync stored descriptors
    fn admit_arrivals(&mut self, tick: &TickContext<'_>) {
        for process in tick.snapshot {
            if !self.queues.refresh(process) {
                log::debug!("[mlfq] t={} admitting pid {}", tick.now, process.pid);
                self.queues.push(QueueEntry::new(*process), QueueLevel::High);
            }
        }

        if self.config.requeue == RequeuePolicy::Alive {
            let dropped = self.queues.retain(|entry| tick.is_active(entry.pid()));
            if dropped > 0 {
                log::debug!("[mlfq] t={} dropped {} departed entries", tick.now, dropped);
            }
        }
    }

    /// Step 3: lowest level first, so former level-3 entries lead
    fn boost(&mut self, tick: &TickContext<'_>) {
        let mut moved = 0;
        for level in [QueueLevel::Low, QueueLevel::Medium] {
            for entry in self.queues.drain_all_in_order(level) {
                self.queues.push(entry, QueueLevel::High);
                moved += 1;
            }
        }
        log::debug!("[mlfq] t={} priority boost moved {} entries", tick.now, moved);
    }

    /// Step 4: first idle entry of the highest level that has one
    fn select(&mut self) -> Option<Pid> {
        QueueLevel::ALL.into_iter().find_map(|level| {
            let entry = self.queues.pop_first_idle(level)?;
            self.running = Some(Running { entry, level });
            Some(entry.pid())
        })
    }
}

impl Default for MlfqScheduler {
    fn default() -> Self {
        Self::new(MlfqConfig::default())
    }
}

impl SchedulingPolicy for MlfqScheduler {
    fn name(&self) -> &'static str {
        "mlfq"
    }

    fn decide(&mut self, tick: &TickContext<'_>) -> Option<Pid> {
        if tick.snapshot.is_empty() {
            self.stats.record(None);
            return None;
        }

        self.demote_previous(tick);
        self.admit_arrivals(tick);
        if self.config.is_boost_tick(tick.now) {
            self.boost(tick);
        }

        let selected = self.select();
        log::trace!("[mlfq] t={} selected {:?} from {:?}", tick.now, selected, self.running.map(|r| r.level));

        self.stats.record(selected);
        selected
    }

    fn reset(&mut self) {
        log::debug!("[mlfq] Resetting queues");
        self.queues.clear();
        self.running = None;
        self.stats = PolicyStats::default();
    }

    fn stats(&self) -> PolicyStats {
        let mut stats = self.stats.clone();
        for level in QueueLevel::ALL {
            stats.queued[level.index()] = self.queues.len(level);
        }
        stats
    }
}
