//! # Feedback Run Queues
//!
//! The three-level queue store behind MLFQ.
//!
//! Each level is a doubly linked list threaded through one shared slot
//! arena. Links are arena indices, never references, so an unlinked node
//! cannot be reached again: its slot is emptied and recycled. Entries are
//! moved out to the caller on removal.

use super::priority::{QueueLevel, LEVEL_COUNT};
use crate::{Pid, ProcessDescriptor};
use alloc::vec::Vec;

/// Process entry in a feedback level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEntry {
    /// Descriptor as last observed
    pub process: ProcessDescriptor,
}

impl QueueEntry {
    /// Wrap a descriptor
    pub const fn new(process: ProcessDescriptor) -> Self {
        Self { process }
    }

    /// Process ID
    pub const fn pid(&self) -> Pid {
        self.process.pid
    }

    /// Check if the process may be selected
    pub const fn is_idle(&self) -> bool {
        self.process.is_idle()
    }
}

impl From<ProcessDescriptor> for QueueEntry {
    fn from(process: ProcessDescriptor) -> Self {
        Self::new(process)
    }
}

/// Arena slot index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Debug)]
struct Node {
    entry: QueueEntry,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Head, tail and length of one level
#[derive(Debug, Clone, Copy, Default)]
struct Ends {
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

/// Three FIFO levels sharing one node arena
#[derive(Debug, Default)]
pub struct FeedbackQueues {
    slots: Vec<Option<Node>>,
    free: Vec<NodeId>,
    levels: [Ends; LEVEL_COUNT],
}

impl FeedbackQueues {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the tail of a level
    pub fn push(&mut self, entry: QueueEntry, level: QueueLevel) {
        let tail = self.levels[level.index()].tail;
        let id = self.alloc(Node {
            entry,
            prev: tail,
            next: None,
        });

        match tail {
            Some(tail) => self.node_mut(tail).next = Some(id),
            None => self.levels[level.index()].head = Some(id),
        }

        let ends = &mut self.levels[level.index()];
        ends.tail = Some(id);
        ends.len += 1;
    }

    /// Remove and return the first entry whose process is not I/O-busy
    ///
    /// Busy entries passed over keep their positions. Returns `None` if
    /// the level is empty or every entry in it is busy.
    pub fn pop_first_idle(&mut self, level: QueueLevel) -> Option<QueueEntry> {
        let id = self.find(level, QueueEntry::is_idle)?;
        Some(self.unlink(level, id))
    }

    /// Remove every entry of a level, head first
    pub fn drain_all_in_order(&mut self, level: QueueLevel) -> Vec<QueueEntry> {
        let mut drained = Vec::with_capacity(self.len(level));
        while let Some(head) = self.levels[level.index()].head {
            drained.push(self.unlink(level, head));
        }
        drained
    }

    /// Check if a process is queued at any level
    pub fn contains(&self, pid: Pid) -> bool {
        self.level_of(pid).is_some()
    }

    /// Find the level a process is queued at
    pub(crate) fn level_of(&self, pid: Pid) -> Option<QueueLevel> {
        QueueLevel::ALL
            .into_iter()
            .find(|&level| self.iter(level).any(|entry| entry.pid() == pid))
    }

    /// Replace the stored descriptor of a queued process in place
    ///
    /// Returns `false` if the process is not queued.
    pub fn refresh(&mut self, process: &ProcessDescriptor) -> bool {
        for level in QueueLevel::ALL {
            if let Some(id) = self.find(level, |entry| entry.pid() == process.pid) {
                self.node_mut(id).entry.process = *process;
                return true;
            }
        }
        false
    }

    /// Remove every entry for which `keep` returns `false`
    ///
    /// Survivors keep their relative order. Returns the number removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&QueueEntry) -> bool,
    {
        let mut removed = 0;
        for level in QueueLevel::ALL {
            let mut cursor = self.levels[level.index()].head;
            while let Some(id) = cursor {
                let node = self.node(id);
                cursor = node.next;
                if !keep(&node.entry) {
                    self.unlink(level, id);
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Number of entries at a level
    pub fn len(&self, level: QueueLevel) -> usize {
        self.levels[level.index()].len
    }

    /// Number of entries across all levels
    pub(crate) fn total_len(&self) -> usize {
        self.levels.iter().map(|ends| ends.len).sum()
    }

    /// Check if every level is empty
    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }

    /// Iterate over a level, head first
    pub fn iter(&self, level: QueueLevel) -> LevelIter<'_> {
        LevelIter {
            queues: self,
            cursor: self.levels[level.index()].head,
        }
    }

    /// Pids queued at a level, head first
    pub fn pids(&self, level: QueueLevel) -> Vec<Pid> {
        self.iter(level).map(QueueEntry::pid).collect()
    }

    /// Drop every entry and release the arena
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.levels = [Ends::default(); LEVEL_COUNT];
    }

    fn find<F>(&self, level: QueueLevel, mut matches: F) -> Option<NodeId>
    where
        F: FnMut(&QueueEntry) -> bool,
    {
        let mut cursor = self.levels[level.index()].head;
        while let Some(id) = cursor {
            let node = self.node(id);
            if matches(&node.entry) {
                return Some(id);
            }
            cursor = node.next;
        }
        None
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Detach a node from its level and release its slot
    fn unlink(&mut self, level: QueueLevel, id: NodeId) -> QueueEntry {
        let node = self.slots[id.0]
            .take()
            .expect("linked node must occupy its slot");
        self.free.push(id);

        let ends = &mut self.levels[level.index()];
        match node.prev {
            Some(prev) => {
                if let Some(prev) = self.slots[prev.0].as_mut() {
                    prev.next = node.next;
                }
            }
            None => ends.head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(next) = self.slots[next.0].as_mut() {
                    next.prev = node.prev;
                }
            }
            None => ends.tail = node.prev,
        }
        ends.len -= 1;

        node.entry
    }

    fn node(&self, id: NodeId) -> &Node {
        self.slots[id.0]
            .as_ref()
            .expect("linked node must occupy its slot")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.slots[id.0]
            .as_mut()
            .expect("linked node must occupy its slot")
    }
}

/// Head-to-tail iterator over one level
#[derive(Debug)]
pub struct LevelIter<'a> {
    queues: &'a FeedbackQueues,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = &'a QueueEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let queues = self.queues;
        let node = queues.node(self.cursor?);
        self.cursor = node.next;
        Some(&node.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn entry(pid: u64) -> QueueEntry {
        QueueEntry::new(ProcessDescriptor::new(Pid::from_raw(pid)))
    }

    fn busy(pid: u64) -> QueueEntry {
        QueueEntry::new(ProcessDescriptor::new(Pid::from_raw(pid)).on_io(true))
    }

    fn raw(pids: Vec<Pid>) -> Vec<u64> {
        pids.into_iter().map(Pid::as_u64).collect()
    }

    fn filled(level: QueueLevel, entries: &[QueueEntry]) -> FeedbackQueues {
        let mut queues = FeedbackQueues::new();
        for e in entries {
            queues.push(*e, level);
        }
        queues
    }

    #[test]
    fn test_push_preserves_fifo_order() {
        let queues = filled(QueueLevel::High, &[entry(1), entry(2), entry(3)]);

        assert_eq!(raw(queues.pids(QueueLevel::High)), vec![1, 2, 3]);
        assert_eq!(queues.len(QueueLevel::High), 3);
        assert!(queues.iter(QueueLevel::Medium).next().is_none());
    }

    #[test]
    fn test_pop_sole_element() {
        let mut queues = filled(QueueLevel::Medium, &[entry(4)]);

        let popped = queues.pop_first_idle(QueueLevel::Medium);
        assert_eq!(popped.map(|e| e.pid().as_u64()), Some(4));
        assert!(queues.is_empty());
        assert!(queues.pop_first_idle(QueueLevel::Medium).is_none());

        // The level must be usable again after going empty
        queues.push(entry(5), QueueLevel::Medium);
        assert_eq!(raw(queues.pids(QueueLevel::Medium)), vec![5]);
    }

    #[test]
    fn test_pop_head() {
        let mut queues = filled(QueueLevel::High, &[entry(1), entry(2), entry(3)]);

        assert_eq!(queues.pop_first_idle(QueueLevel::High), Some(entry(1)));
        assert_eq!(raw(queues.pids(QueueLevel::High)), vec![2, 3]);

        queues.push(entry(4), QueueLevel::High);
        assert_eq!(raw(queues.pids(QueueLevel::High)), vec![2, 3, 4]);
    }

    #[test]
    fn test_pop_tail_skips_busy_entries() {
        let mut queues = filled(QueueLevel::High, &[busy(1), busy(2), entry(3)]);

        assert_eq!(queues.pop_first_idle(QueueLevel::High), Some(entry(3)));
        assert_eq!(raw(queues.pids(QueueLevel::High)), vec![1, 2]);

        // Tail was relinked: a new push lands after the busy entries
        queues.push(entry(4), QueueLevel::High);
        assert_eq!(raw(queues.pids(QueueLevel::High)), vec![1, 2, 4]);
    }

    #[test]
    fn test_pop_interior() {
        let mut queues = filled(
            QueueLevel::Low,
            &[busy(1), entry(2), busy(3), entry(4)],
        );

        assert_eq!(queues.pop_first_idle(QueueLevel::Low), Some(entry(2)));
        assert_eq!(raw(queues.pids(QueueLevel::Low)), vec![1, 3, 4]);
        assert_eq!(queues.pop_first_idle(QueueLevel::Low), Some(entry(4)));
        assert_eq!(raw(queues.pids(QueueLevel::Low)), vec![1, 3]);
    }

    #[test]
    fn test_all_busy_returns_none_without_reordering() {
        let mut queues = filled(QueueLevel::High, &[busy(1), busy(2), busy(3)]);

        assert!(queues.pop_first_idle(QueueLevel::High).is_none());
        assert_eq!(raw(queues.pids(QueueLevel::High)), vec![1, 2, 3]);
        assert_eq!(queues.len(QueueLevel::High), 3);
    }

    #[test]
    fn test_drain_all_in_order() {
        let mut queues = filled(QueueLevel::Low, &[entry(7), busy(8), entry(9)]);
        queues.push(entry(1), QueueLevel::High);

        let drained: Vec<u64> = queues
            .drain_all_in_order(QueueLevel::Low)
            .iter()
            .map(|e| e.pid().as_u64())
            .collect();

        assert_eq!(drained, vec![7, 8, 9]);
        assert_eq!(queues.len(QueueLevel::Low), 0);
        assert_eq!(raw(queues.pids(QueueLevel::High)), vec![1]);
    }

    #[test]
    fn test_contains_spans_levels() {
        let mut queues = FeedbackQueues::new();
        queues.push(entry(1), QueueLevel::High);
        queues.push(entry(2), QueueLevel::Medium);
        queues.push(entry(3), QueueLevel::Low);

        assert!(queues.contains(Pid::from_raw(2)));
        assert_eq!(queues.level_of(Pid::from_raw(3)), Some(QueueLevel::Low));
        assert!(!queues.contains(Pid::from_raw(4)));
    }

    #[test]
    fn test_slots_are_recycled() {
        let mut queues = FeedbackQueues::new();
        for round in 0..10 {
            queues.push(entry(round), QueueLevel::High);
            queues.push(entry(round + 100), QueueLevel::Medium);
            assert!(queues.pop_first_idle(QueueLevel::High).is_some());
            assert!(queues.pop_first_idle(QueueLevel::Medium).is_some());
        }
        assert!(queues.is_empty());
        assert!(queues.slots.len() <= 2);
    }

    #[test]
    fn test_refresh_updates_in_place() {
        let mut queues = filled(QueueLevel::High, &[entry(1), entry(2), entry(3)]);

        let busy_two = ProcessDescriptor::new(Pid::from_raw(2)).on_io(true).executed(4);
        assert!(queues.refresh(&busy_two));
        assert!(!queues.refresh(&ProcessDescriptor::new(Pid::from_raw(9))));

        assert_eq!(raw(queues.pids(QueueLevel::High)), vec![1, 2, 3]);
        let stored = queues.iter(QueueLevel::High).nth(1).copied();
        assert_eq!(stored, Some(QueueEntry::new(busy_two)));
    }

    #[test]
    fn test_retain_removes_and_relinks() {
        let mut queues = filled(QueueLevel::High, &[entry(1), entry(2), entry(3), entry(4)]);
        queues.push(entry(5), QueueLevel::Low);

        let removed = queues.retain(|e| e.pid().as_u64() % 2 == 1);

        assert_eq!(removed, 2);
        assert_eq!(raw(queues.pids(QueueLevel::High)), vec![1, 3]);
        assert_eq!(raw(queues.pids(QueueLevel::Low)), vec![5]);

        queues.push(entry(6), QueueLevel::High);
        assert_eq!(raw(queues.pids(QueueLevel::High)), vec![1, 3, 6]);
    }

    #[test]
    fn test_clear() {
        let mut queues = filled(QueueLevel::Medium, &[entry(1), entry(2)]);
        queues.clear();

        assert!(queues.is_empty());
        assert!(!queues.contains(Pid::from_raw(1)));
    }
}
