//! # Feedback Queue Levels
//!
//! Defines the three priority levels of the feedback queue and how a
//! process moves between them.

/// Number of feedback levels
pub const LEVEL_COUNT: usize = 3;

static_assertions::const_assert_eq!(LEVEL_COUNT, QueueLevel::ALL.len());

/// Feedback queue level
///
/// Level 1 is the highest priority. Ordering follows priority, so
/// `QueueLevel::High > QueueLevel::Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueueLevel {
    /// Level 1: freshly admitted and boosted processes
    #[default]
    High,
    /// Level 2: processes that used one full tick at level 1
    Medium,
    /// Level 3: CPU-bound processes; the demotion floor
    Low,
}

impl QueueLevel {
    /// All levels, highest priority first (selection order)
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Create from a 1-based level number
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::High),
            2 => Some(Self::Medium),
            3 => Some(Self::Low),
            _ => None,
        }
    }

    /// Get the 1-based level number
    pub const fn number(self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Get the 0-based slot index
    pub const fn index(self) -> usize {
        self.number() as usize - 1
    }

    /// Level a process falls to after running for a tick
    ///
    /// `Low` is a sink: only a boost lifts a process out of it.
    pub const fn demoted(self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium | Self::Low => Self::Low,
        }
    }
}

impl PartialOrd for QueueLevel {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueLevel {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        // Lower number = higher priority
        other.number().cmp(&self.number())
    }
}

impl core::fmt::Display for QueueLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "L{}", self.number())
    }
}
