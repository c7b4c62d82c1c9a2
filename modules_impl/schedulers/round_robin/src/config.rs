//! # Round-Robin Scheduler Configuration

use simsched_modules::{ConfigResult, Context};

/// How the round-robin cursor tracks its place between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// The cursor is an index into whatever order the snapshot has this
    /// tick. If the harness reorders or drops processes, the rotation can
    /// skip or repeat a process.
    #[default]
    Positional,
    /// The cursor follows the pid that ran last and continues with the
    /// process after it in the current snapshot.
    Identity,
}

impl CursorMode {
    /// Configuration spelling
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positional => "positional",
            Self::Identity => "identity",
        }
    }
}

impl core::str::FromStr for CursorMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positional" => Ok(Self::Positional),
            "identity" => Ok(Self::Identity),
            _ => Err(()),
        }
    }
}

/// Configuration for the round-robin scheduler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundRobinConfig {
    /// Cursor tracking mode
    pub cursor: CursorMode,
}

impl RoundRobinConfig {
    /// Configuration key for the cursor mode
    pub const CURSOR_KEY: &'static str = "rr.cursor";

    /// Create default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor follows snapshot positions
    pub fn positional() -> Self {
        Self {
            cursor: CursorMode::Positional,
        }
    }

    /// Cursor follows process identity
    pub fn identity() -> Self {
        Self {
            cursor: CursorMode::Identity,
        }
    }

    /// Read overrides from a configuration context
    pub fn from_context(ctx: &Context) -> ConfigResult<Self> {
        let mut config = Self::new();

        if let Some(cursor) = ctx.config_parse(Self::CURSOR_KEY)? {
            config.cursor = cursor;
        }

        Ok(config)
    }
}
