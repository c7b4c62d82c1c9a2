//! # MLFQ Configuration

use simsched_execution::Tick;
use simsched_modules::{ConfigError, ConfigResult, Context};

/// What happens to the previously running process when it is demoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequeuePolicy {
    /// Re-queue it whenever the harness reports a running process, even if
    /// it has since left the snapshot. A finished process can then be
    /// selected again.
    Always,
    /// Re-queue it only while it is still in the snapshot, and drop queued
    /// entries whose process has left.
    #[default]
    Alive,
}

impl RequeuePolicy {
    /// Configuration spelling
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Alive => "alive",
        }
    }
}

impl core::str::FromStr for RequeuePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Self::Always),
            "alive" => Ok(Self::Alive),
            _ => Err(()),
        }
    }
}

/// Configuration for the MLFQ scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MlfqConfig {
    /// Ticks between priority boosts, never zero
    boost_interval: Tick,
    /// Demotion re-queue rule
    pub requeue: RequeuePolicy,
}

impl MlfqConfig {
    /// Default boost interval: 1000 ticks
    pub const DEFAULT_BOOST_INTERVAL: Tick = 1000;

    /// Configuration key for the boost interval
    pub const BOOST_INTERVAL_KEY: &'static str = "mlfq.boost_interval";

    /// Configuration key for the re-queue rule
    pub const REQUEUE_KEY: &'static str = "mlfq.requeue";

    /// Create default configuration
    pub fn new() -> Self {
        Self {
            boost_interval: Self::DEFAULT_BOOST_INTERVAL,
            requeue: RequeuePolicy::default(),
        }
    }

    /// Re-queue exactly like the classic simulator, stale processes included
    pub fn parity() -> Self {
        Self {
            requeue: RequeuePolicy::Always,
            ..Self::new()
        }
    }

    /// Set the boost interval
    ///
    /// Zero is rejected.
    pub fn with_boost_interval(mut self, interval: Tick) -> ConfigResult<Self> {
        if interval == 0 {
            return Err(ConfigError::invalid(Self::BOOST_INTERVAL_KEY, "0"));
        }
        self.boost_interval = interval;
        Ok(self)
    }

    /// Ticks between priority boosts
    ///
    /// A boost fires when `now % interval == 0`.
    pub fn boost_interval(&self) -> Tick {
        self.boost_interval
    }

    /// Set the re-queue rule
    pub fn with_requeue(mut self, requeue: RequeuePolicy) -> Self {
        self.requeue = requeue;
        self
    }

    /// Check if a boost is due at this tick
    pub fn is_boost_tick(&self, now: Tick) -> bool {
        now % self.boost_interval == 0
    }

    /// Apply overrides from a configuration context
    pub fn apply(mut self, ctx: &Context) -> ConfigResult<Self> {
        if let Some(interval) = ctx.config_u64(Self::BOOST_INTERVAL_KEY)? {
            self = self.with_boost_interval(interval)?;
        }
        if let Some(requeue) = ctx.config_parse(Self::REQUEUE_KEY)? {
            self.requeue = requeue;
        }
        Ok(self)
    }

    /// Read configuration from a context, starting from defaults
    pub fn from_context(ctx: &Context) -> ConfigResult<Self> {
        Self::new().apply(ctx)
    }
}

impl Default for MlfqConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MlfqConfig::default();

        assert_eq!(config.boost_interval(), 1000);
        assert_eq!(config.requeue, RequeuePolicy::Alive);
        assert!(config.is_boost_tick(0));
        assert!(config.is_boost_tick(2000));
        assert!(!config.is_boost_tick(999));
    }

    #[test]
    fn test_from_context() {
        let ctx = Context::new()
            .with("mlfq.boost_interval", "250")
            .with("mlfq.requeue", "always");

        let config = MlfqConfig::from_context(&ctx).expect("valid config");
        assert_eq!(config.boost_interval(), 250);
        assert_eq!(config.requeue, RequeuePolicy::Always);
        assert_eq!(config.requeue.as_str(), "always");
    }

    #[test]
    fn test_zero_interval_rejected() {
        let ctx = Context::new().with("mlfq.boost_interval", "0");

        assert_eq!(
            MlfqConfig::from_context(&ctx),
            Err(ConfigError::invalid("mlfq.boost_interval", "0"))
        );
    }

    #[test]
    fn test_unknown_requeue_rejected() {
        let ctx = Context::new().with("mlfq.requeue", "sometimes");

        assert_eq!(
            MlfqConfig::from_context(&ctx),
            Err(ConfigError::invalid("mlfq.requeue", "sometimes"))
        );
    }

    #[test]
    fn test_parity_preset() {
        let config = MlfqConfig::parity();
        assert_eq!(config.requeue, RequeuePolicy::Always);
        assert_eq!(config.boost_interval(), MlfqConfig::DEFAULT_BOOST_INTERVAL);
    }
}
