//! # Policy Registry
//!
//! Maps policy names to the modules that build them. Lookups happen once
//! per run, at configuration time; the per-tick path never touches the
//! registry.

use crate::{ConfigError, ConfigResult, Context, PolicyFlags, PolicyInfo, PolicyModule};
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use simsched_execution::scheduler::SchedulingPolicy;
use spin::RwLock;

/// Policy registry
pub struct PolicyRegistry {
    /// Registered modules by name
    modules: RwLock<BTreeMap<String, Box<dyn PolicyModule>>>,
}

impl PolicyRegistry {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            modules: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register a policy module under its own name
    pub fn register(&self, module: Box<dyn PolicyModule>) -> ConfigResult<()> {
        let info = module.info();
        let mut modules = self.modules.write();

        if modules.contains_key(info.name) {
            return Err(ConfigError::AlreadyRegistered(info.name.into()));
        }

        modules.insert(info.name.into(), module);
        log::info!("Registered policy: {} v{}", info.name, info.version);
        Ok(())
    }

    /// Remove a policy module
    pub fn unregister(&self, name: &str) -> ConfigResult<()> {
        self.modules
            .write()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ConfigError::UnknownPolicy(name.into()))
    }

    /// Build a fresh policy instance by name
    pub fn create(&self, name: &str, ctx: &Context) -> ConfigResult<Box<dyn SchedulingPolicy>> {
        let modules = self.modules.read();
        let module = modules.get(name).ok_or_else(|| {
            log::warn!("Unknown scheduling policy requested: '{}'", name);
            ConfigError::UnknownPolicy(name.into())
        })?;

        module.build(ctx)
    }

    /// Get policy metadata by name
    pub fn info(&self, name: &str) -> Option<PolicyInfo> {
        self.modules.read().get(name).map(|m| m.info())
    }

    /// Check if a policy is registered
    pub fn contains(&self, name: &str) -> bool {
        self.modules.read().contains_key(name)
    }

    /// Get all registered policy names, sorted
    pub fn names(&self) -> Vec<String> {
        self.modules.read().keys().cloned().collect()
    }

    /// Get all policies with a specific flag
    pub fn list_by_flag(&self, flag: PolicyFlags) -> Vec<PolicyInfo> {
        self.modules
            .read()
            .values()
            .map(|m| m.info())
            .filter(|info| info.flags.contains(flag))
            .collect()
    }

    /// Number of registered policies
    pub fn len(&self) -> usize {
        self.modules.read().len()
    }

    /// Check if no policy is registered
    pub fn is_empty(&self) -> bool {
        self.modules.read().is_empty()
    }
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for PolicyRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PolicyRegistry")
            .field("policies", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simsched_execution::scheduler::TickContext;
    use simsched_execution::Pid;

    /// Always picks the first process
    struct HeadPolicy;

    impl SchedulingPolicy for HeadPolicy {
        fn name(&self) -> &'static str {
            "head"
        }

        fn decide(&mut self, tick: &TickContext<'_>) -> Option<Pid> {
            tick.snapshot.first().map(|p| p.pid)
        }

        fn reset(&mut self) {}
    }

    struct HeadModule;

    impl PolicyModule for HeadModule {
        fn info(&self) -> PolicyInfo {
            PolicyInfo::new("head")
                .version(1, 0, 0)
                .description("Test policy")
        }

        fn build(&self, ctx: &Context) -> ConfigResult<Box<dyn SchedulingPolicy>> {
            match ctx.config("head.fail") {
                Some(value) => Err(ConfigError::invalid("head.fail", value)),
                None => Ok(Box::new(HeadPolicy)),
            }
        }
    }

    #[test]
    fn test_register_and_create() {
        let registry = PolicyRegistry::new();
        registry.register(Box::new(HeadModule)).expect("first registration");

        assert!(registry.contains("head"));
        assert_eq!(registry.len(), 1);

        let policy = registry.create("head", &Context::new());
        assert_eq!(policy.map(|p| p.name()), Ok("head"));
    }

    #[test]
    fn test_duplicate_registration() {
        let registry = PolicyRegistry::new();
        registry.register(Box::new(HeadModule)).expect("first registration");

        assert_eq!(
            registry.register(Box::new(HeadModule)),
            Err(ConfigError::AlreadyRegistered("head".into()))
        );
    }

    #[test]
    fn test_unknown_policy() {
        let registry = PolicyRegistry::new();

        let result = registry.create("lottery", &Context::new());
        assert_eq!(
            result.map(|p| p.name()),
            Err(ConfigError::UnknownPolicy("lottery".into()))
        );
        assert!(registry.unregister("lottery").is_err());
    }

    #[test]
    fn test_build_error_propagates() {
        let registry = PolicyRegistry::new();
        registry.register(Box::new(HeadModule)).expect("first registration");

        let ctx = Context::new().with("head.fail", "yes");
        assert_eq!(
            registry.create("head", &ctx).map(|p| p.name()),
            Err(ConfigError::invalid("head.fail", "yes"))
        );
    }

    #[test]
    fn test_unregister() {
        let registry = PolicyRegistry::new();
        registry.register(Box::new(HeadModule)).expect("first registration");
        registry.unregister("head").expect("registered");

        assert!(registry.is_empty());
        assert!(registry.info("head").is_none());
    }
}
