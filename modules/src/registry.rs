//! # Policy Registry
//!
//! Name-keyed table of policy factories. A factory runs once per
//! simulation, so no policy state leaks from one run into the next.

use crate::{RegistryError, RegistryResult};
use schedsim_execution::{ExecResult, Scheduler, SimConfig};
use std::collections::BTreeMap;

use schedsim_scheduler_basic::{FifoScheduler, SjfScheduler, StcfScheduler};

/// Builds a fresh policy for one simulation run
pub type PolicyFactory = fn(&SimConfig) -> ExecResult<Box<dyn Scheduler>>;

/// A registered policy
#[derive(Debug, Clone)]
pub struct RegisteredPolicy {
    /// Lookup name (lowercase)
    pub name: String,
    /// One-line description shown by `--list`
    pub description: &'static str,
    /// Factory
    pub factory: PolicyFactory,
}

/// Policy registry
#[derive(Debug, Default)]
pub struct PolicyRegistry {
    /// Policies by lowercase name
    policies: BTreeMap<String, RegisteredPolicy>,
}

impl PolicyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            policies: BTreeMap::new(),
        }
    }

    /// Create a registry holding every builtin policy
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for &(name, description, factory) in BUILTIN {
            if let Err(err) = registry.register(name, description, factory) {
                log::warn!("Skipping builtin policy: {}", err);
            }
        }
        registry
    }

    /// Register a policy under `name`
    pub fn register(
        &mut self,
        name: &str,
        description: &'static str,
        factory: PolicyFactory,
    ) -> RegistryResult<()> {
        let key = normalize(name);
        if self.policies.contains_key(&key) {
            return Err(RegistryError::AlreadyExists(key));
        }

        log::info!("Registered policy: {}", key);
        self.policies.insert(
            key.clone(),
            RegisteredPolicy {
                name: key,
                description,
                factory,
            },
        );
        Ok(())
    }

    /// Build a fresh instance of the named policy
    pub fn create(&self, name: &str, config: &SimConfig) -> RegistryResult<Box<dyn Scheduler>> {
        let key = normalize(name);
        let policy = self
            .policies
            .get(&key)
            .ok_or_else(|| RegistryError::UnknownPolicy(name.to_string()))?;

        log::debug!("Creating policy: {}", key);
        Ok((policy.factory)(config)?)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.policies.keys().map(String::as_str).collect()
    }

    /// Check if a policy is registered
    pub fn contains(&self, name: &str) -> bool {
        self.policies.contains_key(&normalize(name))
    }

    /// Description of a registered policy
    pub fn describe(&self, name: &str) -> Option<&'static str> {
        self.policies.get(&normalize(name)).map(|p| p.description)
    }

    /// All registered policies, sorted by name
    pub fn list_all(&self) -> impl Iterator<Item = &RegisteredPolicy> {
        self.policies.values()
    }

    /// Number of registered policies
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Check if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

/// Registry keys are trimmed and lowercase
fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

// =============================================================================
// Builtin Policies
// =============================================================================

const BUILTIN: &[(&str, &str, PolicyFactory)] = &[
    ("fifo", "first come, first served", create_fifo),
    ("sjf", "shortest job first, non-preemptive", create_sjf),
    ("stcf", "shortest time-to-completion first, preemptive", create_stcf),
    ("rr", "round robin with a 50ms slice", create_round_robin),
    ("mlfq", "multi-level feedback queue", create_mlfq),
];

fn create_fifo(_: &SimConfig) -> ExecResult<Box<dyn Scheduler>> {
    Ok(Box::new(FifoScheduler::new()))
}

fn create_sjf(_: &SimConfig) -> ExecResult<Box<dyn Scheduler>> {
    Ok(Box::new(SjfScheduler::new()))
}

fn create_stcf(_: &SimConfig) -> ExecResult<Box<dyn Scheduler>> {
    Ok(Box::new(StcfScheduler::new()))
}

fn create_round_robin(_: &SimConfig) -> ExecResult<Box<dyn Scheduler>> {
    Ok(Box::new(schedsim_scheduler_round_robin::create_scheduler()?))
}

fn create_mlfq(config: &SimConfig) -> ExecResult<Box<dyn Scheduler>> {
    Ok(Box::new(schedsim_scheduler_mlfq::create_scheduler(config)?))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use schedsim_execution::ExecError;

    fn failing(_: &SimConfig) -> ExecResult<Box<dyn Scheduler>> {
        Err(ExecError::InvalidConfig("nope".into()))
    }

    #[test]
    fn test_builtin_names_sorted() {
        let registry = PolicyRegistry::with_builtin();
        assert_eq!(registry.names(), vec!["fifo", "mlfq", "rr", "sjf", "stcf"]);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_create_returns_named_policy() {
        let registry = PolicyRegistry::with_builtin();
        let config = SimConfig::default();
        for name in registry.names() {
            let policy = registry.create(name, &config).unwrap();
            assert_eq!(policy.name(), name);
        }
    }

    #[test]
    fn test_lookup_ignores_case() {
        let registry = PolicyRegistry::with_builtin();
        assert!(registry.contains("MLFQ"));
        assert_eq!(
            registry.create("Rr", &SimConfig::default()).unwrap().name(),
            "rr"
        );
        assert!(registry.describe("FiFo").is_some());
    }

    #[test]
    fn test_unknown_policy() {
        let registry = PolicyRegistry::with_builtin();
        let err = registry.create("lottery", &SimConfig::default()).unwrap_err();
        assert_eq!(err, RegistryError::UnknownPolicy("lottery".into()));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = PolicyRegistry::with_builtin();
        let err = registry.register("FIFO", "again", create_fifo).unwrap_err();
        assert_eq!(err, RegistryError::AlreadyExists("fifo".into()));
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_factory_error_propagates() {
        let mut registry = PolicyRegistry::new();
        registry.register("broken", "always fails", failing).unwrap();
        let err = registry.create("broken", &SimConfig::default()).unwrap_err();
        assert!(matches!(err, RegistryError::Policy(ExecError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_registry() {
        let registry = PolicyRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.names().is_empty());
    }
}
