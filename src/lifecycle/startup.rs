//! Startup orchestration.
//!
//! # Responsibilities
//! - Own the module catalog and the instance registry for this process
//! - Resolve requested root modules into activation order
//! - Run the two lifecycle phases exactly once
//!
//! # Design Decisions
//! - Fail fast: any resolution or activation error is fatal
//! - Modules initialize in order, not concurrently
//! - A failed activation still consumes the single attempt; the caller is
//!   expected to exit instead of retrying on half-configured state

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::config::Environment;
use crate::lifecycle::phases::{run_phases, Activation};
use crate::module::{
    DependencyResolver, ModuleCatalog, ModuleError, ModuleRegistry, ResolutionPlan, ResolvedModule,
};
use crate::services::ServiceCollection;

/// Owns module state for one process and activates it once.
#[derive(Debug)]
pub struct ModuleHost {
    catalog: ModuleCatalog,
    registry: ModuleRegistry,
    environment: Environment,
    activated: AtomicBool,
}

impl ModuleHost {
    pub fn new(catalog: ModuleCatalog, environment: Environment) -> Self {
        Self {
            catalog,
            registry: ModuleRegistry::new(),
            environment,
            activated: AtomicBool::new(false),
        }
    }

    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Activation order for the roots, without constructing any module.
    pub fn plan<K: AsRef<str>>(&self, roots: &[K]) -> Result<ResolutionPlan, ModuleError> {
        DependencyResolver::new(&self.catalog).plan(roots)
    }

    /// Resolve the roots into instances, in activation order.
    ///
    /// Safe to call repeatedly and from several threads; every call returns
    /// the same instance for a given key.
    pub fn resolve<K: AsRef<str>>(&self, roots: &[K]) -> Result<Vec<ResolvedModule>, ModuleError> {
        DependencyResolver::new(&self.catalog).resolve(roots, &self.registry)
    }

    /// Activate the roots with an empty service collection.
    pub fn activate<K: AsRef<str>>(&self, roots: &[K]) -> Result<Activation, ModuleError> {
        self.activate_with(roots, ServiceCollection::new())
    }

    /// Activate the roots, seeding Phase A with host-provided services.
    pub fn activate_with<K: AsRef<str>>(
        &self,
        roots: &[K],
        services: ServiceCollection,
    ) -> Result<Activation, ModuleError> {
        if self
            .activated
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ModuleError::AlreadyActivated);
        }

        let modules = self.resolve(roots)?;
        info!(
            environment = %self.environment.name,
            order = ?modules.iter().map(|m| m.key.as_str()).collect::<Vec<_>>(),
            "Activating modules"
        );

        let activation = run_phases(&modules, services, &self.environment)?;
        info!(modules = activation.order.len(), "Module activation complete");
        Ok(activation)
    }

    pub fn is_activated(&self) -> bool {
        self.activated.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{BoxError, Module, ModuleDescriptor};
    use std::sync::Arc;

    struct Noop;

    impl Module for Noop {}

    struct NeedsConfig;

    impl Module for NeedsConfig {
        fn configure_services(&self, services: &mut ServiceCollection) -> Result<(), BoxError> {
            let greeting = "hello".to_string();
            services.add_singleton(Arc::new(greeting));
            Ok(())
        }
    }

    fn host() -> ModuleHost {
        let catalog = ModuleCatalog::new()
            .with(ModuleDescriptor::builder("api").depends_on("greeter").with(|| Noop))
            .unwrap()
            .with(ModuleDescriptor::builder("greeter").with(|| NeedsConfig))
            .unwrap();
        ModuleHost::new(catalog, Environment::default())
    }

    #[test]
    fn test_activate_once() {
        let host = host();
        let activation = host.activate(&["api"]).unwrap();
        assert_eq!(activation.order, vec!["greeter", "api"]);
        assert_eq!(activation.services.require::<String>().unwrap().as_str(), "hello");
        assert!(host.is_activated());

        let err = host.activate(&["api"]).unwrap_err();
        assert!(matches!(err, ModuleError::AlreadyActivated));
    }

    #[test]
    fn test_failed_activation_consumes_attempt() {
        let host = host();
        assert!(matches!(
            host.activate(&["missing"]).unwrap_err(),
            ModuleError::UnknownModule { .. }
        ));
        assert!(matches!(host.activate(&["api"]).unwrap_err(), ModuleError::AlreadyActivated));
    }

    #[test]
    fn test_seeded_services_visible() {
        let host = host();
        let mut services = ServiceCollection::new();
        services.add_singleton(Arc::new(7u16));

        let activation = host.activate_with(&["greeter"], services).unwrap();
        assert_eq!(*activation.services.require::<u16>().unwrap(), 7);
    }

    #[test]
    fn test_plan_does_not_construct() {
        let host = host();
        let plan = host.plan(&["api"]).unwrap();
        assert_eq!(plan.len(), 2);
        assert!(host.registry().is_empty());
    }
}
