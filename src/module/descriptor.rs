//! Module identity and declared dependencies.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use crate::module::{BoxError, DeclaredModule, Module};

/// Stable identity of a module kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey(Arc<str>);

impl ModuleKey {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ModuleKey {
    fn from(key: String) -> Self {
        Self(Arc::from(key))
    }
}

impl Borrow<str> for ModuleKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModuleKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ModuleKey {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ModuleKey {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

type ModuleFactory = Arc<dyn Fn() -> Result<Arc<dyn Module>, BoxError> + Send + Sync>;

/// Declared identity, dependency list and constructor of a module.
///
/// Immutable once built.
#[derive(Clone)]
pub struct ModuleDescriptor {
    key: ModuleKey,
    dependencies: Vec<ModuleKey>,
    factory: ModuleFactory,
}

impl ModuleDescriptor {
    /// Start describing a module by key.
    pub fn builder(key: impl Into<ModuleKey>) -> DescriptorBuilder {
        DescriptorBuilder {
            key: key.into(),
            dependencies: Vec::new(),
        }
    }

    /// Descriptor for a module type that declares its own key and dependencies.
    pub fn of<M: DeclaredModule>() -> Self {
        M::DEPENDS_ON
            .iter()
            .fold(Self::builder(M::KEY), |builder, dep| builder.depends_on(*dep))
            .factory(|| M::create())
    }

    pub fn key(&self) -> &ModuleKey {
        &self.key
    }

    /// Dependency keys in declaration order.
    pub fn dependencies(&self) -> &[ModuleKey] {
        &self.dependencies
    }

    /// Run the module's constructor.
    pub(crate) fn construct(&self) -> Result<Arc<dyn Module>, BoxError> {
        (self.factory)()
    }
}

impl fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("key", &self.key)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ModuleDescriptor`]. Finished by supplying the factory.
#[derive(Debug)]
pub struct DescriptorBuilder {
    key: ModuleKey,
    dependencies: Vec<ModuleKey>,
}

impl DescriptorBuilder {
    /// Declare a dependency by key. Repeated keys are kept once.
    pub fn depends_on(mut self, key: impl Into<ModuleKey>) -> Self {
        let key = key.into();
        if !self.dependencies.contains(&key) {
            self.dependencies.push(key);
        }
        self
    }

    /// Declare a dependency on a module type.
    pub fn depends_on_module<M: DeclaredModule>(self) -> Self {
        self.depends_on(M::KEY)
    }

    /// Finish with a fallible constructor.
    pub fn factory<M, F>(self, factory: F) -> ModuleDescriptor
    where
        M: Module,
        F: Fn() -> Result<M, BoxError> + Send + Sync + 'static,
    {
        ModuleDescriptor {
            key: self.key,
            dependencies: self.dependencies,
            factory: Arc::new(move || factory().map(|module| Arc::new(module) as Arc<dyn Module>)),
        }
    }

    /// Finish with a constructor that cannot fail.
    pub fn with<M, F>(self, constructor: F) -> ModuleDescriptor
    where
        M: Module,
        F: Fn() -> M + Send + Sync + 'static,
    {
        self.factory(move || Ok(constructor()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Billing;

    impl Module for Billing {}

    impl DeclaredModule for Billing {
        const KEY: &'static str = "billing";
        const DEPENDS_ON: &'static [&'static str] = &["identity", "storage"];

        fn create() -> Result<Self, BoxError> {
            Ok(Self)
        }
    }

    struct Noop;

    impl Module for Noop {}

    #[test]
    fn test_descriptor_from_declared_module() {
        let descriptor = ModuleDescriptor::of::<Billing>();
        assert_eq!(descriptor.key(), "billing");
        assert_eq!(
            descriptor.dependencies(),
            &[ModuleKey::from("identity"), ModuleKey::from("storage")]
        );
        assert!(descriptor.construct().is_ok());
    }

    #[test]
    fn test_builder_deduplicates_dependencies() {
        let descriptor = ModuleDescriptor::builder("reports")
            .depends_on("billing")
            .depends_on_module::<Billing>()
            .depends_on("storage")
            .with(|| Noop);

        assert_eq!(descriptor.dependencies().len(), 2);
        assert_eq!(descriptor.dependencies()[0], "billing");
        assert_eq!(descriptor.dependencies()[1], "storage");
    }

    #[test]
    fn test_factory_error_is_returned() {
        let descriptor = ModuleDescriptor::builder("broken").factory(|| -> Result<Noop, BoxError> {
            Err("no database url".into())
        });

        let err = descriptor.construct().err().expect("factory should fail");
        assert_eq!(err.to_string(), "no database url");
    }

    #[test]
    fn test_key_compares_with_str() {
        let key = ModuleKey::from("health".to_string());
        assert_eq!(key, "health");
        assert_eq!(key.to_string(), "health");
        assert_eq!(key.as_str(), "health");
    }
}
