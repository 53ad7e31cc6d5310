//! Write side of the service registry.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::services::ServiceProvider;

pub(crate) type ServiceEntry = Box<dyn Any + Send + Sync>;

/// Services registered during Phase A.
#[derive(Default)]
pub struct ServiceCollection {
    entries: HashMap<TypeId, (&'static str, ServiceEntry)>,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a singleton, replacing any previous registration of `T`.
    pub fn add_singleton<T>(&mut self, service: Arc<T>) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let name = std::any::type_name::<T>();
        if self
            .entries
            .insert(TypeId::of::<T>(), (name, Box::new(service)))
            .is_some()
        {
            tracing::debug!(service = name, "Service registration replaced");
        }
        self
    }

    /// Register a singleton only if `T` has no registration yet.
    ///
    /// Returns `true` when the service was inserted.
    pub fn try_add_singleton<T>(&mut self, service: Arc<T>) -> bool
    where
        T: ?Sized + Send + Sync + 'static,
    {
        if self.contains::<T>() {
            return false;
        }
        self.add_singleton(service);
        true
    }

    pub fn contains<T>(&self) -> bool
    where
        T: ?Sized + 'static,
    {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the collection into a read-only provider.
    pub fn build(self) -> ServiceProvider {
        ServiceProvider::new(self.entries)
    }
}

impl std::fmt::Debug for ServiceCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.entries.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        f.debug_struct("ServiceCollection").field("services", &names).finish()
    }
}
