//! Read side of the service registry.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::services::collection::ServiceEntry;

/// Errors returned when reading services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No module registered a service of this type.
    #[error("service `{0}` is not registered")]
    Missing(&'static str),
}

/// Frozen, read-only view of the registered services.
pub struct ServiceProvider {
    entries: HashMap<TypeId, (&'static str, ServiceEntry)>,
}

impl ServiceProvider {
    pub(crate) fn new(entries: HashMap<TypeId, (&'static str, ServiceEntry)>) -> Self {
        Self { entries }
    }

    /// Look up a service by type.
    pub fn get<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|(_, entry)| entry.downcast_ref::<Arc<T>>())
            .cloned()
    }

    /// Look up a service that must exist.
    pub fn require<T>(&self) -> Result<Arc<T>, ServiceError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.get::<T>()
            .ok_or(ServiceError::Missing(std::any::type_name::<T>()))
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
}

impl Default for ServiceProvider {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl std::fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.entries.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        f.debug_struct("ServiceProvider").field("services", &names).finish()
    }
}
