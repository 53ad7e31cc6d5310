//! Module instance cache.
//!
//! # Responsibilities
//! - Map each module key to its single runtime instance
//! - Construct instances lazily, on first request
//!
//! # Design Decisions
//! - DashMap entry API: construction happens under the key's shard lock, so a
//!   factory runs at most once per key even with concurrent callers, without a
//!   registry-wide lock
//! - Instances are never evicted; the registry lives as long as its host
//! - A failed construction leaves no entry behind

use std::sync::Arc;

use dashmap::DashMap;

use crate::module::{Module, ModuleDescriptor, ModuleError, ModuleKey};

/// Singleton-per-key cache of module instances.
#[derive(Default)]
pub struct ModuleRegistry {
    instances: DashMap<ModuleKey, Arc<dyn Module>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached instance for the descriptor, constructing it if absent.
    pub fn get_or_create(
        &self,
        descriptor: &ModuleDescriptor,
    ) -> Result<Arc<dyn Module>, ModuleError> {
        if let Some(instance) = self.instances.get(descriptor.key()) {
            return Ok(Arc::clone(instance.value()));
        }

        let entry = self
            .instances
            .entry(descriptor.key().clone())
            .or_try_insert_with(|| {
                tracing::debug!(module = %descriptor.key(), "Constructing module");
                descriptor
                    .construct()
                    .map_err(|source| ModuleError::InstantiationFailed {
                        key: descriptor.key().clone(),
                        source,
                    })
            })?;

        Ok(Arc::clone(entry.value()))
    }

    /// Cached instance, if the module was constructed already.
    pub fn instance(&self, key: &str) -> Option<Arc<dyn Module>> {
        self.instances.get(key).map(|r| Arc::clone(r.value()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.instances.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<ModuleKey> = self.instances.iter().map(|r| r.key().clone()).collect();
        keys.sort();
        f.debug_struct("ModuleRegistry").field("instances", &keys).finish()
    }
}
