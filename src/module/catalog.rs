//! Static table of known module descriptors.
//!
//! # Responsibilities
//! - Hold every descriptor the application can activate, keyed by module key
//! - Reject duplicate registrations
//! - Report dependencies that point at nothing
//!
//! # Design Decisions
//! - Built once at startup from explicit registrations
//! - Lookups of unknown keys name the module that asked for them

use std::collections::HashMap;

use crate::module::{ModuleDescriptor, ModuleError, ModuleKey};

/// Known module descriptors by key.
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    descriptors: HashMap<ModuleKey, ModuleDescriptor>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor. Fails if the key is taken.
    pub fn register(&mut self, descriptor: ModuleDescriptor) -> Result<(), ModuleError> {
        let key = descriptor.key().clone();
        if self.descriptors.contains_key(&key) {
            return Err(ModuleError::DuplicateModule(key));
        }
        self.descriptors.insert(key, descriptor);
        Ok(())
    }

    /// Chainable form of [`register`](Self::register).
    pub fn with(mut self, descriptor: ModuleDescriptor) -> Result<Self, ModuleError> {
        self.register(descriptor)?;
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&ModuleDescriptor> {
        self.descriptors.get(key)
    }

    /// Look up a descriptor, reporting who needed it when it is missing.
    pub fn lookup(
        &self,
        key: &str,
        required_by: Option<&ModuleKey>,
    ) -> Result<&ModuleDescriptor, ModuleError> {
        self.descriptors
            .get(key)
            .ok_or_else(|| ModuleError::UnknownModule {
                key: ModuleKey::new(key),
                required_by: required_by.cloned(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.descriptors.contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<ModuleKey> {
        let mut keys: Vec<ModuleKey> = self.descriptors.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Descriptors sorted by key.
    pub fn descriptors(&self) -> Vec<&ModuleDescriptor> {
        let mut descriptors: Vec<&ModuleDescriptor> = self.descriptors.values().collect();
        descriptors.sort_by(|a, b| a.key().cmp(b.key()));
        descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Check that every declared dependency has a descriptor.
    ///
    /// Returns the first missing dependency found, in key order.
    pub fn check_dependencies(&self) -> Result<(), ModuleError> {
        for descriptor in self.descriptors() {
            for dep in descriptor.dependencies() {
                if !self.contains(dep.as_str()) {
                    return Err(ModuleError::UnknownModule {
                        key: dep.clone(),
                        required_by: Some(descriptor.key().clone()),
                    });
                }
            }
        }
        Ok(())
    }
}
