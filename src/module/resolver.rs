//! Module dependency resolution.
//!
//! Turns a set of requested root modules into a dependency-first activation
//! order, then obtains one instance per module from the registry.
//!
//! # Algorithm
//! ```text
//! for each root (in request order):
//!     visit(root)
//!
//! visit(key):
//!     Done      → skip
//!     Visiting  → cycle: fail with the path from key back to key
//!     absent    → mark Visiting, visit each dependency in declared order,
//!                 mark Done, append key to the order
//!
//! The walk keeps its own stack of frames instead of recursing.
//! ```
//!
//! The whole order is computed before anything is constructed, so an unknown
//! key or a cycle leaves the registry untouched.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::module::{
    Module, ModuleCatalog, ModuleDescriptor, ModuleError, ModuleKey, ModuleRegistry,
};

/// Dependency-first order of the modules reachable from a root set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionPlan {
    order: Vec<ModuleKey>,
}

impl ResolutionPlan {
    /// Keys in activation order; dependencies precede dependents.
    pub fn order(&self) -> &[ModuleKey] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Position of a key in the order.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.order.iter().position(|k| k == key)
    }
}

/// A module instance paired with its key, in activation order.
#[derive(Clone)]
pub struct ResolvedModule {
    pub key: ModuleKey,
    pub instance: Arc<dyn Module>,
}

impl std::fmt::Debug for ResolvedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedModule").field("key", &self.key).finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// A module being visited and the index of its next dependency.
struct Frame<'c> {
    descriptor: &'c ModuleDescriptor,
    next: usize,
}

#[derive(Default)]
struct Traversal {
    marks: HashMap<ModuleKey, Mark>,
    path: Vec<ModuleKey>,
    order: Vec<ModuleKey>,
}

/// Resolves root modules against a catalog.
pub struct DependencyResolver<'a> {
    catalog: &'a ModuleCatalog,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(catalog: &'a ModuleCatalog) -> Self {
        Self { catalog }
    }

    /// Compute the activation order without constructing anything.
    pub fn plan<K: AsRef<str>>(&self, roots: &[K]) -> Result<ResolutionPlan, ModuleError> {
        let mut traversal = Traversal::default();
        for root in roots {
            self.visit(root.as_ref(), &mut traversal)?;
        }

        debug!(order = ?traversal.order, "Module resolution complete");
        Ok(ResolutionPlan {
            order: traversal.order,
        })
    }

    /// Compute the order and obtain each instance from the registry.
    pub fn resolve<K: AsRef<str>>(
        &self,
        roots: &[K],
        registry: &ModuleRegistry,
    ) -> Result<Vec<ResolvedModule>, ModuleError> {
        let plan = self.plan(roots)?;
        self.instantiate(&plan, registry)
    }

    /// Obtain instances for an already computed plan, in plan order.
    pub fn instantiate(
        &self,
        plan: &ResolutionPlan,
        registry: &ModuleRegistry,
    ) -> Result<Vec<ResolvedModule>, ModuleError> {
        plan.order()
            .iter()
            .map(|key| {
                let descriptor = self.catalog.lookup(key.as_str(), None)?;
                Ok(ResolvedModule {
                    key: key.clone(),
                    instance: registry.get_or_create(descriptor)?,
                })
            })
            .collect()
    }

    /// Depth-first walk from one root with an explicit stack, so chain
    /// length is bounded by memory rather than by the thread's stack.
    fn visit(&self, root: &str, traversal: &mut Traversal) -> Result<(), ModuleError> {
        let mut stack: Vec<Frame<'a>> = Vec::new();
        if let Some(frame) = self.enter(root, None, traversal)? {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let descriptor = frame.descriptor;
            match descriptor.dependencies().get(frame.next) {
                Some(dep) => {
                    frame.next += 1;
                    let child = self.enter(dep.as_str(), Some(descriptor.key()), traversal)?;
                    if let Some(child) = child {
                        stack.push(child);
                    }
                }
                None => {
                    stack.pop();
                    let key = descriptor.key();
                    traversal.path.pop();
                    traversal.marks.insert(key.clone(), Mark::Done);
                    traversal.order.push(key.clone());
                }
            }
        }
        Ok(())
    }

    /// Mark `key` as in progress. `None` when it is already placed.
    fn enter(
        &self,
        key: &str,
        required_by: Option<&ModuleKey>,
        traversal: &mut Traversal,
    ) -> Result<Option<Frame<'a>>, ModuleError> {
        let descriptor = self.catalog.lookup(key, required_by)?;
        let key = descriptor.key();

        match traversal.marks.get(key) {
            Some(Mark::Done) => return Ok(None),
            Some(Mark::Visiting) => {
                let start = traversal.path.iter().position(|k| k == key).unwrap_or(0);
                let mut cycle = traversal.path[start..].to_vec();
                cycle.push(key.clone());
                return Err(ModuleError::CircularDependency {
                    key: key.clone(),
                    cycle,
                });
            }
            None => {}
        }

        traversal.marks.insert(key.clone(), Mark::Visiting);
        traversal.path.push(key.clone());
        Ok(Some(Frame { descriptor, next: 0 }))
    }
}
