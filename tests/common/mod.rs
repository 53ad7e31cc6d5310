//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use module_host::config::Environment;
use module_host::module::{BoxError, Module, ModuleCatalog, ModuleDescriptor, Phase};
use module_host::{Pipeline, ServiceCollection};

/// Ordered log of lifecycle calls, shared by every recording module.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Per-key constructor call counts.
#[derive(Clone, Default)]
pub struct ConstructionCounter(Arc<Mutex<HashMap<String, Arc<AtomicUsize>>>>);

impl ConstructionCounter {
    fn slot(&self, key: &str) -> Arc<AtomicUsize> {
        Arc::clone(self.0.lock().unwrap().entry(key.to_string()).or_default())
    }

    pub fn count(&self, key: &str) -> usize {
        self.slot(key).load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.0
            .lock()
            .unwrap()
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }
}

/// Module that logs its callbacks and optionally fails in one phase.
pub struct RecordingModule {
    key: String,
    log: CallLog,
    fail_in: Option<Phase>,
}

impl Module for RecordingModule {
    fn configure_services(&self, _services: &mut ServiceCollection) -> Result<(), BoxError> {
        self.log.push(format!("{}.ConfigureServices", self.key));
        if self.fail_in == Some(Phase::ConfigureServices) {
            return Err(format!("{} could not register services", self.key).into());
        }
        Ok(())
    }

    fn configure(

        &self,

        _pipeline: &mut Pipeline,

        _environment: &Environment,

    ) -> Result<(), BoxError> {
        self.log.push(format!("{}.Configure", self.key));
        if self.fail_in == Some(Phase::Configure) {
            return Err(format!("{} could not configure pipeline", self.key).into());
        }
        Ok(())
    }
}

/// Builds catalogs of recording modules from an adjacency list.
pub struct TestGraph {
    pub log: CallLog,
    pub constructed: ConstructionCounter,
    failures: HashMap<String, Phase>,
}

impl TestGraph {
    pub fn new() -> Self {
        Self {
            log: CallLog::default(),
            constructed: ConstructionCounter::default(),
            failures: HashMap::new(),
        }
    }

    /// Make `key` fail during `phase`.
    pub fn failing(mut self, key: &str, phase: Phase) -> Self {
        self.failures.insert(key.to_string(), phase);
        self
    }

    pub fn catalog(&self, graph: &[(&str, &[&str])]) -> ModuleCatalog {
        let mut catalog = ModuleCatalog::new();
        for (key, deps) in graph {
            let key = key.to_string();
            let log = self.log.clone();
            let counter = self.constructed.slot(&key);
            let fail_in = self.failures.get(&key).copied();

            let descriptor = deps
                .iter()
                .fold(ModuleDescriptor::builder(key.as_str()), |b, d| b.depends_on(*d))
                .with(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    RecordingModule {
                        key: key.clone(),
                        log: log.clone(),
                        fail_in,
                    }
                });
            catalog.register(descriptor).unwrap();
        }
        catalog
    }
}
