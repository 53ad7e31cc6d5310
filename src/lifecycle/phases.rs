//! Two-phase module lifecycle.
//!
//! # Phases
//! ```text
//! Phase A  configure_services   every module, activation order → ServiceCollection
//!          freeze               ServiceCollection → Arc<ServiceProvider>
//! Phase B  configure            every module, activation order → Pipeline
//! ```
//!
//! # Design Decisions
//! - Phase A completes for every module before Phase B starts for any
//! - Fail fast: the first callback error aborts the activation
//! - A panicking callback (e.g. axum rejecting an overlapping route) is
//!   reported as that module's activation error
//! - The activation order itself is registered as a service before Phase A

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::Environment;
use crate::http::Pipeline;
use crate::module::{BoxError, ModuleError, ModuleKey, Phase, ResolvedModule};
use crate::observability::metrics;
use crate::services::{ServiceCollection, ServiceProvider};

/// Activation order, available to modules as a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivatedModules {
    pub order: Vec<String>,
}

/// Result of a completed activation.
pub struct Activation {
    pub order: Vec<ModuleKey>,
    pub services: Arc<ServiceProvider>,
    pub router: Router,
}

impl std::fmt::Debug for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Activation")
            .field("order", &self.order)
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}

/// Run both lifecycle phases over modules in activation order.
pub fn run_phases(
    modules: &[ResolvedModule],
    mut services: ServiceCollection,
    environment: &Environment,
) -> Result<Activation, ModuleError> {
    let order: Vec<ModuleKey> = modules.iter().map(|m| m.key.clone()).collect();
    services.add_singleton(Arc::new(ActivatedModules {
        order: order.iter().map(ToString::to_string).collect(),
    }));

    for module in modules {
        run_callback(&module.key, Phase::ConfigureServices, || {
            module.instance.configure_services(&mut services)
        })?;
    }

    let services = Arc::new(services.build());
    info!(
        modules = modules.len(),
        services = services.len(),
        "Service registration complete"
    );

    let mut pipeline = Pipeline::new(Arc::clone(&services));
    for module in modules {
        run_callback(&module.key, Phase::Configure, || {
            module.instance.configure(&mut pipeline, environment)
        })?;
    }

    metrics::record_activated(order.len());
    Ok(Activation {
        order,
        services,
        router: pipeline.into_router(),
    })
}

fn run_callback<F>(key: &ModuleKey, phase: Phase, callback: F) -> Result<(), ModuleError>
where
    F: FnOnce() -> Result<(), BoxError>,
{
    let started = Instant::now();
    let result = panic::catch_unwind(AssertUnwindSafe(callback))
        .unwrap_or_else(|payload| Err(panic_message(payload).into()));
    let elapsed = started.elapsed();
    metrics::record_phase(key, phase, elapsed);

    match result {
        Ok(()) => {
            debug!(module = %key, phase = %phase, elapsed = ?elapsed, "Module phase complete");
            Ok(())
        }
        Err(source) => {
            error!(module = %key, phase = %phase, error = %source, "Module phase failed");
            metrics::record_failure(key, phase);
            Err(ModuleError::Activation {
                key: key.clone(),
                phase,
                source,
            })
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("panicked: {message}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Module;
    use std::sync::Mutex;

    struct Recording {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
        fail_in: Option<Phase>,
    }

    impl Module for Recording {
        fn configure_services(&self, _services: &mut ServiceCollection) -> Result<(), BoxError> {
            self.log.lock().unwrap().push(format!("{}.configure_services", self.name));
            if self.fail_in == Some(Phase::ConfigureServices) {
                return Err("registration failed".into());
            }
            Ok(())
        }

        fn configure(

            &self,

            _pipeline: &mut Pipeline,

            _environment: &Environment,

        ) -> Result<(), BoxError> {
            self.log.lock().unwrap().push(format!("{}.configure", self.name));
            if self.fail_in == Some(Phase::Configure) {
                return Err("pipeline failed".into());
            }
            Ok(())
        }
    }

    fn modules(
        names: &[&'static str],
        log: &Arc<Mutex<Vec<String>>>,
        fail: Option<(&str, Phase)>,
    ) -> Vec<ResolvedModule> {
        names
            .iter()
            .map(|name| ResolvedModule {
                key: ModuleKey::from(*name),
                instance: Arc::new(Recording {
                    name: *name,
                    log: Arc::clone(log),
                    fail_in: fail.filter(|(f, _)| f == name).map(|(_, phase)| phase),
                }),
            })
            .collect()
    }

    #[test]
    fn test_phase_a_completes_before_phase_b() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let activation = run_phases(
            &modules(&["c", "b", "a"], &log, None),
            ServiceCollection::new(),
            &Environment::default(),
        )
        .unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "c.configure_services",
                "b.configure_services",
                "a.configure_services",
                "c.configure",
                "b.configure",
                "a.configure",
            ]
        );
        let activated = activation.services.require::<ActivatedModules>().unwrap();
        assert_eq!(activated.order, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_failure_in_phase_a_stops_everything() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let err = run_phases(
            &modules(&["c", "b", "a"], &log, Some(("b", Phase::ConfigureServices))),
            ServiceCollection::new(),
            &Environment::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ModuleError::Activation { ref key, phase: Phase::ConfigureServices, .. } if key == "b"
        ));
        assert_eq!(*log.lock().unwrap(), vec!["c.configure_services", "b.configure_services"]);
    }

    #[test]
    fn test_failure_in_phase_b_stops_remaining_modules() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let err = run_phases(
            &modules(&["c", "b", "a"], &log, Some(("c", Phase::Configure))),
            ServiceCollection::new(),
            &Environment::default(),
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "module `c` failed during configure: pipeline failed");
        assert_eq!(log.lock().unwrap().last().map(String::as_str), Some("c.configure"));
        assert_eq!(log.lock().unwrap().len(), 4);
    }

    struct Panicking;

    impl Module for Panicking {
        fn configure_services(&self, _services: &mut ServiceCollection) -> Result<(), BoxError> {
            panic!("registration exploded");
        }
    }

    #[test]
    fn test_panicking_callback_becomes_activation_error() {
        let modules = vec![ResolvedModule {
            key: ModuleKey::from("boom"),
            instance: Arc::new(Panicking),
        }];

        let err =
            run_phases(&modules, ServiceCollection::new(), &Environment::default()).unwrap_err();

        assert!(matches!(
            err,
            ModuleError::Activation { ref key, phase: Phase::ConfigureServices, .. }
                if key == "boom"
        ));
        assert_eq!(
            err.to_string(),
            "module `boom` failed during configure_services: panicked: registration exploded"
        );
    }
}
