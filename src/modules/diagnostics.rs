//! Module activation diagnostics.
//!
//! Serves `GET /_modules` with the activation order. Hidden in production
//! unless `modules.expose_diagnostics` is set.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::config::{Environment, ModulesConfig};
use crate::http::Pipeline;
use crate::lifecycle::ActivatedModules;
use crate::module::{BoxError, DeclaredModule, Module};
use crate::modules::HealthModule;

#[derive(Debug, Clone, Serialize)]
pub struct ModulesReport {
    pub environment: String,
    pub modules: Vec<String>,
}

#[derive(Debug, Default)]
pub struct DiagnosticsModule;

impl Module for DiagnosticsModule {
    fn configure(
        &self,
        pipeline: &mut Pipeline,
        environment: &Environment,
    ) -> Result<(), BoxError> {
        let forced = pipeline
            .services()
            .get::<ModulesConfig>()
            .map(|config| config.expose_diagnostics)
            .unwrap_or(false);

        if environment.is_production() && !forced {
            tracing::debug!("Diagnostics endpoint disabled in production");
            return Ok(());
        }

        let activated = pipeline.services().require::<ActivatedModules>()?;
        let report = Arc::new(ModulesReport {
            environment: environment.name.to_string(),
            modules: activated.order.clone(),
        });

        pipeline.merge(
            Router::new()
                .route("/_modules", get(modules_handler))
                .with_state(report),
        );
        Ok(())
    }
}

impl DeclaredModule for DiagnosticsModule {
    const KEY: &'static str = "diagnostics";
    const DEPENDS_ON: &'static [&'static str] = &[HealthModule::KEY];

    fn create() -> Result<Self, BoxError> {
        Ok(Self)
    }
}

async fn modules_handler(State(report): State<Arc<ModulesReport>>) -> Json<ModulesReport> {
    Json(report.as_ref().clone())
}
