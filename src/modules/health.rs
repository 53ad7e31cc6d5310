//! Liveness endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::config::Environment;
use crate::http::Pipeline;
use crate::module::{BoxError, DeclaredModule, Module};
use crate::services::ServiceCollection;

/// Process start time, shared through the service registry.
#[derive(Debug)]
pub struct HealthState {
    started_at: Instant,
}

impl HealthState {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub application: String,
    pub environment: String,
    pub uptime_secs: u64,
}

#[derive(Clone)]
struct HealthContext {
    state: Arc<HealthState>,
    application: String,
    environment: String,
}

/// Serves `GET /health`.
#[derive(Debug, Default)]
pub struct HealthModule;

impl Module for HealthModule {
    fn configure_services(&self, services: &mut ServiceCollection) -> Result<(), BoxError> {
        services.try_add_singleton(Arc::new(HealthState::new()));
        Ok(())
    }

    fn configure(

        &self,

        pipeline: &mut Pipeline,

        environment: &Environment,

    ) -> Result<(), BoxError> {
        let context = HealthContext {
            state: pipeline.services().require::<HealthState>()?,
            application: environment.application_name.clone(),
            environment: environment.name.to_string(),
        };

        pipeline.merge(
            Router::new()
                .route("/health", get(health_handler))
                .with_state(context),
        );
        Ok(())
    }
}

impl DeclaredModule for HealthModule {
    const KEY: &'static str = "health";

    fn create() -> Result<Self, BoxError> {
        Ok(Self)
    }
}

async fn health_handler(State(context): State<HealthContext>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        application: context.application,
        environment: context.environment,
        uptime_secs: context.state.uptime_secs(),
    })
}
