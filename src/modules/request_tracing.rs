//! Request id and HTTP span middleware as a module.

use crate::config::Environment;
use crate::http::{with_request_tracing, Pipeline};
use crate::module::{BoxError, DeclaredModule, Module};

/// Wraps the whole pipeline with request tracing.
#[derive(Debug, Default)]
pub struct RequestTracingModule;

impl Module for RequestTracingModule {
    fn configure(
        &self,
        pipeline: &mut Pipeline,
        _environment: &Environment,
    ) -> Result<(), BoxError> {
        pipeline.wrap(with_request_tracing);
        Ok(())
    }
}

impl DeclaredModule for RequestTracingModule {
    const KEY: &'static str = "request-tracing";

    fn create() -> Result<Self, BoxError> {
        Ok(Self)
    }
}
