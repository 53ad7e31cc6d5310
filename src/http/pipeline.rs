//! Request pipeline assembled by modules during Phase B.
//!
//! # Responsibilities
//! - Collect routes, nested routers and layers contributed by modules
//! - Give modules read access to the frozen service provider
//! - Hand the finished `axum::Router` to the HTTP server
//!
//! # Design Decisions
//! - `map_router` applies at once and only sees routes added so far
//! - `wrap` is deferred until the pipeline is finished, so it covers every route;
//!   the first module to wrap is the outermost middleware
//! - The pipeline never interprets what modules add

use std::sync::Arc;

use axum::routing::MethodRouter;
use axum::Router;

use crate::services::ServiceProvider;

/// Mutable request pipeline builder.
pub struct Pipeline {
    router: Router,
    middleware: Vec<Middleware>,
    services: Arc<ServiceProvider>,
}

type Middleware = Box<dyn FnOnce(Router) -> Router + Send>;

impl Pipeline {
    pub fn new(services: Arc<ServiceProvider>) -> Self {
        Self {
            router: Router::new(),
            middleware: Vec::new(),
            services,
        }
    }

    /// Services registered during Phase A.
    pub fn services(&self) -> &Arc<ServiceProvider> {
        &self.services
    }

    /// Add a route.
    pub fn route(&mut self, path: &str, method_router: MethodRouter) -> &mut Self {
        self.map_router(|router| router.route(path, method_router))
    }

    /// Merge another router's routes into the pipeline.
    pub fn merge(&mut self, other: Router) -> &mut Self {
        self.map_router(|router| router.merge(other))
    }

    /// Mount a router under a path prefix.
    pub fn nest(&mut self, path: &str, other: Router) -> &mut Self {
        self.map_router(|router| router.nest(path, other))
    }

    /// Transform the router, e.g. to add a middleware layer.
    pub fn map_router<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(Router) -> Router,
    {
        let router = std::mem::take(&mut self.router);
        self.router = f(router);
        self
    }

    /// Wrap the finished router, covering routes added later as well.
    pub fn wrap<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(Router) -> Router + Send + 'static,
    {
        self.middleware.push(Box::new(f));
        self
    }

    /// Finish the pipeline.
    pub fn into_router(self) -> Router {
        self.middleware
            .into_iter()
            .rev()
            .fold(self.router, |router, wrap| wrap(router))
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("middleware", &self.middleware.len())
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}
