//! Built-in modules.
//!
//! - `health`: `GET /health`
//! - `request-tracing`: request ids and HTTP spans around every route
//! - `diagnostics`: `GET /_modules`, depends on `health`
//!
//! Feature modules of an application register their own descriptors into the
//! catalog next to these.

pub mod diagnostics;
pub mod health;
pub mod request_tracing;

pub use diagnostics::DiagnosticsModule;
pub use health::{HealthModule, HealthState};
pub use request_tracing::RequestTracingModule;

use crate::module::{ModuleCatalog, ModuleDescriptor, ModuleError};

/// Catalog holding every built-in module.
pub fn builtin_catalog() -> Result<ModuleCatalog, ModuleError> {
    ModuleCatalog::new()
        .with(ModuleDescriptor::of::<HealthModule>())?
        .with(ModuleDescriptor::of::<RequestTracingModule>())?
        .with(ModuleDescriptor::of::<DiagnosticsModule>())
}
