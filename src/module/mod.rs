//! Module system.
//!
//! # Data Flow
//! ```text
//! ModuleDescriptor (key, depends_on, factory)
//!     → catalog.rs (static table of known descriptors)
//!     → resolver.rs (dependency-first order, cycle detection)
//!     → registry.rs (construct each instance at most once)
//!     → lifecycle::phases (configure_services, then configure)
//! ```
//!
//! # Design Decisions
//! - Dependencies are declared as constants or through a builder, never discovered at runtime
//! - The instance cache belongs to a host, there is no process-global registry
//! - Any resolution error aborts before a single module is constructed

pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod registry;
pub mod resolver;

use crate::config::Environment;
use crate::http::Pipeline;
use crate::services::ServiceCollection;

pub use catalog::ModuleCatalog;
pub use descriptor::{DescriptorBuilder, ModuleDescriptor, ModuleKey};
pub use error::{BoxError, ModuleError, Phase};
pub use registry::ModuleRegistry;
pub use resolver::{DependencyResolver, ResolutionPlan, ResolvedModule};

/// A unit of application wiring.
///
/// Both callbacks default to doing nothing, so a module only implements the
/// phase it participates in.
pub trait Module: Send + Sync + 'static {
    /// Phase A: register services other modules and the application read later.
    fn configure_services(&self, _services: &mut ServiceCollection) -> Result<(), BoxError> {
        Ok(())
    }

    /// Phase B: contribute routes and layers to the request pipeline.
    fn configure(
        &self,
        _pipeline: &mut Pipeline,
        _environment: &Environment,
    ) -> Result<(), BoxError> {
        Ok(())
    }
}

/// A module type that carries its own identity and dependency list.
///
/// ```rust,ignore
/// struct BillingModule;
///
/// impl DeclaredModule for BillingModule {
///     const KEY: &'static str = "billing";
///     const DEPENDS_ON: &'static [&'static str] = &["identity"];
///
///     fn create() -> Result<Self, BoxError> {
///         Ok(Self)
///     }
/// }
///
/// let descriptor = ModuleDescriptor::of::<BillingModule>();
/// ```
pub trait DeclaredModule: Module + Sized {
    /// Stable key the module is registered under.
    const KEY: &'static str;

    /// Keys of the modules that must be configured before this one.
    const DEPENDS_ON: &'static [&'static str] = &[];

    /// No-argument construction.
    fn create() -> Result<Self, BoxError>;
}
