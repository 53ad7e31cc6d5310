//! Module resolution and activation errors.

use std::fmt;

use thiserror::Error;

use crate::module::ModuleKey;

/// Error type returned by module constructors and lifecycle callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Lifecycle phase a module callback belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Phase A: service registration.
    ConfigureServices,
    /// Phase B: pipeline configuration.
    Configure,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::ConfigureServices => "configure_services",
            Phase::Configure => "configure",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while resolving or activating modules.
///
/// None of them are recoverable: startup is expected to stop.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// A root or dependency key has no descriptor in the catalog.
    #[error("unknown module `{key}`{}", required_by_suffix(.required_by))]
    UnknownModule {
        key: ModuleKey,
        required_by: Option<ModuleKey>,
    },

    /// The dependency graph reachable from the roots contains a cycle.
    #[error("circular module dependency at `{key}`: {}", format_cycle(.cycle))]
    CircularDependency { key: ModuleKey, cycle: Vec<ModuleKey> },

    /// Two descriptors were registered under the same key.
    #[error("module `{0}` is already registered")]
    DuplicateModule(ModuleKey),

    /// The module's constructor failed.
    #[error("failed to construct module `{key}`: {source}")]
    InstantiationFailed {
        key: ModuleKey,
        #[source]
        source: BoxError,
    },

    /// A lifecycle callback failed.
    #[error("module `{key}` failed during {phase}: {source}")]
    Activation {
        key: ModuleKey,
        phase: Phase,
        #[source]
        source: BoxError,
    },

    /// `activate` was called on a host that already ran activation.
    #[error("modules have already been activated")]
    AlreadyActivated,
}

fn required_by_suffix(required_by: &Option<ModuleKey>) -> String {
    match required_by {
        Some(parent) => format!(" (required by `{}`)", parent),
        None => String::new(),
    }
}

fn format_cycle(cycle: &[ModuleKey]) -> String {
    cycle
        .iter()
        .map(ModuleKey::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
