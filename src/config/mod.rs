//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → HostConfig (validated, immutable)
//!     → environment.rs (Environment handed to modules)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; modules are activated once per process
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod environment;
pub mod loader;
pub mod schema;
pub mod validation;

pub use environment::{Environment, EnvironmentName};
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{EnvironmentConfig, HostConfig, ListenerConfig, ModulesConfig, ObservabilityConfig};
