//! Module host library.
//!
//! Resolves application modules into dependency order, constructs each one
//! once and runs their two configuration phases before serving HTTP.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod module;
pub mod modules;
pub mod observability;
pub mod services;

pub use config::HostConfig;
pub use http::{HttpServer, Pipeline};
pub use lifecycle::{Activation, ModuleHost, Shutdown};
pub use module::{DeclaredModule, Module, ModuleCatalog, ModuleDescriptor, ModuleError, ModuleKey};
pub use services::{ServiceCollection, ServiceProvider};
