//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the host.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::config::environment::EnvironmentName;

/// Root configuration for the module host.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HostConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Environment the host runs in.
    pub environment: EnvironmentConfig,

    /// Modules to activate.
    pub modules: ModulesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Environment descriptor handed to every module's `configure`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Environment name (development, staging, production).
    pub name: EnvironmentName,

    /// Application name reported by diagnostics.
    pub application_name: String,

    /// Root directory for content served or read by modules.
    pub content_root: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            name: EnvironmentName::Development,
            application_name: "module-host".to_string(),
            content_root: ".".to_string(),
        }
    }
}

/// Module activation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModulesConfig {
    /// Root modules to activate; their dependencies are pulled in automatically.
    pub enabled: Vec<String>,

    /// Serve the module diagnostics endpoint even in production.
    pub expose_diagnostics: bool,
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            enabled: vec!["request-tracing".to_string(), "diagnostics".to_string()],
            expose_diagnostics: false,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
