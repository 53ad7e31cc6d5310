//! Metrics collection and exposition.
//!
//! # Metrics
//! - `module_phase_duration_seconds` (histogram): callback time by module, phase
//! - `module_activation_failures_total` (counter): failed callbacks by module, phase
//! - `modules_activated` (gauge): modules in the last successful activation
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   every call is a no-op
//! - Prometheus exporter only when enabled in config

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::module::{ModuleKey, Phase};

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record how long a lifecycle callback took.
pub fn record_phase(key: &ModuleKey, phase: Phase, elapsed: Duration) {
    histogram!(
        "module_phase_duration_seconds",
        "module" => key.to_string(),
        "phase" => phase.as_str(),
    )
    .record(elapsed.as_secs_f64());
}

/// Record a failed lifecycle callback.
pub fn record_failure(key: &ModuleKey, phase: Phase) {
    counter!(
        "module_activation_failures_total",
        "module" => key.to_string(),
        "phase" => phase.as_str(),
    )
    .increment(1);
}

/// Record the size of a completed activation.
pub fn record_activated(count: usize) {
    gauge!("modules_activated").set(count as f64);
}
