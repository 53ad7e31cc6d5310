//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Module activation and HTTP handling produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (phase timings, failures)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Module key and phase are fields on every activation event
//! - Metrics are optional and cheap when disabled

pub mod logging;
pub mod metrics;
