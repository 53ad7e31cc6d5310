//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Phase B: modules → pipeline.rs (routes, layers)
//!     → Router
//!     → server.rs (timeout layer, bind, graceful shutdown)
//!
//! Per request:
//!     request.rs (request id, tracing span, when the module is enabled)
//!     → module handlers
//! ```

pub mod pipeline;
pub mod request;
pub mod server;

pub use pipeline::Pipeline;
pub use request::{with_request_tracing, X_REQUEST_ID};
pub use server::HttpServer;
