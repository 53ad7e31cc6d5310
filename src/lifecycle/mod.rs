//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve modules → Construct once → phases.rs
//!
//! Phases (phases.rs):
//!     configure_services for all → freeze services → configure for all
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGTERM/SIGINT → latched watch flag → stop accepting → drain → exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: dependencies before dependents
//! - Activation happens once per host
//! - Listeners start last (traffic only when fully configured)

pub mod phases;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use phases::{Activation, ActivatedModules};
pub use shutdown::Shutdown;
pub use startup::ModuleHost;
