//! Service registry shared by modules.
//!
//! # Data Flow
//! ```text
//! Phase A: every module → ServiceCollection (additive registration)
//!     → build() freezes the collection
//! Phase B and after: ServiceProvider (read-only, shared via Arc)
//! ```
//!
//! # Design Decisions
//! - Services are keyed by type; trait objects register as `Arc<dyn Trait>`
//! - Later registrations of the same type replace earlier ones
//! - Nothing can be read back until the collection is frozen

mod collection;
mod provider;

pub use collection::ServiceCollection;
pub use provider::{ServiceError, ServiceProvider};
