//! ccs-core: stable foundation for the containment workspace.
//!
//! Contains:
//! - units (uom SI types + constructors for volume, mass, density)
//! - numeric (Real + validation helpers)
//! - ids (compact cell IDs)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
