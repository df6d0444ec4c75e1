//! ccs-boundary: plan-view boundaries and containment classification.
//!
//! Provides:
//! - Validated polygon rings and multi-ring boundaries
//! - Boundary-inclusive point-in-polygon tests
//! - Per-cell containment categories for a cell catalog

pub mod classify;
pub mod error;
pub mod polygon;

pub use classify::{BoundaryClassifier, CategoryCounts, Classification, ContainmentCategory};
pub use error::{BoundaryError, BoundaryResult};
pub use polygon::{Boundary, DEFAULT_AUTO_CLOSE_TOLERANCE, Polygon};
