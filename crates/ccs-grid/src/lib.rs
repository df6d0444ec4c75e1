//! ccs-grid: static cell catalog for containment accounting.
//!
//! Provides:
//! - Active cells with centroid, bulk volume and porosity
//! - Zone resolution from layer ranges or per-cell labels
//! - Region resolution from per-cell integer ids
//! - Incremental catalog builder with validation
//!
//! # Example
//!
//! ```
//! use ccs_grid::{CatalogBuilder, CellInput, ZoneLabel, ZoneRange, ZoneSource};
//!
//! let mut builder = CatalogBuilder::new();
//! builder.add_cell(CellInput::new(0, 1, (0.5, 0.5), 8.0, 0.3));
//! builder.add_cell(CellInput::new(1, 2, (1.5, 0.5), 8.0, 0.3));
//! builder.zones(ZoneSource::Ranges(vec![ZoneRange::new("Upper", 1, 1)]));
//! let catalog = builder.build().unwrap();
//!
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.cells()[1].zone, ZoneLabel::Unassigned);
//! ```

pub mod builder;
pub mod catalog;
pub mod cell;
pub mod error;
pub mod labels;
pub mod regions;
pub(crate) mod validate;
pub mod zones;

// Re-exports for ergonomics
pub use builder::CatalogBuilder;
pub use catalog::{CatalogStats, CellCatalog, GroupingDims};
pub use cell::{Cell, CellInput};
pub use error::CatalogError;
pub use labels::{RegionLabel, ZoneLabel};
pub use regions::RegionSource;
pub use zones::{ZoneRange, ZoneSource};
