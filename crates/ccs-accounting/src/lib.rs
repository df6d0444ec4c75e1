//! ccs-accounting: per-cell CO2 quantities and their grouped totals.
//!
//! Provides:
//! - Calculation modes (`mass`, `cell_volume`, `actual_volume`)
//! - Field snapshots delivered by restart readers, aligned to the catalog
//! - The phase accountant turning fields into per-cell phase quantities
//! - The aggregator reducing quantities by (zone, region, category, phase)
//! - `process_timestep`, the pure per-timestep entry point

pub mod accountant;
pub mod aggregate;
pub mod error;
pub mod mode;
pub mod phase;
pub mod snapshot;
pub mod timestep;

pub use accountant::{DEFAULT_SATURATION_THRESHOLD, PhaseAccountant, PhaseQuantity};
pub use aggregate::{ContainmentAggregator, GroupKey, TimestepTotals};
pub use error::{AccountingError, AccountingResult, SnapshotError};
pub use mode::CalculationMode;
pub use phase::Phase;
pub use snapshot::{CellFields, FieldSnapshot, parse_snapshot_date};
pub use timestep::process_timestep;
