//! Readers for the run's input files.
//!
//! Each reader turns one file into the typed input of a core crate; none of
//! them know about the others.

mod csv;
mod grid;
mod polygon;
mod regions;
mod snapshot;
mod zones;

pub use grid::{GridData, read_grid};
pub use polygon::read_polygon;
pub use regions::read_region_file;
pub use snapshot::{list_snapshots, read_snapshot, read_snapshot_date};
pub use zones::read_zone_file;
