//! Cell data structures.

use ccs_core::{CellId, Real};

use crate::labels::{RegionLabel, ZoneLabel};

/// Static attributes of one grid cell as delivered by the grid reader.
///
/// Inactive cells are accepted here and dropped by the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct CellInput {
    pub index: u32,
    /// 1-based layer (k) index, used for zone ranges.
    pub layer: u32,
    pub x: Real,
    pub y: Real,
    pub z: Real,
    pub bulk_volume: Real,
    pub porosity: Real,
    pub active: bool,
}

impl CellInput {
    /// An active cell with zero depth.
    pub fn new(index: u32, layer: u32, xy: (Real, Real), bulk_volume: Real, porosity: Real) -> Self {
        Self {
            index,
            layer,
            x: xy.0,
            y: xy.1,
            z: 0.0,
            bulk_volume,
            porosity,
            active: true,
        }
    }

    pub fn with_depth(mut self, z: Real) -> Self {
        self.z = z;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// One active cell of the catalog.
///
/// Immutable once the catalog is built; the zone and region labels are
/// already resolved against the run's grouping inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub id: CellId,
    pub layer: u32,
    pub x: Real,
    pub y: Real,
    pub z: Real,
    pub bulk_volume: Real,
    pub porosity: Real,
    pub zone: ZoneLabel,
    pub region: RegionLabel,
}

impl Cell {
    /// Plan-view centroid used for polygon tests.
    pub fn centroid(&self) -> (Real, Real) {
        (self.x, self.y)
    }

    /// Pore volume (`bulk_volume * porosity`).
    pub fn pore_volume(&self) -> Real {
        self.bulk_volume * self.porosity
    }
}
