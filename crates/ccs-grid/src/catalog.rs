//! The immutable cell catalog.

use ccs_core::CellId;

use crate::cell::Cell;
use crate::labels::{RegionLabel, ZoneLabel};

/// Which grouping dimensions were supplied for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupingDims {
    pub zones: bool,
    pub regions: bool,
}

/// Cell counts gathered while building the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub total_cells: usize,
    pub active_cells: usize,
    pub inactive_cells: usize,
}

/// The catalog: a validated, immutable collection of active cells.
///
/// Cells are stored in ascending id order, which is also the accumulation
/// order used downstream, so sums are reproducible run to run.
#[derive(Debug, Clone)]
pub struct CellCatalog {
    pub(crate) cells: Vec<Cell>,
    /// Every zone label a row can carry, sorted.
    pub(crate) zones: Vec<ZoneLabel>,
    /// Every region label a row can carry, sorted.
    pub(crate) regions: Vec<RegionLabel>,
    pub(crate) grouping: GroupingDims,
    pub(crate) stats: CatalogStats,
}

impl CellCatalog {
    /// Return all active cells, ordered by id.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Position of a cell in `cells()`, or `None` if it is inactive or unknown.
    pub fn position(&self, id: CellId) -> Option<usize> {
        self.cells.binary_search_by_key(&id, |c| c.id).ok()
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.position(id).map(|i| &self.cells[i])
    }

    pub fn zone_labels(&self) -> &[ZoneLabel] {
        &self.zones
    }

    pub fn region_labels(&self) -> &[RegionLabel] {
        &self.regions
    }

    pub fn grouping(&self) -> GroupingDims {
        self.grouping
    }

    pub fn stats(&self) -> CatalogStats {
        self.stats
    }
}
