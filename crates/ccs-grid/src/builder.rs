//! Incremental catalog builder.

use std::collections::BTreeSet;

use ccs_core::CellId;

use crate::catalog::{CatalogStats, CellCatalog, GroupingDims};
use crate::cell::{Cell, CellInput};
use crate::error::{CatalogError, CatalogResult};
use crate::labels::{RegionLabel, ZoneLabel};
use crate::regions::RegionSource;
use crate::validate;
use crate::zones::ZoneSource;

/// Builder for constructing a catalog incrementally.
///
/// Add every grid cell (active or not) with `add_cell`, attach the optional
/// grouping inputs, then call `build()` to validate and freeze it into an
/// immutable `CellCatalog`.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    cells: Vec<CellInput>,
    zones: Option<ZoneSource>,
    regions: Option<RegionSource>,
}

impl CatalogBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_cell(&mut self, cell: CellInput) -> &mut Self {
        self.cells.push(cell);
        self
    }

    pub fn add_cells(&mut self, cells: impl IntoIterator<Item = CellInput>) -> &mut Self {
        self.cells.extend(cells);
        self
    }

    pub fn zones(&mut self, source: ZoneSource) -> &mut Self {
        self.zones = Some(source);
        self
    }

    pub fn regions(&mut self, source: RegionSource) -> &mut Self {
        self.regions = Some(source);
        self
    }

    /// Validate inputs, drop inactive cells, resolve labels and return the
    /// catalog with cells ordered by id.
    pub fn build(self) -> CatalogResult<CellCatalog> {
        validate::validate_cells(&self.cells)?;
        if let Some(zones) = &self.zones {
            validate::validate_zones(zones)?;
        }

        let total_cells = self.cells.len();
        let mut cells = Vec::with_capacity(total_cells);
        for input in self.cells.into_iter().filter(|c| c.active) {
            let zone = match &self.zones {
                Some(source) => source.resolve(input.index, input.layer),
                None => ZoneLabel::All,
            };
            let region = match &self.regions {
                Some(source) => match source.get(input.index) {
                    Some(id) => RegionLabel::Id(id),
                    None => {
                        return Err(CatalogError::MissingRegion {
                            origin: source.origin.clone(),
                            index: input.index,
                        });
                    }
                },
                None => RegionLabel::All,
            };
            cells.push(Cell {
                id: CellId::from_index(input.index),
                layer: input.layer,
                x: input.x,
                y: input.y,
                z: input.z,
                bulk_volume: input.bulk_volume,
                porosity: input.porosity,
                zone,
                region,
            });
        }

        let inactive_cells = total_cells - cells.len();
        if cells.is_empty() {
            return Err(CatalogError::NoActiveCells {
                inactive: inactive_cells,
            });
        }
        cells.sort_by_key(|c| c.id);

        let zones = Self::zone_universe(self.zones.as_ref(), &cells);
        let regions = Self::region_universe(&cells);

        Ok(CellCatalog {
            stats: CatalogStats {
                total_cells,
                active_cells: cells.len(),
                inactive_cells,
            },
            cells,
            zones,
            regions,
            grouping: GroupingDims {
                zones: self.zones.is_some(),
                regions: self.regions.is_some(),
            },
        })
    }

    /// Declared zones plus `Unassigned` when some active cell is uncovered.
    fn zone_universe(source: Option<&ZoneSource>, cells: &[Cell]) -> Vec<ZoneLabel> {
        let Some(source) = source else {
            return vec![ZoneLabel::All];
        };
        let mut zones: BTreeSet<ZoneLabel> = source.declared();
        if cells.iter().any(|c| c.zone == ZoneLabel::Unassigned) {
            zones.insert(ZoneLabel::Unassigned);
        }
        zones.into_iter().collect()
    }

    fn region_universe(cells: &[Cell]) -> Vec<RegionLabel> {
        let regions: BTreeSet<RegionLabel> = cells.iter().map(|c| c.region).collect();
        regions.into_iter().collect()
    }
}
