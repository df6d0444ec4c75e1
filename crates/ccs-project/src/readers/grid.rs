//! Grid geometry and static properties.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use ccs_grid::{CellInput, RegionSource};
use serde::Deserialize;

use crate::{ProjectError, ProjectResult, read_to_string};

#[derive(Debug, Deserialize)]
struct GridFile {
    dimensions: [u32; 3],
    cells: Vec<GridCellDef>,
    #[serde(default)]
    properties: BTreeMap<String, Vec<i64>>,
}

/// One cell row. `i`, `j` and `k` are 1-based.
#[derive(Debug, Deserialize)]
struct GridCellDef {
    id: u32,
    i: u32,
    j: u32,
    k: u32,
    x: f64,
    y: f64,
    #[serde(default)]
    z: f64,
    bulk_volume: f64,
    porosity: f64,
    #[serde(default = "default_active")]
    active: bool,
}

fn default_active() -> bool {
    true
}

/// Cells and integer properties read from a grid file.
#[derive(Debug, Clone)]
pub struct GridData {
    pub path: PathBuf,
    pub dimensions: [u32; 3],
    pub cells: Vec<CellInput>,
    properties: BTreeMap<String, Vec<i64>>,
}

impl GridData {
    /// Region ids from an integer property, one value per cell in file order.
    pub fn region_property(&self, name: &str) -> ProjectResult<RegionSource> {
        let values = self
            .properties
            .get(name)
            .ok_or_else(|| ProjectError::MissingProperty {
                name: name.to_string(),
            })?;
        if values.len() != self.cells.len() {
            return Err(ProjectError::input(
                &self.path,
                format!(
                    "property '{name}' has {} values for {} cells",
                    values.len(),
                    self.cells.len()
                ),
            ));
        }
        let ids: HashMap<u32, i64> = self
            .cells
            .iter()
            .zip(values)
            .map(|(cell, &value)| (cell.index, value))
            .collect();
        Ok(RegionSource::new(format!("property {name}"), ids))
    }
}

pub fn read_grid(path: &Path) -> ProjectResult<GridData> {
    let content = read_to_string(path)?;
    let file: GridFile = serde_json::from_str(&content)
        .map_err(|e| ProjectError::input(path, format!("not a grid file: {e}")))?;
    let [nx, ny, nz] = file.dimensions;

    let mut cells = Vec::with_capacity(file.cells.len());
    for def in file.cells {
        let in_range = (1..=nx).contains(&def.i)
            && (1..=ny).contains(&def.j)
            && (1..=nz).contains(&def.k);
        if !in_range {
            return Err(ProjectError::input(
                path,
                format!(
                    "cell {} at ({}, {}, {}) is outside dimensions {nx}x{ny}x{nz}",
                    def.id, def.i, def.j, def.k
                ),
            ));
        }
        let mut cell = CellInput::new(def.id, def.k, (def.x, def.y), def.bulk_volume, def.porosity)
            .with_depth(def.z);
        if !def.active {
            cell = cell.inactive();
        }
        cells.push(cell);
    }

    Ok(GridData {
        path: path.to_path_buf(),
        dimensions: file.dimensions,
        cells,
        properties: file.properties,
    })
}
