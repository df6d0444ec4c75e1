//! Per-timestep field snapshots.

use std::path::{Path, PathBuf};

use ccs_accounting::{FieldSnapshot, SnapshotError, parse_snapshot_date};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::schema::RunConfig;
use crate::{ProjectError, ProjectResult};

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    date: String,
    cell_ids: Vec<u32>,
    gas_saturation: Vec<f64>,
    water_saturation: Vec<f64>,
    gas_density: Vec<f64>,
    water_density: Vec<f64>,
    dissolved_mass_fraction: Vec<f64>,
    #[serde(default)]
    trapped_gas_saturation: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct SnapshotHeader {
    date: String,
}

fn unreadable(path: &Path, message: impl ToString) -> SnapshotError {
    SnapshotError::Unreadable {
        source_name: path.display().to_string(),
        message: message.to_string(),
    }
}

/// Read one snapshot. Failures here skip the timestep, not the run.
pub fn read_snapshot(path: &Path) -> Result<FieldSnapshot, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|e| unreadable(path, e))?;
    let file: SnapshotFile = serde_json::from_str(&content).map_err(|e| unreadable(path, e))?;
    Ok(FieldSnapshot {
        date: parse_snapshot_date(&file.date)?,
        cell_ids: file.cell_ids,
        gas_saturation: file.gas_saturation,
        water_saturation: file.water_saturation,
        gas_density: file.gas_density,
        water_density: file.water_density,
        dissolved_mass_fraction: file.dissolved_mass_fraction,
        trapped_gas_saturation: file.trapped_gas_saturation,
    })
}

/// Read only the date of a snapshot, for duplicate checks before accounting.
pub fn read_snapshot_date(path: &Path) -> Result<NaiveDate, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|e| unreadable(path, e))?;
    let header: SnapshotHeader =
        serde_json::from_str(&content).map_err(|e| unreadable(path, e))?;
    parse_snapshot_date(&header.date)
}

/// Snapshot files of a run: the configured list, or every `.json` file in
/// `snapshot_dir` sorted by name.
pub fn list_snapshots(config: &RunConfig) -> ProjectResult<Vec<PathBuf>> {
    let Some(dir) = &config.snapshot_dir else {
        return Ok(config.snapshots.clone());
    };
    let io_err = |source| ProjectError::Io {
        path: dir.clone(),
        source,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
