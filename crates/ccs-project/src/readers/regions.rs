//! Per-cell region ids.

use std::collections::HashMap;
use std::path::Path;

use ccs_grid::RegionSource;

use super::csv;
use crate::{ProjectError, ProjectResult, read_to_string};

/// Read a `cell_id,region` CSV.
pub fn read_region_file(path: &Path) -> ProjectResult<RegionSource> {
    let content = read_to_string(path)?;
    let mut ids = HashMap::new();
    for row in csv::rows(&content) {
        let index: u32 = row.parse(path, 0, "cell_id")?;
        let region: i64 = row.parse(path, 1, "region")?;
        if ids.insert(index, region).is_some() {
            return Err(ProjectError::input(
                path,
                format!("line {}: cell {index} listed twice", row.line),
            ));
        }
    }
    Ok(RegionSource::new(path.display().to_string(), ids))
}
