//! Zone definitions.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use ccs_grid::{ZoneRange, ZoneSource};
use serde::Deserialize;

use super::csv;
use crate::{ProjectError, ProjectResult, read_to_string};

/// `zranges: [{Name: [first, last]}, ...]`
#[derive(Debug, Deserialize)]
struct ZoneRangesFile {
    zranges: Vec<BTreeMap<String, [u32; 2]>>,
}

/// Read a zone file: YAML layer ranges (`.yml`/`.yaml`) or a per-cell
/// `cell_id,zone` CSV.
pub fn read_zone_file(path: &Path) -> ProjectResult<ZoneSource> {
    let content = read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

    if is_yaml {
        let file: ZoneRangesFile = serde_yaml::from_str(&content)
            .map_err(|e| ProjectError::input(path, format!("not a zranges file: {e}")))?;
        let mut ranges = Vec::new();
        for entry in file.zranges {
            if entry.len() != 1 {
                return Err(ProjectError::input(
                    path,
                    "each zranges entry must map one zone name to [first, last]",
                ));
            }
            ranges.extend(
                entry
                    .into_iter()
                    .map(|(name, [first, last])| ZoneRange::new(name, first, last)),
            );
        }
        return Ok(ZoneSource::Ranges(ranges));
    }

    let mut labels = HashMap::new();
    for row in csv::rows(&content) {
        let index: u32 = row.parse(path, 0, "cell_id")?;
        let zone = row.field(path, 1, "zone")?;
        if zone.is_empty() {
            return Err(ProjectError::input(
                path,
                format!("line {}: empty zone name", row.line),
            ));
        }
        if labels.insert(index, zone.to_string()).is_some() {
            return Err(ProjectError::input(
                path,
                format!("line {}: cell {index} listed twice", row.line),
            ));
        }
    }
    Ok(ZoneSource::PerCell(labels))
}
