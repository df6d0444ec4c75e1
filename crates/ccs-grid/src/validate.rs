//! Catalog validation logic.

use std::collections::HashSet;

use ccs_core::{ensure_fraction, ensure_non_negative, ensure_finite};

use crate::cell::CellInput;
use crate::error::{CatalogError, CatalogResult};
use crate::zones::ZoneSource;

/// Validate static cell attributes: unique indices below `u32::MAX`, finite
/// coordinates, non-negative volumes, porosity within `[0, 1]`.
///
/// Inactive cells only need a unique index; their attributes are never read.
pub(crate) fn validate_cells(cells: &[CellInput]) -> CatalogResult<()> {
    let mut seen = HashSet::with_capacity(cells.len());
    for cell in cells {
        if cell.index == u32::MAX {
            return Err(CatalogError::IndexOutOfRange { index: cell.index });
        }
        if !seen.insert(cell.index) {
            return Err(CatalogError::DuplicateCell { index: cell.index });
        }
        if !cell.active {
            continue;
        }

        let checked = ensure_finite(cell.x, "x")
            .and_then(|_| ensure_finite(cell.y, "y"))
            .and_then(|_| ensure_finite(cell.z, "z"))
            .and_then(|_| ensure_non_negative(cell.bulk_volume, "bulk_volume"))
            .and_then(|_| ensure_fraction(cell.porosity, "porosity"));
        if let Err(source) = checked {
            return Err(CatalogError::InvalidCellValue {
                index: cell.index,
                source,
            });
        }
    }
    Ok(())
}

/// Validate zone declarations: well-formed, non-overlapping ranges and no
/// reserved names.
pub(crate) fn validate_zones(source: &ZoneSource) -> CatalogResult<()> {
    match source {
        ZoneSource::Ranges(ranges) => {
            for range in ranges {
                check_name(&range.name)?;
                if range.first_layer == 0 || range.first_layer > range.last_layer {
                    return Err(CatalogError::InvalidZoneRange {
                        name: range.name.clone(),
                        first_layer: range.first_layer,
                        last_layer: range.last_layer,
                    });
                }
            }
            for (i, a) in ranges.iter().enumerate() {
                for b in &ranges[i + 1..] {
                    if a.overlaps(b) {
                        return Err(CatalogError::OverlappingZoneRanges {
                            first: a.name.clone(),
                            second: b.name.clone(),
                        });
                    }
                }
            }
        }
        ZoneSource::PerCell(labels) => {
            for name in labels.values() {
                check_name(name)?;
            }
        }
    }
    Ok(())
}

fn check_name(name: &str) -> CatalogResult<()> {
    if crate::labels::ZoneLabel::is_reserved(name) {
        return Err(CatalogError::ReservedZoneName {
            name: name.to_string(),
        });
    }
    Ok(())
}
