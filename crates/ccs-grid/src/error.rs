//! Catalog-specific error types.

use ccs_core::CoreError;

/// Catalog construction and validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Two cells share the same index.
    DuplicateCell { index: u32 },

    /// A cell index has no distinct `CellId` (`u32::MAX`).
    IndexOutOfRange { index: u32 },

    /// A static cell attribute failed a numeric check.
    InvalidCellValue { index: u32, source: CoreError },

    /// A zone range is empty or starts below layer 1.
    InvalidZoneRange {
        name: String,
        first_layer: u32,
        last_layer: u32,
    },

    /// Two zone ranges claim the same layer.
    OverlappingZoneRanges { first: String, second: String },

    /// A zone name collides with a reserved label (`all`, `UNASSIGNED`).
    ReservedZoneName { name: String },

    /// The region input does not cover an active cell.
    MissingRegion { origin: String, index: u32 },

    /// No active cells remain after dropping inactive ones.
    NoActiveCells { inactive: usize },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::DuplicateCell { index } => {
                write!(f, "Cell {} appears more than once in the grid", index)
            }
            CatalogError::IndexOutOfRange { index } => {
                write!(f, "Cell index {} is out of range (max {})", index, u32::MAX - 1)
            }
            CatalogError::InvalidCellValue { index, source } => {
                write!(f, "Cell {} has an invalid attribute: {}", index, source)
            }
            CatalogError::InvalidZoneRange {
                name,
                first_layer,
                last_layer,
            } => {
                write!(
                    f,
                    "Zone '{}' has invalid layer range [{}, {}] (layers are 1-based, first <= last)",
                    name, first_layer, last_layer
                )
            }
            CatalogError::OverlappingZoneRanges { first, second } => {
                write!(f, "Zones '{}' and '{}' overlap in layers", first, second)
            }
            CatalogError::ReservedZoneName { name } => {
                write!(f, "Zone name '{}' is reserved", name)
            }
            CatalogError::MissingRegion { origin, index } => {
                write!(f, "Region input '{}' has no value for cell {}", origin, index)
            }
            CatalogError::NoActiveCells { inactive } => {
                write!(f, "Grid has no active cells ({} inactive)", inactive)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::InvalidCellValue { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
