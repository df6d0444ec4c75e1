use ccs_core::CoreError;
use chrono::NaiveDate;
use thiserror::Error;

pub type AccountingResult<T> = Result<T, AccountingError>;

/// Run-level accounting errors. Fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccountingError {
    #[error("Unknown calculation mode '{given}' (expected mass, cell_volume or actual_volume)")]
    UnknownMode { given: String },

    #[error("Invalid saturation threshold {value} (must be finite and in [0, 1))")]
    InvalidThreshold { value: f64 },
}

/// A field snapshot that cannot be used. Skips one timestep, never the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    #[error("Snapshot could not be read from {source_name}: {message}")]
    Unreadable { source_name: String, message: String },

    #[error("Invalid snapshot date '{given}' (expected YYYY-MM-DD or YYYYMMDD)")]
    InvalidDate { given: String },

    #[error("Snapshot {date}: column {column} has {actual} values, expected {expected}")]
    ColumnLength {
        date: NaiveDate,
        column: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Snapshot {date}: no values for active cell {index}")]
    MissingCell { date: NaiveDate, index: u32 },

    #[error("Snapshot {date}: cell {index} is listed more than once")]
    DuplicateCell { date: NaiveDate, index: u32 },

    #[error("Snapshot {date}: invalid value for cell {index}: {source}")]
    InvalidValue {
        date: NaiveDate,
        index: u32,
        source: CoreError,
    },

    #[error("Snapshot {date}: gas and water saturation of cell {index} sum to {sum} (> 1)")]
    SaturationSum { date: NaiveDate, index: u32, sum: f64 },

    #[error("Snapshot {date}: residual trapping requires trapped_gas_saturation")]
    MissingTrappedSaturation { date: NaiveDate },
}
