//! ccs-results: the containment time series and its on-disk run cache.

pub mod assemble;
pub mod hash;
pub mod store;
pub mod table;
pub mod types;

pub use assemble::{ContainmentTable, TimeSeriesAssembler};
pub use hash::compute_run_id;
pub use store::RunStore;
pub use table::{readable_csv, records_csv};
pub use types::*;

use chrono::NaiveDate;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Duplicate timestep date {date}")]
    DuplicateDate { date: NaiveDate },
}
