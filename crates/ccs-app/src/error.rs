//! Error types for the ccs-app service layer.

use std::path::PathBuf;

use chrono::NaiveDate;

/// Application error type that wraps errors from the backend crates and
/// provides a unified error interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Project(String),

    #[error("Failed to read configuration file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Grid error: {0}")]
    Catalog(String),

    #[error("Accounting error: {0}")]
    Accounting(String),

    #[error("Duplicate timestep date {date} ({first} and {second})")]
    DuplicateDate {
        date: NaiveDate,
        first: String,
        second: String,
    },

    #[error("No usable timesteps: every snapshot was skipped")]
    NoTimesteps,

    #[error("Run cancelled")]
    Cancelled,

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ccs-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<ccs_project::ProjectError> for AppError {
    fn from(err: ccs_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<ccs_grid::CatalogError> for AppError {
    fn from(err: ccs_grid::CatalogError) -> Self {
        AppError::Catalog(err.to_string())
    }
}

impl From<ccs_accounting::AccountingError> for AppError {
    fn from(err: ccs_accounting::AccountingError) -> Self {
        AppError::Accounting(err.to_string())
    }
}

impl From<ccs_results::ResultsError> for AppError {
    fn from(err: ccs_results::ResultsError) -> Self {
        match err {
            ccs_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
