//! Shared application service layer for containment accounting.
//!
//! This crate sits between the CLI and the core crates: it loads a run
//! configuration, builds the static inputs, drives the per-timestep engine
//! and persists or queries results.

pub mod engine;
pub mod error;
pub mod inputs;
pub mod progress;
pub mod query;
pub mod run_service;

// Re-export key types for convenience
pub use engine::{
    CancelToken, EngineOutput, FileSnapshot, SnapshotSource, run_timesteps,
    run_timesteps_with_progress,
};
pub use error::{AppError, AppResult};
pub use inputs::{InputReport, StaticInputs, build_catalog, build_classifier, validate_inputs};
pub use progress::{RunProgressEvent, RunStage, TimestepProgress};
pub use query::{
    CategoryShare, PhaseShare, RunSummary, extract_series, get_run_summary, series_csv,
};
pub use run_service::{
    ENGINE_VERSION, RunOptions, RunRequest, RunResponse, ensure_run, ensure_run_with_progress,
    load_run,
};
