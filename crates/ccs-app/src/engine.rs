//! Per-timestep engine.
//!
//! Timesteps only share the read-only `StaticInputs`, so they are processed
//! in parallel and merged by date at the end.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use ccs_accounting::{FieldSnapshot, SnapshotError, TimestepTotals, process_timestep};
use ccs_project::{read_snapshot, read_snapshot_date};
use ccs_results::{ContainmentTable, SkippedTimestep, TimeSeriesAssembler};
use chrono::NaiveDate;
use rayon::prelude::*;

use crate::error::{AppError, AppResult};
use crate::inputs::StaticInputs;
use crate::progress::TimestepProgress;

/// Where one timestep's field snapshot comes from.
pub trait SnapshotSource: Sync {
    /// Name used in logs and in the manifest's skipped list.
    fn describe(&self) -> String;

    /// The snapshot's date, without loading its fields if possible.
    fn date(&self) -> Result<NaiveDate, SnapshotError>;

    fn load(&self) -> Result<FieldSnapshot, SnapshotError>;
}

/// A snapshot file read by `ccs_project::read_snapshot`.
#[derive(Debug, Clone)]
pub struct FileSnapshot(pub PathBuf);

impl SnapshotSource for FileSnapshot {
    fn describe(&self) -> String {
        self.0.display().to_string()
    }

    fn date(&self) -> Result<NaiveDate, SnapshotError> {
        read_snapshot_date(&self.0)
    }

    fn load(&self) -> Result<FieldSnapshot, SnapshotError> {
        read_snapshot(&self.0)
    }
}

impl SnapshotSource for FieldSnapshot {
    fn describe(&self) -> String {
        format!("snapshot {}", self.date)
    }

    fn date(&self) -> Result<NaiveDate, SnapshotError> {
        Ok(self.date)
    }

    fn load(&self) -> Result<FieldSnapshot, SnapshotError> {
        Ok(self.clone())
    }
}

/// Shared flag checked between timesteps.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub table: ContainmentTable,
    pub dates: Vec<NaiveDate>,
    pub skipped: Vec<SkippedTimestep>,
}

fn skip(source: String, err: &SnapshotError) -> SkippedTimestep {
    tracing::warn!(snapshot = %source, "Skipping timestep: {err}");
    SkippedTimestep {
        source,
        reason: err.to_string(),
    }
}

/// Run every timestep and assemble the table.
///
/// Duplicate dates are fatal and detected before any accounting. A snapshot
/// that cannot be read or fails validation is skipped with a warning. On
/// cancellation nothing is returned.
pub fn run_timesteps<S: SnapshotSource>(
    inputs: &StaticInputs,
    sources: &[S],
    cancel: &CancelToken,
) -> AppResult<EngineOutput> {
    run_timesteps_with_progress(inputs, sources, cancel, None)
}

/// Like [`run_timesteps`], calling `on_timestep` from the worker threads
/// each time a timestep finishes or is skipped.
pub fn run_timesteps_with_progress<S: SnapshotSource>(
    inputs: &StaticInputs,
    sources: &[S],
    cancel: &CancelToken,
    on_timestep: Option<&(dyn Fn(TimestepProgress) + Sync)>,
) -> AppResult<EngineOutput> {
    let mut skipped = Vec::new();
    let mut dated: Vec<(NaiveDate, &S)> = Vec::with_capacity(sources.len());
    let mut seen: HashMap<NaiveDate, String> = HashMap::new();
    for source in sources {
        match source.date() {
            Ok(date) => {
                if let Some(first) = seen.insert(date, source.describe()) {
                    return Err(AppError::DuplicateDate {
                        date,
                        first,
                        second: source.describe(),
                    });
                }
                dated.push((date, source));
            }
            Err(err) => skipped.push(skip(source.describe(), &err)),
        }
    }

    let processed = AtomicUsize::new(0);
    let failed = AtomicUsize::new(skipped.len());
    let report = |ok: bool| {
        let counter = if ok { &processed } else { &failed };
        counter.fetch_add(1, Ordering::Relaxed);
        if let Some(cb) = on_timestep {
            cb(TimestepProgress {
                processed: processed.load(Ordering::Relaxed),
                skipped: failed.load(Ordering::Relaxed),
                total: sources.len(),
            });
        }
    };

    let outcomes: Vec<Option<Result<TimestepTotals, SnapshotError>>> = dated
        .par_iter()
        .map(|(date, source)| {
            if cancel.is_cancelled() {
                return None;
            }
            let outcome = source.load().and_then(|snapshot| {
                if snapshot.date != *date {
                    return Err(SnapshotError::InvalidDate {
                        given: snapshot.date.to_string(),
                    });
                }
                process_timestep(
                    &inputs.catalog,
                    &inputs.classification,
                    &inputs.accountant,
                    &snapshot,
                )
            });
            if outcome.is_ok() {
                tracing::debug!(%date, "Processed timestep");
            }
            report(outcome.is_ok());
            Some(outcome)
        })
        .collect();

    if cancel.is_cancelled() {
        tracing::warn!("Run cancelled; discarding all timesteps");
        return Err(AppError::Cancelled);
    }

    let mut assembler = TimeSeriesAssembler::new(inputs.accountant.mode());
    for ((date, source), outcome) in dated.into_iter().zip(outcomes) {
        match outcome {
            Some(Ok(totals)) => assembler.push(date, totals)?,
            Some(Err(err)) => skipped.push(skip(source.describe(), &err)),
            None => return Err(AppError::Cancelled),
        }
    }

    if assembler.is_empty() {
        return Err(AppError::NoTimesteps);
    }

    let table = assembler.finish();
    let dates = table.dates();
    Ok(EngineOutput {
        table,
        dates,
        skipped,
    })
}
