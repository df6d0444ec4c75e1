//! Run execution and caching service.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use ccs_accounting::CalculationMode;
use ccs_project::{RunConfig, list_snapshots};
use ccs_results::{ContainmentTable, GroupingInfo, RunManifest, RunStore, compute_run_id};

use crate::engine::{CancelToken, FileSnapshot, run_timesteps_with_progress};
use crate::error::{AppError, AppResult};
use crate::inputs::{StaticInputs, build_accountant, build_catalog, build_classifier};
use crate::progress::{RunProgressEvent, RunStage, TimestepProgress};
use crate::query::{RunSummary, get_run_summary};

/// Version recorded in manifests and folded into run ids.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options for running the engine.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub engine_version: String,
    /// Replaces the configured calculation mode.
    pub mode: Option<CalculationMode>,
    pub readable_output: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            engine_version: ENGINE_VERSION.to_string(),
            mode: None,
            readable_output: false,
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub config_path: &'a Path,
    pub options: RunOptions,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub summary: RunSummary,
    pub tables: Vec<PathBuf>,
    pub loaded_from_cache: bool,
    pub total_time_s: f64,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
    timesteps: Option<TimestepProgress>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent {
            stage,
            elapsed_wall_s: started.elapsed().as_secs_f64(),
            message,
            timesteps,
        });
    }
}

/// Size and modification time of each input, so edits invalidate the cache.
fn input_fingerprints(config: &RunConfig, snapshots: &[PathBuf]) -> Vec<String> {
    let statics = [
        Some(&config.grid),
        config.containment_polygon.as_ref(),
        config.hazardous_polygon.as_ref(),
        config.zone_file.as_ref(),
        config.region_file.as_ref(),
    ];
    statics
        .into_iter()
        .flatten()
        .chain(snapshots)
        .map(|path| {
            let meta = std::fs::metadata(path).ok();
            let len = meta.as_ref().map(|m| m.len()).unwrap_or(0);
            let modified = meta
                .and_then(|m| m.modified().ok())
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| d.as_nanos())
                .unwrap_or(0);
            format!("{}:{len}:{modified}", path.display())
        })
        .collect()
}

fn load_config(path: &Path) -> AppResult<RunConfig> {
    if !path.exists() {
        return Err(AppError::ConfigRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
        });
    }
    Ok(ccs_project::load_yaml(path)?)
}

/// Run id and store for a configuration, as `ensure_run` would compute them.
fn locate_run(
    config: &RunConfig,
    options: &RunOptions,
) -> AppResult<(CalculationMode, Vec<PathBuf>, String, RunStore)> {
    let mode = match options.mode {
        Some(mode) => mode,
        None => config.mode()?,
    };
    let snapshots = list_snapshots(config)?;
    let fingerprints = input_fingerprints(config, &snapshots);
    let run_id = compute_run_id(config, mode, &fingerprints, &options.engine_version);
    let store = RunStore::new(config.output_dir())?;
    Ok((mode, snapshots, run_id, store))
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_run_with_progress(request, &CancelToken::new(), None)
}

/// Execute or load a run and stream progress events.
pub fn ensure_run_with_progress(
    request: &RunRequest,
    cancel: &CancelToken,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();

    emit_progress(
        &mut progress_cb,
        RunStage::LoadingConfig,
        started,
        Some("Loading configuration".to_string()),
        None,
    );
    let config = load_config(request.config_path)?;
    let (mode, snapshots, run_id, store) = locate_run(&config, &request.options)?;

    tracing::info!(
        name = %config.name,
        mode = %mode,
        grid = %config.grid.display(),
        snapshots = snapshots.len(),
        containment_polygon = ?config.containment_polygon,
        hazardous_polygon = ?config.hazardous_polygon,
        zone_file = ?config.zone_file,
        region_file = ?config.region_file,
        region_property = ?config.region_property,
        residual_trapping = config.residual_trapping,
        output_dir = %store.root_dir().display(),
        "Run configuration"
    );

    emit_progress(
        &mut progress_cb,
        RunStage::CheckingCache,
        started,
        Some("Checking run cache".to_string()),
        None,
    );

    if request.options.use_cache && store.has_run(&run_id) {
        emit_progress(
            &mut progress_cb,
            RunStage::LoadingCachedResult,
            started,
            Some("Loading cached run".to_string()),
            None,
        );

        let manifest = store.load_manifest(&run_id)?;
        let records = store.load_records(&run_id)?;
        let tables = store.write_tables(mode, &records, request.options.readable_output)?;
        let summary = get_run_summary(&manifest, &ContainmentTable::from_records(records))?;
        summary.log();

        emit_progress(
            &mut progress_cb,
            RunStage::Completed,
            started,
            Some("Loaded cached run".to_string()),
            None,
        );

        return Ok(RunResponse {
            run_id,
            manifest,
            summary,
            tables,
            loaded_from_cache: true,
            total_time_s: started.elapsed().as_secs_f64(),
        });
    }

    emit_progress(
        &mut progress_cb,
        RunStage::BuildingCatalog,
        started,
        Some("Building cell catalog".to_string()),
        None,
    );
    let catalog = build_catalog(&config)?;
    let accountant = build_accountant(&config, mode)?;

    emit_progress(
        &mut progress_cb,
        RunStage::ClassifyingCells,
        started,
        Some("Classifying cells".to_string()),
        None,
    );
    let classifier = build_classifier(&config)?;
    let classification = classifier.classify(&catalog);
    let inputs = StaticInputs::new(catalog, classification, accountant);

    emit_progress(
        &mut progress_cb,
        RunStage::ProcessingTimesteps,
        started,
        Some(format!("Processing {} timesteps", snapshots.len())),
        Some(TimestepProgress {
            processed: 0,
            skipped: 0,
            total: snapshots.len(),
        }),
    );
    let sources: Vec<FileSnapshot> = snapshots.into_iter().map(FileSnapshot).collect();
    // Workers report through a channel; the callback stays on this thread.
    let (tx, rx) = mpsc::channel();
    let output = thread::scope(|scope| {
        let (inputs, sources) = (&inputs, &sources);
        let worker = scope.spawn(move || {
            let report = |timesteps: TimestepProgress| {
                let _ = tx.send(timesteps);
            };
            run_timesteps_with_progress(inputs, sources, cancel, Some(&report))
        });
        for timesteps in rx {
            emit_progress(
                &mut progress_cb,
                RunStage::ProcessingTimesteps,
                started,
                None,
                Some(timesteps),
            );
        }
        worker
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    })?;

    emit_progress(
        &mut progress_cb,
        RunStage::AssemblingTable,
        started,
        Some("Assembling table".to_string()),
        Some(TimestepProgress {
            processed: output.dates.len(),
            skipped: output.skipped.len(),
            total: sources.len(),
        }),
    );

    let grouping = inputs.catalog.grouping();
    let manifest = RunManifest {
        run_id: run_id.clone(),
        name: config.name.clone(),
        calculation_mode: mode,
        timestamp: chrono::Utc::now().to_rfc3339(),
        engine_version: request.options.engine_version.clone(),
        grouping: GroupingInfo {
            zones: grouping.zones,
            regions: grouping.regions,
            hazardous: classifier.hazardous().is_some(),
            zone_labels: inputs.catalog.zone_labels().to_vec(),
            region_labels: inputs.catalog.region_labels().to_vec(),
        },
        residual_trapping: config.residual_trapping,
        dates: output.dates.clone(),
        skipped: output.skipped.clone(),
    };
    let summary = get_run_summary(&manifest, &output.table)?;

    emit_progress(
        &mut progress_cb,
        RunStage::SavingResults,
        started,
        Some("Saving results".to_string()),
        None,
    );
    let records = output.table.records();
    let tables = store.write_tables(mode, records, request.options.readable_output)?;
    store.save_run(&manifest, records)?;

    summary.log();

    emit_progress(
        &mut progress_cb,
        RunStage::Completed,
        started,
        Some("Run completed".to_string()),
        None,
    );

    Ok(RunResponse {
        run_id,
        manifest,
        summary,
        tables,
        loaded_from_cache: false,
        total_time_s: started.elapsed().as_secs_f64(),
    })
}

/// Load the stored run matching a configuration.
pub fn load_run(
    config_path: &Path,
    options: &RunOptions,
) -> AppResult<(RunManifest, ContainmentTable)> {
    let config = load_config(config_path)?;
    let (_, _, run_id, store) = locate_run(&config, options)?;

    let manifest = store.load_manifest(&run_id)?;
    let records = store.load_records(&run_id)?;

    Ok((manifest, ContainmentTable::from_records(records)))
}
