//! Engine behavior over in-memory snapshots.

use std::sync::Mutex;

use ccs_accounting::{CalculationMode, FieldSnapshot, Phase, PhaseAccountant};
use ccs_app::{
    AppError, CancelToken, StaticInputs, TimestepProgress, run_timesteps,
    run_timesteps_with_progress,
};
use ccs_boundary::{BoundaryClassifier, ContainmentCategory};
use ccs_grid::{CatalogBuilder, CellInput, RegionLabel, ZoneLabel};
use chrono::NaiveDate;

fn inputs() -> StaticInputs {
    let mut builder = CatalogBuilder::new();
    builder
        .add_cell(CellInput::new(0, 1, (0.5, 0.5), 10.0, 0.2))
        .add_cell(CellInput::new(1, 1, (1.5, 0.5), 10.0, 0.2));
    let catalog = builder.build().unwrap();
    let classification = BoundaryClassifier::default().classify(&catalog);
    StaticInputs::new(
        catalog,
        classification,
        PhaseAccountant::new(CalculationMode::ActualVolume),
    )
}

fn snapshot(year: i32, sgas: f64) -> FieldSnapshot {
    FieldSnapshot {
        date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
        cell_ids: vec![0, 1],
        gas_saturation: vec![sgas, sgas],
        water_saturation: vec![1.0 - sgas, 1.0 - sgas],
        gas_density: vec![650.0; 2],
        water_density: vec![1010.0; 2],
        dissolved_mass_fraction: vec![0.0; 2],
        trapped_gas_saturation: None,
    }
}

fn contained_total(output: &ccs_app::EngineOutput) -> Vec<(NaiveDate, f64)> {
    output.table.series(
        &ZoneLabel::All,
        &RegionLabel::All,
        ContainmentCategory::Contained,
        Phase::Total,
    )
}

#[test]
fn timesteps_come_out_sorted() {
    let sources = vec![snapshot(2040, 0.3), snapshot(2030, 0.1), snapshot(2035, 0.2)];
    let output = run_timesteps(&inputs(), &sources, &CancelToken::new()).unwrap();

    let series = contained_total(&output);
    let years: Vec<String> = series.iter().map(|(d, _)| d.format("%Y").to_string()).collect();
    assert_eq!(years, vec!["2030", "2035", "2040"]);
    assert!((series[0].1 - 2.0).abs() < 1e-12);
    assert!((series[2].1 - 6.0).abs() < 1e-12);
    assert!(output.skipped.is_empty());
}

#[test]
fn bad_snapshot_is_skipped_not_zeroed() {
    let mut broken = snapshot(2035, 0.2);
    broken.gas_saturation.pop();
    let sources = vec![snapshot(2030, 0.1), broken, snapshot(2040, 0.3)];

    let output = run_timesteps(&inputs(), &sources, &CancelToken::new()).unwrap();

    assert_eq!(output.dates.len(), 2);
    assert_eq!(output.skipped.len(), 1);
    assert!(output.skipped[0].reason.contains("gas_saturation"));
    assert!(
        output
            .table
            .records()
            .iter()
            .all(|r| r.date.format("%Y").to_string() != "2035")
    );
}

#[test]
fn each_finished_timestep_is_reported() {
    let mut broken = snapshot(2035, 0.2);
    broken.gas_saturation.pop();
    let sources = vec![snapshot(2030, 0.1), broken, snapshot(2040, 0.3)];

    let events = Mutex::new(Vec::new());
    let record = |progress: TimestepProgress| events.lock().unwrap().push(progress);
    run_timesteps_with_progress(&inputs(), &sources, &CancelToken::new(), Some(&record)).unwrap();

    let events = events.into_inner().unwrap();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.total == 3));
    assert!(events.iter().all(|e| e.processed + e.skipped >= 1));
    assert_eq!(events.iter().map(|e| e.processed).max(), Some(2));
    assert_eq!(events.iter().map(|e| e.skipped).max(), Some(1));
}

#[test]
fn snapshot_repeating_a_cell_is_skipped() {
    let mut repeated = snapshot(2035, 0.5);
    repeated.cell_ids = vec![0, 0];
    let sources = vec![snapshot(2030, 0.1), repeated];

    let output = run_timesteps(&inputs(), &sources, &CancelToken::new()).unwrap();

    assert_eq!(output.dates.len(), 1);
    assert_eq!(output.skipped.len(), 1);
    assert!(output.skipped[0].reason.contains("more than once"));
}

#[test]
fn duplicate_dates_are_fatal() {
    let sources = vec![snapshot(2030, 0.1), snapshot(2030, 0.2)];
    let err = run_timesteps(&inputs(), &sources, &CancelToken::new()).unwrap_err();
    assert!(matches!(err, AppError::DuplicateDate { .. }));
}

#[test]
fn cancelled_run_returns_nothing() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let sources = vec![snapshot(2030, 0.1)];
    assert!(matches!(
        run_timesteps(&inputs(), &sources, &cancel),
        Err(AppError::Cancelled)
    ));
}

#[test]
fn all_snapshots_skipped_is_an_error() {
    let mut broken = snapshot(2030, 0.1);
    broken.cell_ids = vec![0];
    assert!(matches!(
        run_timesteps(&inputs(), &[broken], &CancelToken::new()),
        Err(AppError::NoTimesteps)
    ));
}
