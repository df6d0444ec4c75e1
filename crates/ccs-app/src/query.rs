//! Query helpers for extracting data from finished runs.

use std::fmt::Write;

use ccs_accounting::{CalculationMode, Phase};
use ccs_boundary::ContainmentCategory;
use ccs_grid::{RegionLabel, ZoneLabel};
use ccs_results::{ContainmentTable, RunManifest};
use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseShare {
    pub phase: Phase,
    pub value: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: ContainmentCategory,
    pub value: f64,
    pub percent: f64,
}

/// End-state overview of a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub name: String,
    pub mode: CalculationMode,
    pub date_count: usize,
    pub date_range: (NaiveDate, NaiveDate),
    /// Total over all groups at the last date.
    pub total: f64,
    pub phases: Vec<PhaseShare>,
    pub categories: Vec<CategoryShare>,
    pub zones: Vec<ZoneLabel>,
    pub regions: Vec<RegionLabel>,
    pub skipped: usize,
}

fn percent(value: f64, total: f64) -> f64 {
    if total > 0.0 { 100.0 * value / total } else { 0.0 }
}

/// Summarize a run from its manifest and table.
pub fn get_run_summary(manifest: &RunManifest, table: &ContainmentTable) -> AppResult<RunSummary> {
    let dates = table.dates();
    let (Some(&first), Some(&last)) = (dates.first(), dates.last()) else {
        return Err(AppError::InvalidInput("No records in run".to_string()));
    };

    let mut phases: Vec<PhaseShare> = Vec::new();
    let mut categories: Vec<CategoryShare> = Vec::new();
    let mut total = 0.0;
    for record in table.at(last) {
        if record.phase == Phase::Total {
            total += record.value;
            match categories.iter_mut().find(|c| c.category == record.category) {
                Some(share) => share.value += record.value,
                None => categories.push(CategoryShare {
                    category: record.category,
                    value: record.value,
                    percent: 0.0,
                }),
            }
        } else {
            match phases.iter_mut().find(|p| p.phase == record.phase) {
                Some(share) => share.value += record.value,
                None => phases.push(PhaseShare {
                    phase: record.phase,
                    value: record.value,
                    percent: 0.0,
                }),
            }
        }
    }
    phases.sort_by_key(|p| p.phase);
    categories.sort_by_key(|c| c.category);
    for share in &mut phases {
        share.percent = percent(share.value, total);
    }
    for share in &mut categories {
        share.percent = percent(share.value, total);
    }

    Ok(RunSummary {
        name: manifest.name.clone(),
        mode: manifest.calculation_mode,
        date_count: dates.len(),
        date_range: (first, last),
        total,
        phases,
        categories,
        zones: manifest.grouping.zone_labels.clone(),
        regions: manifest.grouping.region_labels.clone(),
        skipped: manifest.skipped.len(),
    })
}

impl RunSummary {
    /// Human-readable report, one item per line.
    pub fn render(&self) -> String {
        let unit = self.mode.unit();
        let mut out = String::new();
        let _ = writeln!(out, "Run '{}' ({})", self.name, self.mode);
        let _ = writeln!(
            out,
            "Dates: {} ({} to {})",
            self.date_count, self.date_range.0, self.date_range.1
        );
        if self.skipped > 0 {
            let _ = writeln!(out, "Skipped timesteps: {}", self.skipped);
        }
        let _ = writeln!(out, "End state at {}:", self.date_range.1);
        let _ = writeln!(out, "  {:<14}{:>16.4e} {unit}", "total", self.total);
        for share in &self.phases {
            let _ = writeln!(
                out,
                "  {:<14}{:>16.4e} {unit} ({:5.1} %)",
                share.phase.label(),
                share.value,
                share.percent
            );
        }
        for share in &self.categories {
            let _ = writeln!(
                out,
                "  {:<14}{:>16.4e} {unit} ({:5.1} %)",
                share.category.label(),
                share.value,
                share.percent
            );
        }
        let zones: Vec<String> = self.zones.iter().map(ToString::to_string).collect();
        let regions: Vec<String> = self.regions.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "Zones: {}", zones.join(", "));
        let _ = writeln!(out, "Regions: {}", regions.join(", "));
        out
    }

    /// Emit the summary as `info` events.
    pub fn log(&self) {
        for line in self.render().lines() {
            tracing::info!("{line}");
        }
    }
}

/// Time series of one (zone, region, category, phase) group.
pub fn extract_series(
    table: &ContainmentTable,
    zone: &ZoneLabel,
    region: &RegionLabel,
    category: ContainmentCategory,
    phase: Phase,
) -> AppResult<Vec<(NaiveDate, f64)>> {
    let series = table.series(zone, region, category, phase);
    if series.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "No rows for zone '{zone}', region '{region}', category '{category}', phase '{phase}'"
        )));
    }
    Ok(series)
}

/// `date,value` CSV of a series.
pub fn series_csv(series: &[(NaiveDate, f64)]) -> String {
    let mut out = String::from("date,value\n");
    for (date, value) in series {
        let _ = writeln!(out, "{},{}", date.format("%Y-%m-%d"), value);
    }
    out
}
