//! Result data types.

use ccs_accounting::{CalculationMode, Phase};
use ccs_boundary::ContainmentCategory;
use ccs_grid::{RegionLabel, ZoneLabel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type RunId = String;

/// One row of the output table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainmentRecord {
    pub date: NaiveDate,
    pub zone: ZoneLabel,
    pub region: RegionLabel,
    pub category: ContainmentCategory,
    pub phase: Phase,
    pub calculation_mode: CalculationMode,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub name: String,
    pub calculation_mode: CalculationMode,
    pub timestamp: String,
    pub engine_version: String,
    pub grouping: GroupingInfo,
    pub residual_trapping: bool,
    pub dates: Vec<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedTimestep>,
}

/// Which grouping dimensions were active, and with which labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GroupingInfo {
    pub zones: bool,
    pub regions: bool,
    pub hazardous: bool,
    pub zone_labels: Vec<ZoneLabel>,
    pub region_labels: Vec<RegionLabel>,
}

/// A snapshot that was reported and left out of the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedTimestep {
    pub source: String,
    pub reason: String,
}
