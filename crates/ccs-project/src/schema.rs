//! Run configuration schema.

use std::path::{Path, PathBuf};

use ccs_accounting::{AccountingResult, CalculationMode, DEFAULT_SATURATION_THRESHOLD};
use ccs_boundary::DEFAULT_AUTO_CLOSE_TOLERANCE;
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

/// Output directory used when none is configured, relative to the config.
pub const DEFAULT_OUTPUT_DIR: &str = "share/results/tables";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub version: u32,
    pub name: String,
    pub grid: PathBuf,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub snapshots: Vec<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_dir: Option<PathBuf>,
    /// `mass`, `cell_volume` or `actual_volume`, any case.
    pub calculation_mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containment_polygon: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hazardous_polygon: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_property: Option<String>,
    #[serde(default)]
    pub residual_trapping: bool,
    #[serde(default = "default_saturation_threshold")]
    pub saturation_threshold: f64,
    #[serde(default = "default_auto_close_tolerance")]
    pub auto_close_tolerance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

fn default_saturation_threshold() -> f64 {
    DEFAULT_SATURATION_THRESHOLD
}

fn default_auto_close_tolerance() -> f64 {
    DEFAULT_AUTO_CLOSE_TOLERANCE
}

impl RunConfig {
    /// A config with required fields only; everything else defaulted.
    pub fn new(
        name: impl Into<String>,
        grid: impl Into<PathBuf>,
        snapshots: Vec<PathBuf>,
        mode: CalculationMode,
    ) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            grid: grid.into(),
            snapshots,
            snapshot_dir: None,
            calculation_mode: mode.label().to_string(),
            containment_polygon: None,
            hazardous_polygon: None,
            zone_file: None,
            region_file: None,
            region_property: None,
            residual_trapping: false,
            saturation_threshold: DEFAULT_SATURATION_THRESHOLD,
            auto_close_tolerance: DEFAULT_AUTO_CLOSE_TOLERANCE,
            output_dir: None,
        }
    }

    pub fn mode(&self) -> AccountingResult<CalculationMode> {
        self.calculation_mode.parse()
    }

    /// Make every relative path absolute against `base_dir` and fill in the
    /// default output directory.
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base_dir.join(&*p);
            }
        };
        resolve(&mut self.grid);
        self.snapshots.iter_mut().for_each(resolve);
        for p in [
            &mut self.snapshot_dir,
            &mut self.containment_polygon,
            &mut self.hazardous_polygon,
            &mut self.zone_file,
            &mut self.region_file,
        ]
        .into_iter()
        .flatten()
        {
            resolve(p);
        }
        let output_dir = self
            .output_dir
            .get_or_insert_with(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        resolve(output_dir);
    }

    /// Output directory, falling back to the default relative path.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_optional_fields() {
        let yaml = "version: 1\nname: demo\ngrid: grid.json\nsnapshot_dir: restarts\ncalculation_mode: MASS\n";
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.mode().unwrap(), CalculationMode::Mass);
        assert!(!config.residual_trapping);
        assert_eq!(config.saturation_threshold, DEFAULT_SATURATION_THRESHOLD);
        assert_eq!(config.auto_close_tolerance, DEFAULT_AUTO_CLOSE_TOLERANCE);
        assert_eq!(config.output_dir(), PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn resolve_paths_keeps_absolute_paths() {
        let mut config = RunConfig::new(
            "demo",
            "grid.json",
            vec![PathBuf::from("/data/t0.json")],
            CalculationMode::Mass,
        );
        config.zone_file = Some(PathBuf::from("zones.yml"));
        config.resolve_paths(Path::new("/runs/a"));

        assert_eq!(config.grid, PathBuf::from("/runs/a/grid.json"));
        assert_eq!(config.snapshots[0], PathBuf::from("/data/t0.json"));
        assert_eq!(config.zone_file, Some(PathBuf::from("/runs/a/zones.yml")));
        assert_eq!(
            config.output_dir(),
            PathBuf::from("/runs/a/share/results/tables")
        );
    }
}
