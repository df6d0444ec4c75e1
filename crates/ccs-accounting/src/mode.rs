//! Calculation modes.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AccountingError;

/// Physical quantity accounted per cell. One mode per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// CO2 mass in kg.
    Mass,
    /// Bulk volume (m3) of every cell holding CO2 above the threshold.
    CellVolume,
    /// Reservoir-condition volume (m3) of the CO2-bearing phases.
    ActualVolume,
}

impl CalculationMode {
    pub const ALL: [CalculationMode; 3] = [
        CalculationMode::Mass,
        CalculationMode::CellVolume,
        CalculationMode::ActualVolume,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CalculationMode::Mass => "mass",
            CalculationMode::CellVolume => "cell_volume",
            CalculationMode::ActualVolume => "actual_volume",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            CalculationMode::Mass => "kg",
            CalculationMode::CellVolume | CalculationMode::ActualVolume => "m3",
        }
    }
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CalculationMode {
    type Err = AccountingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CalculationMode::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AccountingError::UnknownMode {
                given: s.to_string(),
            })
    }
}
