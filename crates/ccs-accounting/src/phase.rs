//! CO2 phases reported per row.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A CO2 phase (or the sum over phases).
///
/// Without residual trapping the free-gas phase is reported as `Gas`; with
/// it, gas splits into `FreeGas` and `TrappedGas`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Total,
    Gas,
    FreeGas,
    TrappedGas,
    Dissolved,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Total,
        Phase::Gas,
        Phase::FreeGas,
        Phase::TrappedGas,
        Phase::Dissolved,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Phase::Total => "total",
            Phase::Gas => "gas",
            Phase::FreeGas => "free_gas",
            Phase::TrappedGas => "trapped_gas",
            Phase::Dissolved => "dissolved",
        }
    }

    /// Phases reported for a run.
    pub fn reported(residual_trapping: bool) -> Vec<Phase> {
        if residual_trapping {
            vec![
                Phase::Total,
                Phase::FreeGas,
                Phase::TrappedGas,
                Phase::Dissolved,
            ]
        } else {
            vec![Phase::Total, Phase::Gas, Phase::Dissolved]
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl core::str::FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown phase '{s}'"))
    }
}
