//! Per-cell phase quantities.

use ccs_core::{Real, in_kg, kg_per_m3, m3, phase_mass, unitless};
use ccs_grid::Cell;

use crate::error::{AccountingError, AccountingResult};
use crate::mode::CalculationMode;
use crate::phase::Phase;
use crate::snapshot::CellFields;

/// Saturations and fractions at or below this value count as no CO2.
pub const DEFAULT_SATURATION_THRESHOLD: Real = 1e-7;

/// Quantity of each phase in one cell at one timestep, in the unit of the
/// calculation mode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseQuantity {
    /// All gas, free plus trapped.
    pub gas: Real,
    pub free_gas: Real,
    pub trapped_gas: Real,
    pub dissolved: Real,
    pub total: Real,
}

impl PhaseQuantity {
    pub fn get(&self, phase: Phase) -> Real {
        match phase {
            Phase::Total => self.total,
            Phase::Gas => self.gas,
            Phase::FreeGas => self.free_gas,
            Phase::TrappedGas => self.trapped_gas,
            Phase::Dissolved => self.dissolved,
        }
    }
}

/// Converts a cell's field values into a `PhaseQuantity`.
///
/// The threshold only decides whether a phase is present; it never affects
/// cell classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseAccountant {
    mode: CalculationMode,
    threshold: Real,
    residual_trapping: bool,
}

impl PhaseAccountant {
    pub fn new(mode: CalculationMode) -> Self {
        Self {
            mode,
            threshold: DEFAULT_SATURATION_THRESHOLD,
            residual_trapping: false,
        }
    }

    pub fn with_threshold(mut self, threshold: Real) -> AccountingResult<Self> {
        if !threshold.is_finite() || !(0.0..1.0).contains(&threshold) {
            return Err(AccountingError::InvalidThreshold { value: threshold });
        }
        self.threshold = threshold;
        Ok(self)
    }

    pub fn with_residual_trapping(mut self, enabled: bool) -> Self {
        self.residual_trapping = enabled;
        self
    }

    pub fn mode(&self) -> CalculationMode {
        self.mode
    }

    pub fn threshold(&self) -> Real {
        self.threshold
    }

    pub fn residual_trapping(&self) -> bool {
        self.residual_trapping
    }

    /// Phases this accountant reports.
    pub fn phases(&self) -> Vec<Phase> {
        Phase::reported(self.residual_trapping)
    }

    pub fn quantities(&self, cell: &Cell, fields: &CellFields) -> PhaseQuantity {
        let sgas = self.present(fields.gas_saturation);
        let trapped_sat = if self.residual_trapping {
            self.present(fields.trapped_gas_saturation.min(sgas))
        } else {
            0.0
        };
        let free_sat = self.present(sgas - trapped_sat);
        let dissolved_frac = self.present(fields.dissolved_mass_fraction);

        match self.mode {
            CalculationMode::CellVolume => {
                let covered = |present: Real| if present > 0.0 { cell.bulk_volume } else { 0.0 };
                let dissolved_sat = dissolved_frac * fields.water_saturation;
                PhaseQuantity {
                    gas: covered(sgas),
                    free_gas: covered(free_sat),
                    trapped_gas: covered(trapped_sat),
                    dissolved: covered(dissolved_sat),
                    total: covered(sgas + dissolved_sat),
                }
            }
            CalculationMode::ActualVolume => {
                let free_gas = cell.bulk_volume * free_sat;
                let trapped_gas = cell.bulk_volume * trapped_sat;
                let dissolved = cell.bulk_volume * fields.water_saturation * dissolved_frac;
                PhaseQuantity {
                    gas: free_gas + trapped_gas,
                    free_gas,
                    trapped_gas,
                    dissolved,
                    total: free_gas + trapped_gas + dissolved,
                }
            }
            CalculationMode::Mass => {
                let pore_volume = m3(cell.pore_volume());
                let gas_density = kg_per_m3(fields.gas_density);
                let free_gas = in_kg(phase_mass(pore_volume, unitless(free_sat), gas_density));
                let trapped_gas =
                    in_kg(phase_mass(pore_volume, unitless(trapped_sat), gas_density));
                let dissolved = in_kg(phase_mass(
                    pore_volume,
                    unitless(fields.water_saturation * dissolved_frac),
                    kg_per_m3(fields.water_density),
                ));
                PhaseQuantity {
                    gas: free_gas + trapped_gas,
                    free_gas,
                    trapped_gas,
                    dissolved,
                    total: free_gas + trapped_gas + dissolved,
                }
            }
        }
    }

    /// `value` if it exceeds the threshold, else zero.
    fn present(&self, value: Real) -> Real {
        if value > self.threshold { value } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccs_core::CellId;
    use ccs_grid::{RegionLabel, ZoneLabel};

    fn cell() -> Cell {
        Cell {
            id: CellId::from_index(0),
            layer: 1,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            bulk_volume: 100.0,
            porosity: 0.2,
            zone: ZoneLabel::All,
            region: RegionLabel::All,
        }
    }

    fn fields(sgas: f64, amfg: f64) -> CellFields {
        CellFields {
            gas_saturation: sgas,
            water_saturation: 1.0 - sgas,
            gas_density: 700.0,
            water_density: 1000.0,
            dissolved_mass_fraction: amfg,
            trapped_gas_saturation: 0.0,
        }
    }

    #[test]
    fn mass_uses_pore_volume_and_density() {
        let q = PhaseAccountant::new(CalculationMode::Mass).quantities(&cell(), &fields(0.5, 0.02));
        // 100 * 0.2 * 0.5 * 700
        assert!((q.gas - 7000.0).abs() < 1e-9);
        // 100 * 0.2 * 0.5 * 0.02 * 1000
        assert!((q.dissolved - 200.0).abs() < 1e-9);
        assert!((q.total - 7200.0).abs() < 1e-9);
        assert_eq!(q.free_gas, q.gas);
        assert_eq!(q.trapped_gas, 0.0);
    }

    #[test]
    fn cell_volume_counts_whole_cell() {
        let acc = PhaseAccountant::new(CalculationMode::CellVolume);
        let q = acc.quantities(&cell(), &fields(0.5, 0.0));
        assert_eq!(q.gas, 100.0);
        assert_eq!(q.dissolved, 0.0);
        assert_eq!(q.total, 100.0);
    }

    #[test]
    fn actual_volume_scales_by_saturation() {
        let acc = PhaseAccountant::new(CalculationMode::ActualVolume);
        let q = acc.quantities(&cell(), &fields(0.25, 0.04));
        assert!((q.gas - 25.0).abs() < 1e-12);
        assert!((q.dissolved - 100.0 * 0.75 * 0.04).abs() < 1e-12);
    }

    #[test]
    fn below_threshold_contributes_nothing() {
        for mode in CalculationMode::ALL {
            let q = PhaseAccountant::new(mode).quantities(&cell(), &fields(1e-9, 1e-9));
            assert_eq!(q, PhaseQuantity::default(), "mode {mode}");
        }
    }

    #[test]
    fn residual_trapping_splits_gas() {
        let acc = PhaseAccountant::new(CalculationMode::ActualVolume).with_residual_trapping(true);
        let mut f = fields(0.5, 0.0);
        f.trapped_gas_saturation = 0.2;
        let q = acc.quantities(&cell(), &f);
        assert!((q.trapped_gas - 20.0).abs() < 1e-12);
        assert!((q.free_gas - 30.0).abs() < 1e-12);
        assert!((q.gas - 50.0).abs() < 1e-12);
        assert_eq!(acc.phases(), Phase::reported(true));
    }

    #[test]
    fn trapped_saturation_is_capped_by_gas() {
        let acc = PhaseAccountant::new(CalculationMode::Mass).with_residual_trapping(true);
        let mut f = fields(0.1, 0.0);
        f.trapped_gas_saturation = 0.3;
        let q = acc.quantities(&cell(), &f);
        assert_eq!(q.free_gas, 0.0);
        assert!((q.trapped_gas - q.gas).abs() < 1e-9);
    }

    #[test]
    fn threshold_validation() {
        let acc = PhaseAccountant::new(CalculationMode::Mass);
        assert!(acc.with_threshold(0.01).is_ok());
        assert!(acc.with_threshold(-1.0).is_err());
        assert!(acc.with_threshold(f64::NAN).is_err());
    }
}
