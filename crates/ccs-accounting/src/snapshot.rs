//! Per-timestep field snapshots.

use ccs_core::{CellId, CoreError, Real, ensure_fraction, ensure_non_negative};
use ccs_grid::CellCatalog;
use chrono::NaiveDate;

use crate::error::SnapshotError;

/// Slack on `gas_saturation + water_saturation <= 1`.
const SATURATION_SUM_SLACK: Real = 1e-6;

/// Parse a snapshot date given as `YYYY-MM-DD` or `YYYYMMDD`.
pub fn parse_snapshot_date(s: &str) -> Result<NaiveDate, SnapshotError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
        .map_err(|_| SnapshotError::InvalidDate {
            given: s.to_string(),
        })
}

/// Cell fields for one timestep, as columns aligned with `cell_ids`.
///
/// Rows for cells the catalog does not know (inactive cells) are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSnapshot {
    pub date: NaiveDate,
    pub cell_ids: Vec<u32>,
    pub gas_saturation: Vec<Real>,
    pub water_saturation: Vec<Real>,
    pub gas_density: Vec<Real>,
    pub water_density: Vec<Real>,
    pub dissolved_mass_fraction: Vec<Real>,
    pub trapped_gas_saturation: Option<Vec<Real>>,
}

/// Field values of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellFields {
    pub gas_saturation: Real,
    pub water_saturation: Real,
    pub gas_density: Real,
    pub water_density: Real,
    pub dissolved_mass_fraction: Real,
    /// Zero unless residual trapping is on.
    pub trapped_gas_saturation: Real,
}

impl FieldSnapshot {
    /// Reorder the snapshot to `catalog.cells()` order and validate it.
    pub fn align(
        &self,
        catalog: &CellCatalog,
        residual_trapping: bool,
    ) -> Result<Vec<CellFields>, SnapshotError> {
        let expected = self.cell_ids.len();
        self.check_len("gas_saturation", self.gas_saturation.len(), expected)?;
        self.check_len("water_saturation", self.water_saturation.len(), expected)?;
        self.check_len("gas_density", self.gas_density.len(), expected)?;
        self.check_len("water_density", self.water_density.len(), expected)?;
        self.check_len(
            "dissolved_mass_fraction",
            self.dissolved_mass_fraction.len(),
            expected,
        )?;
        let trapped = match (&self.trapped_gas_saturation, residual_trapping) {
            (Some(column), true) => {
                self.check_len("trapped_gas_saturation", column.len(), expected)?;
                Some(column)
            }
            (None, true) => {
                return Err(SnapshotError::MissingTrappedSaturation { date: self.date });
            }
            (_, false) => None,
        };

        let mut aligned: Vec<Option<CellFields>> = vec![None; catalog.len()];
        for (row, &index) in self.cell_ids.iter().enumerate() {
            let Some(position) = catalog.position(CellId::from_index(index)) else {
                continue;
            };
            if aligned[position].is_some() {
                return Err(SnapshotError::DuplicateCell {
                    date: self.date,
                    index,
                });
            }
            let fields = CellFields {
                gas_saturation: self.gas_saturation[row],
                water_saturation: self.water_saturation[row],
                gas_density: self.gas_density[row],
                water_density: self.water_density[row],
                dissolved_mass_fraction: self.dissolved_mass_fraction[row],
                trapped_gas_saturation: trapped.map_or(0.0, |column| column[row]),
            };
            self.check_fields(index, &fields)?;
            aligned[position] = Some(fields);
        }

        aligned
            .into_iter()
            .zip(catalog.cells())
            .map(|(fields, cell)| {
                fields.ok_or(SnapshotError::MissingCell {
                    date: self.date,
                    index: cell.id.index(),
                })
            })
            .collect()
    }

    fn check_len(
        &self,
        column: &'static str,
        actual: usize,
        expected: usize,
    ) -> Result<(), SnapshotError> {
        if actual != expected {
            return Err(SnapshotError::ColumnLength {
                date: self.date,
                column,
                expected,
                actual,
            });
        }
        Ok(())
    }

    fn check_fields(&self, index: u32, fields: &CellFields) -> Result<(), SnapshotError> {
        let checked: Result<_, CoreError> = ensure_fraction(fields.gas_saturation, "gas_saturation")
            .and_then(|_| ensure_fraction(fields.water_saturation, "water_saturation"))
            .and_then(|_| ensure_fraction(fields.dissolved_mass_fraction, "dissolved_mass_fraction"))
            .and_then(|_| ensure_fraction(fields.trapped_gas_saturation, "trapped_gas_saturation"))
            .and_then(|_| ensure_non_negative(fields.gas_density, "gas_density"))
            .and_then(|_| ensure_non_negative(fields.water_density, "water_density"));
        if let Err(source) = checked {
            return Err(SnapshotError::InvalidValue {
                date: self.date,
                index,
                source,
            });
        }

        let sum = fields.gas_saturation + fields.water_saturation;
        if sum > 1.0 + SATURATION_SUM_SLACK {
            return Err(SnapshotError::SaturationSum {
                date: self.date,
                index,
                sum,
            });
        }
        Ok(())
    }
}
