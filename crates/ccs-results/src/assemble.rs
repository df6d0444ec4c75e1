//! Ordered assembly of per-timestep totals into one table.

use std::collections::BTreeMap;

use ccs_accounting::{CalculationMode, Phase, TimestepTotals};
use ccs_boundary::ContainmentCategory;
use ccs_grid::{RegionLabel, ZoneLabel};
use chrono::NaiveDate;

use crate::types::ContainmentRecord;
use crate::{ResultsError, ResultsResult};

/// Collects timesteps in any order and emits them sorted by date.
///
/// A date seen twice is an error; nothing is overwritten.
#[derive(Debug, Clone)]
pub struct TimeSeriesAssembler {
    mode: CalculationMode,
    timesteps: BTreeMap<NaiveDate, TimestepTotals>,
}

impl TimeSeriesAssembler {
    pub fn new(mode: CalculationMode) -> Self {
        Self {
            mode,
            timesteps: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, date: NaiveDate, totals: TimestepTotals) -> ResultsResult<()> {
        if self.timesteps.contains_key(&date) {
            return Err(ResultsError::DuplicateDate { date });
        }
        self.timesteps.insert(date, totals);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.timesteps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timesteps.is_empty()
    }

    pub fn finish(self) -> ContainmentTable {
        let mode = self.mode;
        let records = self
            .timesteps
            .into_iter()
            .flat_map(|(date, totals)| {
                totals
                    .iter()
                    .map(|(key, value)| ContainmentRecord {
                        date,
                        zone: key.zone.clone(),
                        region: key.region,
                        category: key.category,
                        phase: key.phase,
                        calculation_mode: mode,
                        value,
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        ContainmentTable { records }
    }
}

/// The containment time series, sorted by date then group key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContainmentTable {
    records: Vec<ContainmentRecord>,
}

impl ContainmentTable {
    /// Wrap records that are already in table order, e.g. loaded from a store.
    pub fn from_records(records: Vec<ContainmentRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ContainmentRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ContainmentRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct dates, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.records.iter().map(|r| r.date).collect();
        dates.dedup();
        dates
    }

    /// Rows of one date.
    pub fn at(&self, date: NaiveDate) -> impl Iterator<Item = &ContainmentRecord> {
        self.records.iter().filter(move |r| r.date == date)
    }

    /// `(date, value)` for one group across the run.
    pub fn series(
        &self,
        zone: &ZoneLabel,
        region: &RegionLabel,
        category: ContainmentCategory,
        phase: Phase,
    ) -> Vec<(NaiveDate, f64)> {
        self.records
            .iter()
            .filter(|r| {
                r.zone == *zone && r.region == *region && r.category == category && r.phase == phase
            })
            .map(|r| (r.date, r.value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccs_accounting::ContainmentAggregator;

    fn totals(value: f64) -> TimestepTotals {
        let mut agg = ContainmentAggregator::new(
            &[ZoneLabel::All],
            &[RegionLabel::All],
            &[ContainmentCategory::Contained],
            &[Phase::Total],
        );
        let q = ccs_accounting::PhaseQuantity {
            total: value,
            ..Default::default()
        };
        agg.add(&ZoneLabel::All, &RegionLabel::All, ContainmentCategory::Contained, &q);
        agg.finish()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, d).unwrap()
    }

    #[test]
    fn sorts_by_date() {
        let mut asm = TimeSeriesAssembler::new(CalculationMode::Mass);
        asm.push(day(3), totals(3.0)).unwrap();
        asm.push(day(1), totals(1.0)).unwrap();
        asm.push(day(2), totals(2.0)).unwrap();

        let table = asm.finish();
        assert_eq!(table.dates(), vec![day(1), day(2), day(3)]);
        let series = table.series(
            &ZoneLabel::All,
            &RegionLabel::All,
            ContainmentCategory::Contained,
            Phase::Total,
        );
        assert_eq!(series, vec![(day(1), 1.0), (day(2), 2.0), (day(3), 3.0)]);
    }

    #[test]
    fn duplicate_date_is_rejected() {
        let mut asm = TimeSeriesAssembler::new(CalculationMode::Mass);
        asm.push(day(1), totals(1.0)).unwrap();
        let err = asm.push(day(1), totals(5.0)).unwrap_err();
        assert!(matches!(err, ResultsError::DuplicateDate { .. }));
        assert_eq!(asm.len(), 1);
    }
}
