//! Grouped reduction of per-cell phase quantities.

use std::collections::BTreeMap;

use ccs_boundary::ContainmentCategory;
use ccs_core::Real;
use ccs_grid::{RegionLabel, ZoneLabel};
use serde::{Deserialize, Serialize};

use crate::accountant::PhaseQuantity;
use crate::phase::Phase;

/// One row of the grouped result for a timestep.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey {
    pub zone: ZoneLabel,
    pub region: RegionLabel,
    pub category: ContainmentCategory,
    pub phase: Phase,
}

/// Sums keyed by `GroupKey` for one timestep.
///
/// Every key in the run's universe is present, zero or not.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimestepTotals {
    values: BTreeMap<GroupKey, Real>,
}

impl TimestepTotals {
    pub fn get(&self, key: &GroupKey) -> Option<Real> {
        self.values.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, Real)> {
        self.values.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all rows matching `phase` and `category`, across zones and regions.
    pub fn sum_where(&self, phase: Phase, category: Option<ContainmentCategory>) -> Real {
        self.values
            .iter()
            .filter(|(k, _)| k.phase == phase && category.is_none_or(|c| k.category == c))
            .map(|(_, v)| *v)
            .sum()
    }
}

/// Accumulates per-cell quantities into `TimestepTotals`.
#[derive(Debug, Clone)]
pub struct ContainmentAggregator {
    values: BTreeMap<GroupKey, Real>,
    phases: Vec<Phase>,
}

impl ContainmentAggregator {
    /// Seed every (zone, region, category, phase) combination with zero.
    pub fn new(
        zones: &[ZoneLabel],
        regions: &[RegionLabel],
        categories: &[ContainmentCategory],
        phases: &[Phase],
    ) -> Self {
        let mut values = BTreeMap::new();
        for zone in zones {
            for region in regions {
                for &category in categories {
                    for &phase in phases {
                        values.insert(
                            GroupKey {
                                zone: zone.clone(),
                                region: *region,
                                category,
                                phase,
                            },
                            0.0,
                        );
                    }
                }
            }
        }
        Self {
            values,
            phases: phases.to_vec(),
        }
    }

    /// Add one cell's quantities to its group.
    pub fn add(
        &mut self,
        zone: &ZoneLabel,
        region: &RegionLabel,
        category: ContainmentCategory,
        quantity: &PhaseQuantity,
    ) {
        for &phase in &self.phases {
            let key = GroupKey {
                zone: zone.clone(),
                region: *region,
                category,
                phase,
            };
            *self.values.entry(key).or_insert(0.0) += quantity.get(phase);
        }
    }

    pub fn finish(self) -> TimestepTotals {
        TimestepTotals {
            values: self.values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_all_combinations() {
        let agg = ContainmentAggregator::new(
            &[ZoneLabel::named("a"), ZoneLabel::named("b")],
            &[RegionLabel::All],
            &[ContainmentCategory::Contained, ContainmentCategory::Outside],
            &Phase::reported(false),
        );
        let totals = agg.finish();
        assert_eq!(totals.len(), 2 * 2 * 3);
        assert!(totals.iter().all(|(_, v)| v == 0.0));
    }

    #[test]
    fn add_accumulates_each_phase() {
        let phases = Phase::reported(false);
        let mut agg = ContainmentAggregator::new(
            &[ZoneLabel::All],
            &[RegionLabel::All],
            &[ContainmentCategory::Contained],
            &phases,
        );
        let q = PhaseQuantity {
            gas: 2.0,
            free_gas: 2.0,
            trapped_gas: 0.0,
            dissolved: 1.0,
            total: 3.0,
        };
        agg.add(&ZoneLabel::All, &RegionLabel::All, ContainmentCategory::Contained, &q);
        agg.add(&ZoneLabel::All, &RegionLabel::All, ContainmentCategory::Contained, &q);
        let totals = agg.finish();
        assert_eq!(totals.sum_where(Phase::Total, None), 6.0);
        assert_eq!(totals.sum_where(Phase::Gas, Some(ContainmentCategory::Contained)), 4.0);
        assert_eq!(totals.sum_where(Phase::Dissolved, Some(ContainmentCategory::Outside)), 0.0);
    }
}
