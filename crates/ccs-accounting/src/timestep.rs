//! Per-timestep processing.

use ccs_boundary::Classification;
use ccs_grid::CellCatalog;

use crate::accountant::PhaseAccountant;
use crate::aggregate::{ContainmentAggregator, TimestepTotals};
use crate::error::SnapshotError;
use crate::snapshot::FieldSnapshot;

/// Reduce one snapshot to grouped totals.
///
/// Pure: the catalog and classification are shared across timesteps, and
/// cells are accumulated in catalog order so the result does not depend on
/// the order of rows in the snapshot.
pub fn process_timestep(
    catalog: &CellCatalog,
    classification: &Classification,
    accountant: &PhaseAccountant,
    snapshot: &FieldSnapshot,
) -> Result<TimestepTotals, SnapshotError> {
    let fields = snapshot.align(catalog, accountant.residual_trapping())?;

    let mut aggregator = ContainmentAggregator::new(
        catalog.zone_labels(),
        catalog.region_labels(),
        &classification.reported_categories(),
        &accountant.phases(),
    );
    for ((cell, fields), &category) in catalog
        .cells()
        .iter()
        .zip(&fields)
        .zip(classification.categories())
    {
        let quantity = accountant.quantities(cell, fields);
        aggregator.add(&cell.zone, &cell.region, category, &quantity);
    }
    Ok(aggregator.finish())
}
