//! Integration tests for ccs-grid.

use std::collections::HashMap;

use ccs_core::CellId;
use ccs_grid::{
    CatalogBuilder, CatalogError, CellInput, GroupingDims, RegionLabel, RegionSource, ZoneLabel,
    ZoneRange, ZoneSource,
};

fn column_of_layers(layers: u32) -> Vec<CellInput> {
    (0..layers)
        .map(|k| CellInput::new(k, k + 1, (0.5, 0.5), 10.0, 0.25).with_depth(1000.0 + k as f64))
        .collect()
}

#[test]
fn build_without_grouping_inputs() {
    let mut builder = CatalogBuilder::new();
    builder.add_cells(column_of_layers(3));
    let catalog = builder.build().unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.zone_labels(), &[ZoneLabel::All]);
    assert_eq!(catalog.region_labels(), &[RegionLabel::All]);
    assert_eq!(catalog.grouping(), GroupingDims::default());
    assert!(catalog
        .cells()
        .iter()
        .all(|c| c.zone == ZoneLabel::All && c.region == RegionLabel::All));
}

#[test]
fn unassigned_layer_is_kept() {
    // Layers 1-2 in ZoneA, layer 3 uncovered.
    let mut builder = CatalogBuilder::new();
    builder
        .add_cells(column_of_layers(3))
        .zones(ZoneSource::Ranges(vec![ZoneRange::new("ZoneA", 1, 2)]));
    let catalog = builder.build().unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(
        catalog.zone_labels(),
        &[ZoneLabel::named("ZoneA"), ZoneLabel::Unassigned]
    );
    let third = catalog.cell(CellId::from_index(2)).unwrap();
    assert_eq!(third.zone, ZoneLabel::Unassigned);
    assert!(catalog.grouping().zones);
    assert!(!catalog.grouping().regions);
}

#[test]
fn declared_zone_without_cells_is_in_universe() {
    let mut builder = CatalogBuilder::new();
    builder.add_cells(column_of_layers(2)).zones(ZoneSource::Ranges(vec![
        ZoneRange::new("Shallow", 1, 2),
        ZoneRange::new("Deep", 10, 12),
    ]));
    let catalog = builder.build().unwrap();

    assert_eq!(
        catalog.zone_labels(),
        &[ZoneLabel::named("Deep"), ZoneLabel::named("Shallow")]
    );
}

#[test]
fn inactive_cells_are_dropped_and_counted() {
    let mut builder = CatalogBuilder::new();
    builder
        .add_cell(CellInput::new(0, 1, (0.0, 0.0), 1.0, 0.2))
        .add_cell(CellInput::new(1, 1, (1.0, 0.0), 1.0, 0.2).inactive())
        .add_cell(CellInput::new(2, 1, (2.0, 0.0), 1.0, 0.2));
    let catalog = builder.build().unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.stats().inactive_cells, 1);
    assert_eq!(catalog.stats().total_cells, 3);
    assert!(catalog.position(CellId::from_index(1)).is_none());
    assert_eq!(catalog.position(CellId::from_index(2)), Some(1));
}

#[test]
fn regions_from_per_cell_ids() {
    let ids: HashMap<u32, i64> = [(0, 2), (1, 1), (2, 2)].into_iter().collect();
    let mut builder = CatalogBuilder::new();
    builder
        .add_cells(column_of_layers(3))
        .regions(RegionSource::new("FIPNUM", ids));
    let catalog = builder.build().unwrap();

    assert_eq!(
        catalog.region_labels(),
        &[RegionLabel::Id(1), RegionLabel::Id(2)]
    );
    assert_eq!(catalog.cells()[1].region, RegionLabel::Id(1));
}

#[test]
fn region_input_must_cover_active_cells() {
    let ids: HashMap<u32, i64> = [(0, 1)].into_iter().collect();
    let mut builder = CatalogBuilder::new();
    builder
        .add_cells(column_of_layers(2))
        .regions(RegionSource::new("regions.csv", ids));

    let err = builder.build().unwrap_err();
    assert_eq!(
        err,
        CatalogError::MissingRegion {
            origin: "regions.csv".to_string(),
            index: 1
        }
    );
}

#[test]
fn all_inactive_is_an_error() {
    let mut builder = CatalogBuilder::new();
    builder.add_cell(CellInput::new(0, 1, (0.0, 0.0), 1.0, 0.2).inactive());
    assert_eq!(
        builder.build().unwrap_err(),
        CatalogError::NoActiveCells { inactive: 1 }
    );
}

#[test]
fn reserved_zone_name_is_rejected() {
    let mut labels = HashMap::new();
    labels.insert(0, "all".to_string());
    let mut builder = CatalogBuilder::new();
    builder
        .add_cells(column_of_layers(1))
        .zones(ZoneSource::PerCell(labels));
    assert!(matches!(
        builder.build(),
        Err(CatalogError::ReservedZoneName { .. })
    ));
}

#[test]
fn cells_are_ordered_by_id() {
    let mut builder = CatalogBuilder::new();
    builder
        .add_cell(CellInput::new(9, 1, (0.0, 0.0), 1.0, 0.2))
        .add_cell(CellInput::new(4, 1, (0.0, 0.0), 1.0, 0.2))
        .add_cell(CellInput::new(6, 1, (0.0, 0.0), 1.0, 0.2));
    let catalog = builder.build().unwrap();
    let ids: Vec<u32> = catalog.cells().iter().map(|c| c.id.index()).collect();
    assert_eq!(ids, vec![4, 6, 9]);
}

#[test]
fn max_index_is_rejected_before_ids_collide() {
    let mut builder = CatalogBuilder::new();
    builder
        .add_cell(CellInput::new(u32::MAX - 1, 1, (0.0, 0.0), 1.0, 0.2))
        .add_cell(CellInput::new(u32::MAX, 1, (1.0, 0.0), 1.0, 0.2));
    assert_eq!(
        builder.build().unwrap_err(),
        CatalogError::IndexOutOfRange { index: u32::MAX }
    );
}
