//! Classification of catalog cells against containment/hazardous boundaries.

use ccs_boundary::{
    Boundary, BoundaryClassifier, ContainmentCategory, DEFAULT_AUTO_CLOSE_TOLERANCE, Polygon,
};
use ccs_grid::{CatalogBuilder, CellCatalog, CellInput};
use nalgebra::Point2;
use proptest::prelude::*;

fn rect(name: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Boundary {
    let ring = vec![
        Point2::new(x0, y0),
        Point2::new(x1, y0),
        Point2::new(x1, y1),
        Point2::new(x0, y1),
        Point2::new(x0, y0),
    ];
    let poly = Polygon::from_closed_ring(Some(name.into()), ring, DEFAULT_AUTO_CLOSE_TOLERANCE)
        .unwrap();
    Boundary::new(name, vec![poly]).unwrap()
}

/// `n x n` cells of size 1 centred at (i + 0.5, j + 0.5).
fn square_grid(n: u32) -> CellCatalog {
    let mut builder = CatalogBuilder::new();
    for j in 0..n {
        for i in 0..n {
            builder.add_cell(CellInput::new(
                j * n + i,
                1,
                (i as f64 + 0.5, j as f64 + 0.5),
                1.0,
                0.3,
            ));
        }
    }
    builder.build().unwrap()
}

#[test]
fn left_half_is_contained() {
    let catalog = square_grid(2);
    let classifier = BoundaryClassifier::new(Some(rect("containment", 0.0, 0.0, 1.0, 2.0)), None);
    let classification = classifier.classify(&catalog);

    assert_eq!(
        classification.categories(),
        &[
            ContainmentCategory::Contained,
            ContainmentCategory::Outside,
            ContainmentCategory::Contained,
            ContainmentCategory::Outside,
        ]
    );
    assert_eq!(
        classification.reported_categories(),
        vec![ContainmentCategory::Contained, ContainmentCategory::Outside]
    );
}

#[test]
fn hazardous_only_applies_outside_containment() {
    let catalog = square_grid(4);
    // Hazardous rectangle overlaps the containment rectangle in column 1.
    let classifier = BoundaryClassifier::new(
        Some(rect("containment", 0.0, 0.0, 2.0, 4.0)),
        Some(rect("hazardous", 1.0, 0.0, 3.0, 4.0)),
    );
    let classification = classifier.classify(&catalog);
    let counts = classification.counts();

    assert_eq!(counts.contained, 8);
    assert_eq!(counts.hazardous, 4);
    assert_eq!(counts.outside, 4);
    assert_eq!(classification.reported_categories().len(), 3);
}

#[test]
fn centroid_on_edge_is_contained() {
    let catalog = square_grid(2);
    // Right edge of the polygon runs through the centroids at x = 0.5.
    let classifier = BoundaryClassifier::new(Some(rect("containment", -1.0, -1.0, 0.5, 3.0)), None);
    let counts = classifier.classify(&catalog).counts();
    assert_eq!(counts.contained, 2);
    assert_eq!(counts.outside, 2);
}

#[test]
fn missing_containment_with_hazardous_is_all_contained() {
    let catalog = square_grid(3);
    let classifier = BoundaryClassifier::new(None, Some(rect("hazardous", 0.0, 0.0, 3.0, 3.0)));
    let counts = classifier.classify(&catalog).counts();
    assert_eq!(counts.contained, 9);
    assert_eq!(counts.hazardous, 0);
}

proptest! {
    #[test]
    fn categories_partition_active_cells(
        n in 1u32..8,
        c in (0.0f64..8.0, 0.0f64..8.0, 0.1f64..8.0, 0.1f64..8.0),
        h in (0.0f64..8.0, 0.0f64..8.0, 0.1f64..8.0, 0.1f64..8.0),
        use_containment in any::<bool>(),
        use_hazardous in any::<bool>(),
    ) {
        let catalog = square_grid(n);
        let containment = use_containment.then(|| rect("c", c.0, c.1, c.0 + c.2, c.1 + c.3));
        let hazardous = use_hazardous.then(|| rect("h", h.0, h.1, h.0 + h.2, h.1 + h.3));
        let classification = BoundaryClassifier::new(containment, hazardous).classify(&catalog);

        prop_assert_eq!(classification.len(), catalog.len());
        prop_assert_eq!(classification.counts().total(), catalog.len());
        if !use_containment {
            prop_assert_eq!(classification.counts().contained, catalog.len());
        }
        if !use_hazardous {
            prop_assert_eq!(classification.counts().hazardous, 0);
        }
    }
}
