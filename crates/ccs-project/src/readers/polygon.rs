//! Boundary polygons from vertex tables.

use std::path::Path;

use ccs_boundary::{Boundary, Polygon};
use nalgebra::Point2;

use super::csv;
use crate::{ProjectError, ProjectResult, read_to_string};

/// Header names recognised for the ring id column.
const ID_COLUMNS: [&str; 3] = ["polygon_id", "poly_id", "id"];

/// Read a boundary from a CSV whose first two columns are `x` and `y`.
///
/// Rows sharing a ring id form one closed ring, in file order. The id column
/// is located by its header name, so `x,y,polygon_id` and
/// `x,y,z,polygon_id` both work; without one the whole file is one ring.
/// Other columns (`z`) are ignored.
pub fn read_polygon(path: &Path, name: &str, tolerance: f64) -> ProjectResult<Boundary> {
    let content = read_to_string(path)?;
    let id_column = csv::header(&content).iter().position(|column| {
        ID_COLUMNS.iter().any(|id| column.eq_ignore_ascii_case(id))
    });

    let mut rings: Vec<(Option<String>, Vec<Point2<f64>>)> = Vec::new();
    for row in csv::rows(&content) {
        let x: f64 = row.parse(path, 0, "x")?;
        let y: f64 = row.parse(path, 1, "y")?;
        let id = id_column
            .and_then(|column| row.fields.get(column))
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());
        match rings.iter_mut().find(|(ring_id, _)| *ring_id == id) {
            Some((_, vertices)) => vertices.push(Point2::new(x, y)),
            None => rings.push((id, vec![Point2::new(x, y)])),
        }
    }

    let polygon_err = |source| ProjectError::Polygon {
        path: path.to_path_buf(),
        source,
    };
    let polygons = rings
        .into_iter()
        .map(|(id, vertices)| Polygon::from_closed_ring(id, vertices, tolerance))
        .collect::<Result<Vec<_>, _>>()
        .map_err(polygon_err)?;
    Boundary::new(name, polygons).map_err(polygon_err)
}
