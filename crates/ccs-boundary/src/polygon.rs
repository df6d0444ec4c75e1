//! Polygon rings and point-in-polygon geometry.
//!
//! Pure geometry over ordered vertex sequences; nothing here knows about
//! file formats.

use nalgebra::Point2;

use crate::error::{BoundaryError, BoundaryResult};

/// Largest gap between the first and last vertex of a ring that is still
/// treated as closed. Larger gaps are rejected, never silently bridged.
pub const DEFAULT_AUTO_CLOSE_TOLERANCE: f64 = 1e-6;

/// Relative distance under which a point counts as lying on an edge.
const EDGE_REL_TOLERANCE: f64 = 1e-12;

/// A single validated ring.
///
/// Stored open: the closing vertex of the input is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    id: Option<String>,
    vertices: Vec<Point2<f64>>,
    min: Point2<f64>,
    max: Point2<f64>,
    edge_tolerance: f64,
}

impl Polygon {
    /// Validate a closed ring (first vertex repeated at the end).
    ///
    /// Rejects rings with fewer than 3 distinct vertices, non-finite
    /// coordinates, a first/last gap above `tolerance`, or zero area.
    pub fn from_closed_ring(
        id: Option<String>,
        mut ring: Vec<Point2<f64>>,
        tolerance: f64,
    ) -> BoundaryResult<Self> {
        let name = id.clone().unwrap_or_else(|| "<unnamed>".to_string());

        if let Some(vertex) = ring
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(BoundaryError::NonFiniteVertex { ring: name, vertex });
        }
        if ring.len() < 3 {
            return Err(BoundaryError::TooFewVertices {
                ring: name,
                count: ring.len(),
            });
        }

        let first = ring[0];
        let last = ring[ring.len() - 1];
        let gap = nalgebra::distance(&first, &last);
        if gap > tolerance {
            return Err(BoundaryError::NotClosed {
                ring: name,
                gap,
                tolerance,
            });
        }
        ring.pop();

        if ring.len() < 3 {
            return Err(BoundaryError::TooFewVertices {
                ring: name,
                count: ring.len(),
            });
        }

        let mut min = ring[0];
        let mut max = ring[0];
        for p in &ring {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        let diagonal = nalgebra::distance(&min, &max);

        let polygon = Self {
            id,
            vertices: ring,
            min,
            max,
            edge_tolerance: EDGE_REL_TOLERANCE * diagonal.max(1.0),
        };
        if polygon.signed_area().abs() <= polygon.edge_tolerance * diagonal {
            return Err(BoundaryError::Degenerate { ring: name });
        }
        Ok(polygon)
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Vertices of the open ring.
    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    /// Shoelace area; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        self.edges()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum::<f64>()
            * 0.5
    }

    /// Whether `p` lies inside the ring or on its boundary.
    pub fn contains(&self, p: &Point2<f64>) -> bool {
        let tol = self.edge_tolerance;
        if p.x < self.min.x - tol
            || p.x > self.max.x + tol
            || p.y < self.min.y - tol
            || p.y > self.max.y + tol
        {
            return false;
        }
        if self.edges().any(|(a, b)| segment_distance(p, a, b) <= tol) {
            return true;
        }
        winding_number(p, self.edges()) != 0
    }

    fn edges(&self) -> impl Iterator<Item = (&Point2<f64>, &Point2<f64>)> {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }
}

fn winding_number<'a>(
    p: &Point2<f64>,
    edges: impl Iterator<Item = (&'a Point2<f64>, &'a Point2<f64>)>,
) -> i32 {
    let mut winding = 0i32;
    for (a, b) in edges {
        let cross = (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y);
        if a.y <= p.y {
            if b.y > p.y && cross > 0.0 {
                winding += 1;
            }
        } else if b.y <= p.y && cross < 0.0 {
            winding -= 1;
        }
    }
    winding
}

fn segment_distance(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let ab = b - a;
    let ap = p - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return ap.norm();
    }
    let t = (ap.dot(&ab) / len2).clamp(0.0, 1.0);
    (ap - ab * t).norm()
}

/// One or more rings acting as a single boundary (a multi-polygon).
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    name: String,
    polygons: Vec<Polygon>,
}

impl Boundary {
    pub fn new(name: impl Into<String>, polygons: Vec<Polygon>) -> BoundaryResult<Self> {
        let name = name.into();
        if polygons.is_empty() {
            return Err(BoundaryError::Empty { name });
        }
        Ok(Self { name, polygons })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Inside (or on the edge of) any ring.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let p = Point2::new(x, y);
        self.polygons.iter().any(|poly| poly.contains(&p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f64, f64)]) -> Vec<Point2<f64>> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn unit_square() -> Polygon {
        Polygon::from_closed_ring(
            Some("square".into()),
            ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
            DEFAULT_AUTO_CLOSE_TOLERANCE,
        )
        .unwrap()
    }

    #[test]
    fn triangle_contains() {
        let tri = Polygon::from_closed_ring(
            None,
            ring(&[(0.0, 0.0), (2.0, 0.0), (1.0, 2.0), (0.0, 0.0)]),
            DEFAULT_AUTO_CLOSE_TOLERANCE,
        )
        .unwrap();
        assert!(tri.contains(&Point2::new(1.0, 0.5)));
        assert!(!tri.contains(&Point2::new(3.0, 0.0)));
        assert!(!tri.contains(&Point2::new(0.1, 1.5)));
    }

    #[test]
    fn boundary_points_are_inside() {
        let sq = unit_square();
        assert!(sq.contains(&Point2::new(0.0, 0.5)));
        assert!(sq.contains(&Point2::new(1.0, 1.0)));
        assert!(sq.contains(&Point2::new(0.5, 0.0)));
        assert!(!sq.contains(&Point2::new(1.0 + 1e-6, 0.5)));
    }

    #[test]
    fn closing_vertex_is_dropped() {
        let sq = unit_square();
        assert_eq!(sq.vertices().len(), 4);
        assert!((sq.signed_area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn clockwise_ring_works() {
        let cw = Polygon::from_closed_ring(
            None,
            ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]),
            DEFAULT_AUTO_CLOSE_TOLERANCE,
        )
        .unwrap();
        assert!(cw.signed_area() < 0.0);
        assert!(cw.contains(&Point2::new(0.5, 0.5)));
        assert!(!cw.contains(&Point2::new(1.5, 0.5)));
    }

    #[test]
    fn concave_ring() {
        // U shape opening upwards
        let u = Polygon::from_closed_ring(
            None,
            ring(&[
                (0.0, 0.0),
                (3.0, 0.0),
                (3.0, 3.0),
                (2.0, 3.0),
                (2.0, 1.0),
                (1.0, 1.0),
                (1.0, 3.0),
                (0.0, 3.0),
                (0.0, 0.0),
            ]),
            DEFAULT_AUTO_CLOSE_TOLERANCE,
        )
        .unwrap();
        assert!(u.contains(&Point2::new(0.5, 2.0)));
        assert!(!u.contains(&Point2::new(1.5, 2.0)));
        assert!(u.contains(&Point2::new(1.5, 0.5)));
    }

    #[test]
    fn small_gap_is_auto_closed() {
        let poly = Polygon::from_closed_ring(
            None,
            ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1e-8)]),
            DEFAULT_AUTO_CLOSE_TOLERANCE,
        )
        .unwrap();
        assert_eq!(poly.vertices().len(), 3);
    }

    #[test]
    fn open_ring_is_rejected() {
        let err = Polygon::from_closed_ring(
            Some("open".into()),
            ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
            DEFAULT_AUTO_CLOSE_TOLERANCE,
        )
        .unwrap_err();
        assert!(matches!(err, BoundaryError::NotClosed { .. }));
    }

    #[test]
    fn too_few_vertices_is_rejected() {
        let err = Polygon::from_closed_ring(
            None,
            ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]),
            DEFAULT_AUTO_CLOSE_TOLERANCE,
        )
        .unwrap_err();
        assert!(matches!(err, BoundaryError::TooFewVertices { count: 2, .. }));

        let err = Polygon::from_closed_ring(None, ring(&[(0.0, 0.0)]), 1.0).unwrap_err();
        assert!(matches!(err, BoundaryError::TooFewVertices { count: 1, .. }));
    }

    #[test]
    fn collinear_ring_is_degenerate() {
        let err = Polygon::from_closed_ring(
            None,
            ring(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 0.0)]),
            DEFAULT_AUTO_CLOSE_TOLERANCE,
        )
        .unwrap_err();
        assert!(matches!(err, BoundaryError::Degenerate { .. }));
    }

    #[test]
    fn nan_vertex_is_rejected() {
        let err = Polygon::from_closed_ring(
            None,
            ring(&[(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0), (0.0, 0.0)]),
            DEFAULT_AUTO_CLOSE_TOLERANCE,
        )
        .unwrap_err();
        assert_eq!(
            err,
            BoundaryError::NonFiniteVertex {
                ring: "<unnamed>".into(),
                vertex: 1
            }
        );
    }

    #[test]
    fn multi_ring_boundary() {
        let far = Polygon::from_closed_ring(
            None,
            ring(&[(10.0, 10.0), (11.0, 10.0), (11.0, 11.0), (10.0, 10.0)]),
            DEFAULT_AUTO_CLOSE_TOLERANCE,
        )
        .unwrap();
        let boundary = Boundary::new("containment", vec![unit_square(), far]).unwrap();
        assert!(boundary.contains(0.5, 0.5));
        assert!(boundary.contains(10.9, 10.5));
        assert!(!boundary.contains(5.0, 5.0));
        assert!(Boundary::new("empty", vec![]).is_err());
    }
}
