use thiserror::Error;

pub type BoundaryResult<T> = Result<T, BoundaryError>;

/// Malformed boundary input. Always fatal for the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundaryError {
    #[error("Polygon '{ring}' has {count} vertices (at least 3 distinct vertices required)")]
    TooFewVertices { ring: String, count: usize },

    #[error(
        "Polygon '{ring}' is not closed: first and last vertex are {gap} apart (tolerance {tolerance})"
    )]
    NotClosed {
        ring: String,
        gap: f64,
        tolerance: f64,
    },

    #[error("Polygon '{ring}' has a non-finite coordinate at vertex {vertex}")]
    NonFiniteVertex { ring: String, vertex: usize },

    #[error("Polygon '{ring}' encloses no area")]
    Degenerate { ring: String },

    #[error("Boundary '{name}' contains no polygons")]
    Empty { name: String },
}
