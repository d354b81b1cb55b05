//! Error types for shape model construction and reconstruction.

use thiserror::Error;

/// Result type for shape model operations.
pub type ShapeResult<T> = Result<T, ShapeError>;

/// Errors that can occur loading model data or reconstructing a body.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShapeError {
    /// The requested reconstruction has a non-positive body height.
    ///
    /// The input is rejected before any computation; callers keep their
    /// previously reconstructed mesh.
    #[error("body height must be positive, got {height} cm")]
    InvalidHeight {
        /// The offending height value.
        height: f64,
    },

    /// Two model matrices disagree on a shared dimension.
    ///
    /// Fatal at load time; no reconstruction is possible with an
    /// inconsistent bundle.
    #[error("model data mismatch: {coupling} expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which dimension coupling failed.
        coupling: &'static str,
        /// Required size.
        expected: usize,
        /// Size found.
        actual: usize,
    },

    /// A face references a vertex index outside the model's vertex set.
    #[error("face index {index} out of range for {vertex_count} vertices")]
    FaceIndexOutOfRange {
        /// The offending index.
        index: u32,
        /// Number of vertices in the model.
        vertex_count: usize,
    },

    /// A measurement curve references a vertex index outside the model.
    #[error("curve {curve} references vertex {index}, model has {vertex_count}")]
    CurveIndexOutOfRange {
        /// Curve ordinal.
        curve: usize,
        /// The offending index.
        index: u32,
        /// Number of vertices in the model.
        vertex_count: usize,
    },

    /// A measurement curve's edge list and ratio list disagree in length.
    #[error("curve {curve} has {nodes} edge pairs but {ratios} ratios")]
    CurveLengthMismatch {
        /// Curve ordinal.
        curve: usize,
        /// Edge pair count.
        nodes: usize,
        /// Ratio count.
        ratios: usize,
    },
}
