//! Error types for garment binding and deformation.

use thiserror::Error;

/// Result type for cloth operations.
pub type ClothResult<T> = Result<T, ClothError>;

/// Errors that can occur assembling cloth data or deforming a garment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClothError {
    /// The binding operator's column count disagrees with the reference
    /// body vertex count. Fatal at load time.
    #[error("binding has {binding_cols} columns, reference body has {body_vertices} vertices")]
    BodyBindingMismatch {
        /// Binding operator columns.
        binding_cols: usize,
        /// Reference body vertex count.
        body_vertices: usize,
    },

    /// The binding operator's row count disagrees with the garment
    /// vertex count. Fatal at load time.
    #[error("binding has {binding_rows} rows, garment has {garment_vertices} vertices")]
    GarmentBindingMismatch {
        /// Binding operator rows.
        binding_rows: usize,
        /// Garment vertex count.
        garment_vertices: usize,
    },

    /// A binding triplet references a position outside the operator's
    /// declared shape. Fatal at load time.
    #[error("binding triplet ({row}, {col}) out of range for a {rows} x {cols} operator")]
    TripletOutOfRange {
        /// Row (garment vertex) index of the triplet.
        row: usize,
        /// Column (body vertex) index of the triplet.
        col: usize,
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        cols: usize,
    },

    /// A garment face references a vertex outside the garment mesh.
    #[error("garment face index {index} out of range for {vertex_count} vertices")]
    FaceIndexOutOfRange {
        /// The offending index.
        index: u32,
        /// Garment vertex count.
        vertex_count: usize,
    },

    /// A deformation was requested with a body that does not match the
    /// reference vertex count.
    #[error("deform called with {actual} body vertices, reference has {expected}")]
    BodyVertexCountMismatch {
        /// Reference body vertex count.
        expected: usize,
        /// Vertex count supplied.
        actual: usize,
    },

    /// A deformation was requested with a non-positive height.
    #[error("garment deformation requires positive height, got {height} cm")]
    InvalidHeight {
        /// The offending height value.
        height: f64,
    },
}
