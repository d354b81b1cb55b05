//! Error types for model bundles and sessions.

use body_cloth::ClothError;
use body_hull::HullError;
use body_shape::ShapeError;
use body_types::Gender;
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by bundle assembly and session operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// A shape model error, most commonly an invalid height on input.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// A feasibility projection error. `fix()` handles these internally
    /// by reverting to defaults; the variant exists for callers driving
    /// the hull directly through a bundle.
    #[error(transparent)]
    Hull(#[from] HullError),

    /// A garment deformation error.
    #[error(transparent)]
    Cloth(#[from] ClothError),

    /// The garment was asked for on a bundle that carries no cloth data.
    #[error("no garment data loaded for {gender}")]
    GarmentUnavailable {
        /// Gender of the bundle that lacks cloth data.
        gender: Gender,
    },

    /// Shape and cloth data in a bundle disagree on the body vertex
    /// count. Fatal at load time, before any session exists.
    #[error(
        "shape model has {shape_vertices} vertices, cloth reference body has {cloth_vertices}"
    )]
    ModelDataMismatch {
        /// Vertex count of the shape model.
        shape_vertices: usize,
        /// Vertex count of the cloth reference body.
        cloth_vertices: usize,
    },
}
