//! Error types for feasibility testing and projection.

use thiserror::Error;

/// Result type for hull operations.
pub type HullResult<T> = Result<T, HullError>;

/// Errors that can occur constructing a hull or projecting onto it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HullError {
    /// The half-space matrix does not have one column per ratio plus an
    /// offset column.
    #[error("half-space matrix must have {expected} columns, got {actual}")]
    DimensionMismatch {
        /// Required column count.
        expected: usize,
        /// Column count found.
        actual: usize,
    },

    /// The active-facet system became singular; the working set is not
    /// linearly independent, which a well-formed hull never produces.
    #[error("active-facet system is singular ({active} facets in working set)")]
    Degenerate {
        /// Size of the working set when factorization failed.
        active: usize,
    },

    /// The active-set iteration did not terminate.
    #[error("projection did not converge after {iterations} iterations")]
    NoConvergence {
        /// Iterations performed before giving up.
        iterations: usize,
    },

    /// The solver returned a point that still violates the hull beyond
    /// numerical noise.
    #[error("projected point remains outside the hull (violation {violation:.3e})")]
    ResidualViolation {
        /// Largest facet violation at the returned point.
        violation: f64,
    },
}
