//! Half-space representation of the feasible region.

use crate::{HullError, HullResult};
use nalgebra::DMatrix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dimension of the normalized ratio space (non-height measurements).
pub const RATIO_DIM: usize = 7;

/// The learned feasible region over normalized measurement ratios.
///
/// Stored as an `m x 8` matrix `H` of half-space rows: a ratio vector
/// `x` is inside the hull iff every component of `H · [x, 1]` is at most
/// the membership tolerance. The facets are computed offline from the
/// convex hull of the training ratios; the core treats them as opaque
/// immutable data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConvexHull {
    halfspaces: DMatrix<f64>,
}

impl ConvexHull {
    /// Membership tolerance used for the advisory inside/outside flag.
    pub const DEFAULT_TOLERANCE: f64 = 2e-3;

    /// Looser tolerance applied when re-checking a projected point;
    /// residual violations below this are numerical noise, not failure.
    pub const POST_PROJECT_TOLERANCE: f64 = 4e-3;

    /// Creates a hull from a half-space matrix.
    ///
    /// # Errors
    ///
    /// Returns [`HullError::DimensionMismatch`] unless the matrix has
    /// exactly `RATIO_DIM + 1` columns.
    pub fn new(halfspaces: DMatrix<f64>) -> HullResult<Self> {
        if halfspaces.ncols() != RATIO_DIM + 1 {
            return Err(HullError::DimensionMismatch {
                expected: RATIO_DIM + 1,
                actual: halfspaces.ncols(),
            });
        }
        Ok(Self { halfspaces })
    }

    /// Creates a hull from facet rows.
    ///
    /// # Errors
    ///
    /// Returns [`HullError::DimensionMismatch`] if `rows` is empty
    /// (a hull needs at least one facet).
    pub fn from_rows(rows: Vec<[f64; RATIO_DIM + 1]>) -> HullResult<Self> {
        if rows.is_empty() {
            return Err(HullError::DimensionMismatch {
                expected: RATIO_DIM + 1,
                actual: 0,
            });
        }
        let m = rows.len();
        let halfspaces =
            DMatrix::from_fn(m, RATIO_DIM + 1, |i, j| rows[i][j]);
        Self::new(halfspaces)
    }

    /// Number of facets.
    #[inline]
    #[must_use]
    pub fn facet_count(&self) -> usize {
        self.halfspaces.nrows()
    }

    /// The raw half-space matrix.
    #[inline]
    #[must_use]
    pub const fn halfspaces(&self) -> &DMatrix<f64> {
        &self.halfspaces
    }

    /// Signed violation of facet `i` at `ratio`: positive means outside.
    #[must_use]
    pub fn facet_violation(&self, i: usize, ratio: &[f64; RATIO_DIM]) -> f64 {
        let row = self.halfspaces.row(i);
        let mut v = row[RATIO_DIM];
        for (j, r) in ratio.iter().enumerate() {
            v += row[j] * r;
        }
        v
    }

    /// Largest facet violation at `ratio`.
    #[must_use]
    pub fn max_violation(&self, ratio: &[f64; RATIO_DIM]) -> f64 {
        (0..self.facet_count())
            .map(|i| self.facet_violation(i, ratio))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Tests whether `ratio` lies inside the hull.
    ///
    /// Forms the homogeneous point `[ratio, 1]` and checks `H · p8`
    /// against `tolerance` componentwise. Pure predicate.
    #[must_use]
    pub fn contains(&self, ratio: &[f64; RATIO_DIM], tolerance: f64) -> bool {
        (0..self.facet_count()).all(|i| self.facet_violation(i, ratio) <= tolerance)
    }
}

/// Axis-aligned box `lo[i] <= x[i] <= hi[i]` as hull facets.
///
/// Test fixture shared across this crate's test modules.
#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) fn box_hull(lo: [f64; RATIO_DIM], hi: [f64; RATIO_DIM]) -> ConvexHull {
    let mut rows = Vec::with_capacity(2 * RATIO_DIM);
    for i in 0..RATIO_DIM {
        // x_i <= hi_i  =>  x_i - hi_i <= 0
        let mut upper = [0.0; RATIO_DIM + 1];
        upper[i] = 1.0;
        upper[RATIO_DIM] = -hi[i];
        rows.push(upper);
        // x_i >= lo_i  =>  -x_i + lo_i <= 0
        let mut lower = [0.0; RATIO_DIM + 1];
        lower[i] = -1.0;
        lower[RATIO_DIM] = lo[i];
        rows.push(lower);
    }
    ConvexHull::from_rows(rows).unwrap()
}
