//! Shape model data and reconstruction.

use crate::{ShapeError, ShapeResult};
use body_hull::{ConvexHull, RATIO_DIM};
use body_types::{BodyMesh, Measurements, Point3};
use nalgebra::{DMatrix, DVector};
use std::time::Instant;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Height scale encoded in the mean shape: the learned geometry is
/// stored at a stature of 100 length units.
const UNIT_HEIGHT: f64 = 100.0;

/// Immutable per-gender shape model bundle.
///
/// Loaded once at startup and shared read-only by any number of
/// sessions. All dimension couplings between the matrices are validated
/// at construction; a bundle that constructs successfully can never fail
/// a reconstruction except on invalid height input.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapeModelData {
    /// Ratio-to-latent regression, `k x 7`.
    regression: DMatrix<f64>,
    /// Latent offset, length `k`.
    offset: DVector<f64>,
    /// Latent-to-geometry basis, `3V x k`.
    basis: DMatrix<f64>,
    /// Mean shape at unit height, length `3V`.
    mean_shape: DVector<f64>,
    /// Fixed triangulation.
    faces: Vec<[u32; 3]>,
    /// Feasible region over normalized ratios.
    hull: ConvexHull,
}

/// A reconstructed, grounded body mesh.
///
/// `ground_offset` is the vertical translation that was subtracted to
/// rest the mesh on the Y=0 plane; the garment deformer needs the same
/// offset to stay co-registered with the body.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructedBody {
    /// The grounded mesh.
    pub mesh: BodyMesh,
    /// Minimum Y of the scaled, un-grounded vertex set.
    pub ground_offset: f64,
}

impl ShapeModelData {
    /// Assembles and validates a shape model bundle.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::DimensionMismatch`] or
    /// [`ShapeError::FaceIndexOutOfRange`] when the matrices disagree on
    /// a shared dimension. These are fatal at load time.
    pub fn new(
        regression: DMatrix<f64>,
        offset: DVector<f64>,
        basis: DMatrix<f64>,
        mean_shape: DVector<f64>,
        faces: Vec<[u32; 3]>,
        hull: ConvexHull,
    ) -> ShapeResult<Self> {
        let k = regression.nrows();

        if regression.ncols() != RATIO_DIM {
            return Err(ShapeError::DimensionMismatch {
                coupling: "regression columns vs ratio dimension",
                expected: RATIO_DIM,
                actual: regression.ncols(),
            });
        }
        if offset.len() != k {
            return Err(ShapeError::DimensionMismatch {
                coupling: "latent offset length vs regression rows",
                expected: k,
                actual: offset.len(),
            });
        }
        if basis.ncols() != k {
            return Err(ShapeError::DimensionMismatch {
                coupling: "basis columns vs latent dimension",
                expected: k,
                actual: basis.ncols(),
            });
        }
        if basis.nrows() % 3 != 0 {
            return Err(ShapeError::DimensionMismatch {
                coupling: "basis rows divisible by 3",
                expected: (basis.nrows() / 3) * 3,
                actual: basis.nrows(),
            });
        }
        if mean_shape.len() != basis.nrows() {
            return Err(ShapeError::DimensionMismatch {
                coupling: "mean shape length vs basis rows",
                expected: basis.nrows(),
                actual: mean_shape.len(),
            });
        }

        let vertex_count = basis.nrows() / 3;
        for face in &faces {
            for &index in face {
                if (index as usize) >= vertex_count {
                    return Err(ShapeError::FaceIndexOutOfRange {
                        index,
                        vertex_count,
                    });
                }
            }
        }

        Ok(Self {
            regression,
            offset,
            basis,
            mean_shape,
            faces,
            hull,
        })
    }

    /// Number of vertices the model reconstructs.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.basis.nrows() / 3
    }

    /// Latent coefficient dimension.
    #[inline]
    #[must_use]
    pub fn latent_dim(&self) -> usize {
        self.regression.nrows()
    }

    /// The fixed triangulation.
    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// The feasible region over normalized ratios.
    #[inline]
    #[must_use]
    pub const fn hull(&self) -> &ConvexHull {
        &self.hull
    }

    /// Advisory feasibility test for a measurement vector.
    ///
    /// Reconstruction proceeds regardless of the result; an infeasible
    /// input merely extrapolates outside the training region and the UI
    /// may offer to correct it.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidHeight`] when height is not positive
    /// (ratios would be undefined).
    pub fn is_feasible(&self, measurements: &Measurements) -> ShapeResult<bool> {
        if !measurements.has_valid_height() {
            return Err(ShapeError::InvalidHeight {
                height: measurements.height(),
            });
        }
        Ok(self
            .hull
            .contains(&measurements.ratios(), ConvexHull::DEFAULT_TOLERANCE))
    }

    /// Reconstructs the grounded body mesh for a measurement vector.
    ///
    /// Pipeline: normalize measurements by height, regress into latent
    /// coefficients, expand through the basis, scale to true stature,
    /// then translate so the lowest vertex rests on Y = 0.
    ///
    /// Pure and deterministic: identical inputs yield identical vertex
    /// buffers. The result always has exactly
    /// [`ShapeModelData::vertex_count`] vertices.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidHeight`] when height is not
    /// positive; no partial result is produced and callers retain their
    /// prior mesh.
    pub fn reconstruct(&self, measurements: &Measurements) -> ShapeResult<ReconstructedBody> {
        if !measurements.has_valid_height() {
            return Err(ShapeError::InvalidHeight {
                height: measurements.height(),
            });
        }
        let started = Instant::now();

        let ratio = DVector::from_row_slice(&measurements.ratios());
        let latent = &self.regression * ratio + &self.offset;
        let flat = &self.basis * latent + &self.mean_shape;

        let scale = measurements.height() / UNIT_HEIGHT;
        let vertex_count = self.vertex_count();
        let mut vertices = Vec::with_capacity(vertex_count);
        let mut min_y = f64::INFINITY;
        for i in 0..vertex_count {
            let y = flat[3 * i + 1] * scale;
            min_y = min_y.min(y);
            vertices.push(Point3::new(flat[3 * i] * scale, y, flat[3 * i + 2] * scale));
        }
        for v in &mut vertices {
            v.y -= min_y;
        }

        debug!(
            vertices = vertex_count,
            latent = self.latent_dim(),
            elapsed = ?started.elapsed(),
            "body reconstructed"
        );

        Ok(ReconstructedBody {
            mesh: BodyMesh::new(vertices, self.faces.clone()),
            ground_offset: min_y,
        })
    }
}
