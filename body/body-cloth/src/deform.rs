//! Cloth model data and garment deformation.

use crate::{BindingOperator, ClothError, ClothResult};
use body_types::{BodyMesh, Point3, Vector3};
use std::time::Instant;
use tracing::debug;

/// Height scale of the reference meshes: both rest poses are stored at a
/// stature of 100 length units, matching the shape model's mean shape.
const UNIT_HEIGHT: f64 = 100.0;

/// Immutable per-gender cloth bundle.
///
/// Holds the draped garment and the body it was draped on, both at unit
/// height, plus the sparse binding between them. Loaded once, read-only,
/// shareable across sessions.
#[derive(Debug, Clone)]
pub struct ClothModelData {
    /// Garment vertices at unit height.
    garment_rest: Vec<Point3<f64>>,
    /// Garment triangulation.
    garment_faces: Vec<[u32; 3]>,
    /// Body vertices at unit height (the drape reference pose).
    body_rest: Vec<Point3<f64>>,
    /// Body-displacement to garment-displacement operator.
    binding: BindingOperator,
}

impl ClothModelData {
    /// Assembles and validates a cloth bundle.
    ///
    /// # Errors
    ///
    /// Returns a [`ClothError`] when the binding operator's dimensions
    /// disagree with either mesh, or a garment face is out of range.
    /// These are fatal at load time.
    pub fn new(
        garment_rest: Vec<Point3<f64>>,
        garment_faces: Vec<[u32; 3]>,
        body_rest: Vec<Point3<f64>>,
        binding: BindingOperator,
    ) -> ClothResult<Self> {
        if binding.ncols() != body_rest.len() {
            return Err(ClothError::BodyBindingMismatch {
                binding_cols: binding.ncols(),
                body_vertices: body_rest.len(),
            });
        }
        if binding.nrows() != garment_rest.len() {
            return Err(ClothError::GarmentBindingMismatch {
                binding_rows: binding.nrows(),
                garment_vertices: garment_rest.len(),
            });
        }
        let vertex_count = garment_rest.len();
        for face in &garment_faces {
            for &index in face {
                if (index as usize) >= vertex_count {
                    return Err(ClothError::FaceIndexOutOfRange {
                        index,
                        vertex_count,
                    });
                }
            }
        }
        Ok(Self {
            garment_rest,
            garment_faces,
            body_rest,
            binding,
        })
    }

    /// Garment vertex count.
    #[inline]
    #[must_use]
    pub fn garment_vertex_count(&self) -> usize {
        self.garment_rest.len()
    }

    /// Reference body vertex count; must match the paired shape model.
    #[inline]
    #[must_use]
    pub fn body_vertex_count(&self) -> usize {
        self.body_rest.len()
    }

    /// The binding operator.
    #[inline]
    #[must_use]
    pub const fn binding(&self) -> &BindingOperator {
        &self.binding
    }

    /// Deforms the garment onto a reconstructed body.
    ///
    /// `body_vertices` are the grounded positions produced by the shape
    /// model; `ground_offset` is the grounding translation that was
    /// subtracted from them, so the displacement field is computed in
    /// the un-grounded frame the binding was trained in, and the result
    /// is re-grounded by the same offset to stay co-registered with the
    /// body.
    ///
    /// If the body equals the reference pose at this height exactly, the
    /// displacement field is zero and the garment comes back at its rest
    /// shape (scaled and grounded).
    ///
    /// # Errors
    ///
    /// Returns [`ClothError::BodyVertexCountMismatch`] when the body
    /// does not match the reference vertex count, or
    /// [`ClothError::InvalidHeight`] for a non-positive height.
    pub fn deform(
        &self,
        body_vertices: &[Point3<f64>],
        height_cm: f64,
        ground_offset: f64,
    ) -> ClothResult<BodyMesh> {
        if body_vertices.len() != self.body_rest.len() {
            return Err(ClothError::BodyVertexCountMismatch {
                expected: self.body_rest.len(),
                actual: body_vertices.len(),
            });
        }
        if height_cm <= 0.0 {
            return Err(ClothError::InvalidHeight { height: height_cm });
        }
        let started = Instant::now();
        let h = height_cm / UNIT_HEIGHT;

        let body_disp: Vec<Vector3<f64>> = body_vertices
            .iter()
            .zip(self.body_rest.iter())
            .map(|(current, rest)| {
                // Undo the grounding before differencing against the
                // reference pose.
                let ungrounded = Vector3::new(current.x, current.y + ground_offset, current.z);
                ungrounded - rest.coords * h
            })
            .collect();

        let cloth_disp = self.binding.apply(&body_disp);

        let vertices: Vec<Point3<f64>> = self
            .garment_rest
            .iter()
            .zip(cloth_disp.iter())
            .map(|(rest, disp)| {
                Point3::new(
                    rest.x * h + disp.x,
                    rest.y * h + disp.y - ground_offset,
                    rest.z * h + disp.z,
                )
            })
            .collect();

        debug!(
            garment_vertices = vertices.len(),
            nnz = self.binding.nnz(),
            elapsed = ?started.elapsed(),
            "garment deformed"
        );

        Ok(BodyMesh::new(vertices, self.garment_faces.clone()))
    }
}
