//! Triangle mesh value type.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle mesh with positions and a fixed triangulation.
///
/// The body and garment meshes produced by the pipeline are plain values:
/// reconstruction returns a fresh `BodyMesh` and the session decides when
/// to store or replace it. The triangulation is static for a given model
/// bundle; only vertex positions change between reconstructions.
///
/// # Example
///
/// ```
/// use body_types::{BodyMesh, Point3};
///
/// let mesh = BodyMesh::new(
///     vec![
///         Point3::new(0.0, 0.5, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 1.0),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert!((mesh.min_y().unwrap() - 0.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Triangle faces as indices into the vertex array, CCW winding.
    pub faces: Vec<[u32; 3]>,
}

impl BodyMesh {
    /// Creates a mesh from positions and faces.
    #[inline]
    #[must_use]
    pub const fn new(vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangle faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether the mesh has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Lowest Y coordinate across all vertices, or `None` when empty.
    #[must_use]
    pub fn min_y(&self) -> Option<f64> {
        self.vertices.iter().map(|v| v.y).reduce(f64::min)
    }

    /// Interleaved `[x0, y0, z0, x1, ...]` position buffer for renderer
    /// collaborators.
    #[must_use]
    pub fn to_flat_buffer(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(self.vertices.len() * 3);
        for v in &self.vertices {
            flat.push(v.x);
            flat.push(v.y);
            flat.push(v.z);
        }
        flat
    }

    /// Checks that every face index is in range.
    #[must_use]
    pub fn faces_in_range(&self) -> bool {
        let n = self.vertices.len();
        self.faces
            .iter()
            .all(|f| f.iter().all(|&i| (i as usize) < n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad() -> BodyMesh {
        BodyMesh::new(
            vec![
                Point3::new(0.0, -0.2, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn counts() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn min_y_finds_lowest() {
        let mesh = quad();
        assert_relative_eq!(mesh.min_y().unwrap_or(f64::NAN), -0.2);
        assert!(BodyMesh::default().min_y().is_none());
    }

    #[test]
    fn flat_buffer_interleaves() {
        let mesh = quad();
        let flat = mesh.to_flat_buffer();
        assert_eq!(flat.len(), 12);
        assert_relative_eq!(flat[0], 0.0);
        assert_relative_eq!(flat[1], -0.2);
        assert_relative_eq!(flat[3], 1.0);
    }

    #[test]
    fn face_range_check() {
        let mesh = quad();
        assert!(mesh.faces_in_range());

        let bad = BodyMesh::new(vec![Point3::origin()], vec![[0, 1, 2]]);
        assert!(!bad.faces_in_range());
    }
}
