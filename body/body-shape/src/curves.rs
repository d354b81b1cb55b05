//! Measurement curve sampling.
//!
//! Each learned measurement site (bust line, waist line, ...) is stored
//! as a closed loop of points that live on mesh edges: a pair of vertex
//! indices plus an interpolation ratio per node. Sampling a curve on a
//! reconstructed body yields a polyline the UI can sweep a tape or tube
//! along; feature points mark single anatomical landmarks.

use crate::{ShapeError, ShapeResult};
use body_types::{BodyMesh, Point3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default node subsampling: keep every fifth node of a curve loop.
///
/// The recorded loops are much denser than a display spline needs.
pub const DEFAULT_CURVE_SKIP: usize = 4;

/// One measurement curve: edge endpoints and interpolation ratios.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct CurveDef {
    /// `[smaller, larger]` vertex index pairs, one per node.
    edges: Vec<[u32; 2]>,
    /// Interpolation ratio from the first to the second endpoint.
    ratios: Vec<f64>,
}

/// Measurement curve and landmark definitions for one gender's model.
///
/// Definitions are recorded against the model topology, so they are
/// validated against a vertex count at construction and then sample any
/// reconstruction of that model without further checks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeasureCurves {
    curves: Vec<CurveDef>,
    feature_points: Vec<u32>,
}

impl MeasureCurves {
    /// Builds curve definitions, validating every index against the
    /// model's vertex count.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::CurveLengthMismatch`] when a curve's edge
    /// and ratio lists disagree, or [`ShapeError::CurveIndexOutOfRange`]
    /// when any referenced vertex does not exist.
    pub fn new(
        curves: Vec<(Vec<[u32; 2]>, Vec<f64>)>,
        feature_points: Vec<u32>,
        vertex_count: usize,
    ) -> ShapeResult<Self> {
        let mut defs = Vec::with_capacity(curves.len());
        for (curve, (edges, ratios)) in curves.into_iter().enumerate() {
            if edges.len() != ratios.len() {
                return Err(ShapeError::CurveLengthMismatch {
                    curve,
                    nodes: edges.len(),
                    ratios: ratios.len(),
                });
            }
            for pair in &edges {
                for &index in pair {
                    if (index as usize) >= vertex_count {
                        return Err(ShapeError::CurveIndexOutOfRange {
                            curve,
                            index,
                            vertex_count,
                        });
                    }
                }
            }
            defs.push(CurveDef { edges, ratios });
        }
        for &index in &feature_points {
            if (index as usize) >= vertex_count {
                return Err(ShapeError::CurveIndexOutOfRange {
                    curve: defs.len(),
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self {
            curves: defs,
            feature_points,
        })
    }

    /// Number of measurement curves.
    #[inline]
    #[must_use]
    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    /// Samples every curve on a reconstructed body.
    ///
    /// Keeps one node out of every `skip + 1`, interpolating
    /// `(1 - r) * v_first + r * v_second` along each recorded edge.
    /// Returns one polyline (closed loop, endpoints not repeated) per
    /// curve.
    #[must_use]
    pub fn sample(&self, body: &BodyMesh, skip: usize) -> Vec<Vec<Point3<f64>>> {
        let step = skip + 1;
        self.curves
            .iter()
            .map(|def| {
                def.edges
                    .iter()
                    .zip(def.ratios.iter())
                    .step_by(step)
                    .map(|(&[first, second], &r)| {
                        let a = body.vertices[first as usize];
                        let b = body.vertices[second as usize];
                        Point3::from(a.coords.lerp(&b.coords, r))
                    })
                    .collect()
            })
            .collect()
    }

    /// Positions of the anatomical feature points on a reconstructed
    /// body.
    #[must_use]
    pub fn feature_positions(&self, body: &BodyMesh) -> Vec<Point3<f64>> {
        self.feature_points
            .iter()
            .map(|&index| body.vertices[index as usize])
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_body() -> BodyMesh {
        BodyMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn rejects_length_mismatch() {
        let result = MeasureCurves::new(vec![(vec![[0, 1], [1, 2]], vec![0.5])], vec![], 4);
        assert!(matches!(
            result,
            Err(ShapeError::CurveLengthMismatch {
                curve: 0,
                nodes: 2,
                ratios: 1,
            })
        ));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let result = MeasureCurves::new(vec![(vec![[0, 7]], vec![0.5])], vec![], 4);
        assert!(matches!(
            result,
            Err(ShapeError::CurveIndexOutOfRange { index: 7, .. })
        ));

        let result = MeasureCurves::new(vec![], vec![9], 4);
        assert!(result.is_err());
    }

    #[test]
    fn samples_interpolate_edges() {
        let curves =
            MeasureCurves::new(vec![(vec![[0, 1], [1, 2]], vec![0.5, 0.25])], vec![], 4).unwrap();
        let body = square_body();

        let sampled = curves.sample(&body, 0);
        assert_eq!(sampled.len(), 1);
        assert_eq!(sampled[0].len(), 2);

        // Midpoint of (0,0,0)-(1,0,0).
        assert_relative_eq!(sampled[0][0].x, 0.5);
        assert_relative_eq!(sampled[0][0].y, 0.0);
        // Quarter along (1,0,0)-(1,1,0).
        assert_relative_eq!(sampled[0][1].x, 1.0);
        assert_relative_eq!(sampled[0][1].y, 0.25);
    }

    #[test]
    fn skip_subsamples_nodes() {
        let edges = vec![[0, 1]; 10];
        let ratios = vec![0.5; 10];
        let curves = MeasureCurves::new(vec![(edges, ratios)], vec![], 4).unwrap();
        let body = square_body();

        let dense = curves.sample(&body, 0);
        let sparse = curves.sample(&body, DEFAULT_CURVE_SKIP);

        assert_eq!(dense[0].len(), 10);
        assert_eq!(sparse[0].len(), 2);
    }

    #[test]
    fn feature_positions_index_vertices() {
        let curves = MeasureCurves::new(vec![], vec![2, 0], 4).unwrap();
        let body = square_body();

        let positions = curves.feature_positions(&body);
        assert_eq!(positions.len(), 2);
        assert_relative_eq!(positions[0].x, 1.0);
        assert_relative_eq!(positions[0].y, 1.0);
        assert_relative_eq!(positions[1].x, 0.0);
    }
}
