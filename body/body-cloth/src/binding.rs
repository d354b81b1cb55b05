//! Sparse binding operator.

use crate::{ClothError, ClothResult};
use body_types::Vector3;
use nalgebra_sparse::{CooMatrix, CsrMatrix};

/// Sparse garment-to-body binding in CSR format.
///
/// Row `j` holds the influence weights of the body vertices that drive
/// garment vertex `j`. CSR is the right layout here: applying the
/// operator iterates rows, producing one garment displacement per row
/// from a handful of body displacements.
///
/// # Example
///
/// ```
/// use body_cloth::BindingOperator;
/// use body_types::Vector3;
///
/// // One garment vertex riding the average of two body vertices.
/// let binding = BindingOperator::from_triplets(1, 2, &[(0, 0, 0.5), (0, 1, 0.5)]).unwrap();
///
/// let disp = binding.apply(&[Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)]);
/// assert!((disp[0].x - 0.5).abs() < 1e-12);
/// assert!((disp[0].y - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BindingOperator {
    matrix: CsrMatrix<f64>,
    rows: usize,
    cols: usize,
}

impl BindingOperator {
    /// Builds the operator from `(garment_vertex, body_vertex, weight)`
    /// triplets. Near-zero weights are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ClothError::TripletOutOfRange`] when a triplet indexes
    /// outside the `rows x cols` shape. Fatal at load time.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        triplets: &[(usize, usize, f64)],
    ) -> ClothResult<Self> {
        let mut coo = CooMatrix::new(rows, cols);
        for &(row, col, weight) in triplets {
            if row >= rows || col >= cols {
                return Err(ClothError::TripletOutOfRange {
                    row,
                    col,
                    rows,
                    cols,
                });
            }
            if weight.abs() > 1e-15 {
                coo.push(row, col, weight);
            }
        }
        Ok(Self {
            matrix: CsrMatrix::from(&coo),
            rows,
            cols,
        })
    }

    /// Number of garment vertices (rows).
    #[inline]
    #[must_use]
    pub const fn nrows(&self) -> usize {
        self.rows
    }

    /// Number of body vertices (columns).
    #[inline]
    #[must_use]
    pub const fn ncols(&self) -> usize {
        self.cols
    }

    /// Number of stored weights.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    /// Applies the operator to a per-body-vertex displacement field,
    /// producing one displacement per garment vertex.
    ///
    /// Sparse matrix times dense three-column matrix, computed row-wise.
    /// `displacements.len()` must equal [`BindingOperator::ncols`];
    /// callers validate through [`crate::ClothModelData`].
    #[must_use]
    pub fn apply(&self, displacements: &[Vector3<f64>]) -> Vec<Vector3<f64>> {
        let mut out = vec![Vector3::zeros(); self.rows];
        for (row_idx, row) in self.matrix.row_iter().enumerate() {
            let mut sum = Vector3::zeros();
            for (&col, &weight) in row.col_indices().iter().zip(row.values().iter()) {
                sum += displacements[col] * weight;
            }
            out[row_idx] = sum;
        }
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn triplet_construction_skips_zeros() {
        let binding =
            BindingOperator::from_triplets(2, 3, &[(0, 0, 1.0), (0, 1, 0.0), (1, 2, 0.25)])
                .unwrap();

        assert_eq!(binding.nrows(), 2);
        assert_eq!(binding.ncols(), 3);
        assert_eq!(binding.nnz(), 2);
    }

    #[test]
    fn rejects_out_of_range_triplet() {
        let result = BindingOperator::from_triplets(1, 2, &[(5, 0, 1.0)]);
        assert!(matches!(
            result,
            Err(ClothError::TripletOutOfRange {
                row: 5,
                col: 0,
                rows: 1,
                cols: 2,
            })
        ));

        let result = BindingOperator::from_triplets(2, 2, &[(0, 0, 1.0), (1, 3, 0.5)]);
        assert!(matches!(
            result,
            Err(ClothError::TripletOutOfRange { row: 1, col: 3, .. })
        ));
    }

    #[test]
    fn apply_weights_rows() {
        let binding = BindingOperator::from_triplets(
            2,
            3,
            &[(0, 0, 0.75), (0, 2, 0.25), (1, 1, 1.0)],
        )
        .unwrap();
        let disp = [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 2.0, 0.0),
            Vector3::new(0.0, 0.0, 4.0),
        ];

        let out = binding.apply(&disp);

        assert_relative_eq!(out[0].x, 0.75);
        assert_relative_eq!(out[0].z, 1.0);
        assert_relative_eq!(out[1].y, 2.0);
    }

    #[test]
    fn empty_row_yields_zero_displacement() {
        let binding = BindingOperator::from_triplets(2, 2, &[(0, 0, 1.0)]).unwrap();
        let disp = [Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0)];

        let out = binding.apply(&disp);

        assert_relative_eq!(out[1].norm(), 0.0);
    }
}
