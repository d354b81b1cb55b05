//! Euclidean projection onto the feasible polytope.
//!
//! The projection is the strictly convex quadratic program
//!
//! ```text
//! minimize   1/2 x'x - p'x
//! subject to C'x >= b      with C = -H[:, 0..7]', b = H[:, 7]
//! ```
//!
//! solved by a dual active-set iteration specialized to the identity
//! Hessian: start from the unconstrained minimizer `x = p`, repeatedly
//! pull the most violated facet into the working set, re-solve the
//! equality-constrained projection through the normal equations of the
//! active facet matrix, and drop facets whose multipliers go negative.
//! The working set never needs more facets than the ratio dimension.

use crate::{ConvexHull, HullError, HullResult, RATIO_DIM};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// Slack below which a facet counts as violated during the iteration.
const VIOLATION_EPS: f64 = 1e-10;

/// Multiplier threshold below which an active facet is released.
const MULTIPLIER_EPS: f64 = -1e-10;

/// Result of projecting a ratio vector onto the hull.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// The nearest feasible ratio vector.
    pub ratio: [f64; RATIO_DIM],
    /// Indices of the hull facets active (tight) at the solution.
    pub active_facets: Vec<usize>,
    /// Active-set iterations performed.
    pub iterations: usize,
}

impl ConvexHull {
    /// Projects `ratio` onto the hull, returning the nearest feasible
    /// point and the facets tight at the optimum.
    ///
    /// Projecting an already-feasible point returns it unchanged with an
    /// empty active set. The returned point is re-checked against
    /// [`ConvexHull::POST_PROJECT_TOLERANCE`]; one attempt only, no
    /// refinement loop.
    ///
    /// # Errors
    ///
    /// - [`HullError::Degenerate`] if the active facets become linearly
    ///   dependent (malformed hull data).
    /// - [`HullError::NoConvergence`] if the iteration fails to
    ///   terminate.
    /// - [`HullError::ResidualViolation`] if the returned point still
    ///   violates the hull beyond numerical noise.
    ///
    /// All three are projection failures from the caller's perspective;
    /// the session layer reverts to the gender defaults on any of them.
    pub fn project(&self, ratio: &[f64; RATIO_DIM]) -> HullResult<Projection> {
        let m = self.facet_count();
        let p = DVector::from_row_slice(ratio);

        // Facet normals and offsets in `C'x >= b` form.
        let normals: Vec<DVector<f64>> = (0..m)
            .map(|i| {
                DVector::from_fn(RATIO_DIM, |j, _| -self.halfspaces()[(i, j)])
            })
            .collect();
        let offsets: Vec<f64> = (0..m).map(|i| self.halfspaces()[(i, RATIO_DIM)]).collect();

        let max_iterations = 4 * (m + RATIO_DIM);
        let mut active: Vec<usize> = Vec::new();
        let mut x = p.clone();

        for iteration in 0..max_iterations {
            let multipliers = if active.is_empty() {
                x = p.clone();
                DVector::zeros(0)
            } else {
                let (solved, lambda) = solve_working_set(&p, &normals, &offsets, &active)?;
                x = solved;
                lambda
            };

            // Release the facet with the most negative multiplier first;
            // it blocks optimality even if the point is feasible.
            if let Some(k) = most_negative(&multipliers) {
                active.swap_remove(k);
                continue;
            }

            match most_violated(&x, &normals, &offsets, &active) {
                Some(j) => active.push(j),
                None => {
                    let result = to_ratio(&x);
                    let violation = self.max_violation(&result);
                    if violation > Self::POST_PROJECT_TOLERANCE {
                        return Err(HullError::ResidualViolation { violation });
                    }
                    active.sort_unstable();
                    debug!(
                        iterations = iteration + 1,
                        active = active.len(),
                        violation,
                        "hull projection converged"
                    );
                    return Ok(Projection {
                        ratio: result,
                        active_facets: active,
                        iterations: iteration + 1,
                    });
                }
            }
        }

        Err(HullError::NoConvergence {
            iterations: max_iterations,
        })
    }
}

/// Solves the projection restricted to the working set: minimize
/// `1/2 ||x - p||^2` subject to `n_i'x = b_i` for each active facet.
///
/// Returns the minimizer and the facet multipliers. With the identity
/// Hessian the KKT system reduces to the normal equations on the active
/// facet Gram matrix, factored by Cholesky.
fn solve_working_set(
    p: &DVector<f64>,
    normals: &[DVector<f64>],
    offsets: &[f64],
    active: &[usize],
) -> HullResult<(DVector<f64>, DVector<f64>)> {
    let k = active.len();
    let mut n = DMatrix::zeros(RATIO_DIM, k);
    for (col, &facet) in active.iter().enumerate() {
        n.set_column(col, &normals[facet]);
    }
    let b = DVector::from_fn(k, |row, _| offsets[active[row]]);

    let gram = n.transpose() * &n;
    let rhs = &b - n.transpose() * p;

    let Some(chol) = gram.cholesky() else {
        return Err(HullError::Degenerate { active: k });
    };
    let lambda = chol.solve(&rhs);
    let x = p + &n * &lambda;
    Ok((x, lambda))
}

/// Index (into the working set) of the most negative multiplier, if any.
fn most_negative(multipliers: &DVector<f64>) -> Option<usize> {
    let mut worst: Option<(usize, f64)> = None;
    for (k, &lambda) in multipliers.iter().enumerate() {
        if lambda < MULTIPLIER_EPS && worst.map_or(true, |(_, w)| lambda < w) {
            worst = Some((k, lambda));
        }
    }
    worst.map(|(k, _)| k)
}

/// Most violated facet not already in the working set, if any.
fn most_violated(
    x: &DVector<f64>,
    normals: &[DVector<f64>],
    offsets: &[f64],
    active: &[usize],
) -> Option<usize> {
    let mut worst: Option<(usize, f64)> = None;
    for (j, normal) in normals.iter().enumerate() {
        if active.contains(&j) {
            continue;
        }
        let slack = normal.dot(x) - offsets[j];
        if slack < -VIOLATION_EPS && worst.map_or(true, |(_, w)| slack < w) {
            worst = Some((j, slack));
        }
    }
    worst.map(|(j, _)| j)
}

fn to_ratio(x: &DVector<f64>) -> [f64; RATIO_DIM] {
    let mut out = [0.0; RATIO_DIM];
    for (o, v) in out.iter_mut().zip(x.iter()) {
        *o = *v;
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::hull::box_hull;
    use approx::assert_relative_eq;

    #[test]
    fn feasible_point_is_fixed_point() {
        let hull = box_hull([0.0; RATIO_DIM], [1.0; RATIO_DIM]);
        let p = [0.3, 0.4, 0.5, 0.6, 0.2, 0.45, 0.25];

        let projection = hull.project(&p).unwrap();

        for i in 0..RATIO_DIM {
            assert_relative_eq!(projection.ratio[i], p[i], epsilon = 1e-12);
        }
        assert!(projection.active_facets.is_empty());
    }

    #[test]
    fn box_projection_is_clamp() {
        // Projection onto an axis-aligned box clamps each coordinate,
        // which gives an independent ground truth for the solver.
        let lo = [0.1; RATIO_DIM];
        let hi = [0.9; RATIO_DIM];
        let hull = box_hull(lo, hi);
        let p = [1.5, 0.5, -0.3, 0.9, 0.05, 0.5, 2.0];

        let projection = hull.project(&p).unwrap();

        for i in 0..RATIO_DIM {
            assert_relative_eq!(projection.ratio[i], p[i].clamp(lo[i], hi[i]), epsilon = 1e-9);
        }
        assert!(hull.contains(&projection.ratio, ConvexHull::DEFAULT_TOLERANCE));
        assert!(!projection.active_facets.is_empty());
    }

    #[test]
    fn slanted_facet_projection() {
        // Single facet x0 + x1 <= 1; projecting (1, 1, 0, ...) lands at
        // (0.5, 0.5, 0, ...), the analytic nearest point.
        let hull =
            ConvexHull::from_rows(vec![[1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0]]).unwrap();
        let p = [1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0];

        let projection = hull.project(&p).unwrap();

        assert_relative_eq!(projection.ratio[0], 0.5, epsilon = 1e-9);
        assert_relative_eq!(projection.ratio[1], 0.5, epsilon = 1e-9);
        assert_relative_eq!(projection.ratio[2], 0.0, epsilon = 1e-9);
        assert_eq!(projection.active_facets, vec![0]);
    }

    #[test]
    fn projection_is_idempotent() {
        let hull = box_hull([0.0; RATIO_DIM], [1.0; RATIO_DIM]);
        let p = [1.4, 0.5, 0.5, 0.5, 0.5, 0.5, -0.2];

        let first = hull.project(&p).unwrap();
        let second = hull.project(&first.ratio).unwrap();

        for i in 0..RATIO_DIM {
            assert_relative_eq!(second.ratio[i], first.ratio[i], epsilon = 1e-9);
        }
    }

    #[test]
    fn corner_projection_activates_multiple_facets() {
        let hull = box_hull([0.0; RATIO_DIM], [1.0; RATIO_DIM]);
        let p = [2.0, 2.0, 2.0, 0.5, 0.5, 0.5, 0.5];

        let projection = hull.project(&p).unwrap();

        assert_eq!(projection.active_facets.len(), 3);
        assert_relative_eq!(projection.ratio[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(projection.ratio[1], 1.0, epsilon = 1e-9);
        assert_relative_eq!(projection.ratio[2], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn optimality_against_brute_force() {
        // For a box hull the nearest feasible point is the clamp; verify
        // the distance matches, not just feasibility.
        let lo = [0.2; RATIO_DIM];
        let hi = [0.8; RATIO_DIM];
        let hull = box_hull(lo, hi);
        let p = [0.9, 0.1, 0.5, 0.85, 0.15, 0.5, 0.95];

        let projection = hull.project(&p).unwrap();

        let solver_dist: f64 = (0..RATIO_DIM)
            .map(|i| (projection.ratio[i] - p[i]).powi(2))
            .sum();
        let clamp_dist: f64 = (0..RATIO_DIM)
            .map(|i| (p[i].clamp(lo[i], hi[i]) - p[i]).powi(2))
            .sum();
        assert_relative_eq!(solver_dist, clamp_dist, epsilon = 1e-9);
    }
}
