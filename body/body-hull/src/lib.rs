//! Learned feasible region for normalized body measurements.
//!
//! The shape model is only trustworthy near the measurement combinations
//! it was trained on. That region is captured as a convex polytope over
//! height-normalized measurement ratios, expressed as half-space
//! inequalities. This crate provides:
//!
//! - [`ConvexHull`] - the polytope and its membership predicate
//! - [`ConvexHull::project`] - Euclidean projection of an out-of-range
//!   ratio vector back onto the polytope, via a dual active-set
//!   quadratic program
//!
//! # The projection problem
//!
//! Given ratios `p`, find `x` minimizing `½‖x‖² − p·x` subject to
//! `Cᵀx ≥ b`, where `C` and `b` derive from the hull facets. The Hessian
//! is the identity, so this is exactly the nearest feasible point to `p`
//! and the solution is unique whenever the polytope is non-empty.
//!
//! # Example
//!
//! ```
//! use body_hull::ConvexHull;
//!
//! // A single facet: x0 + x1 <= 1 over 7-dimensional ratios.
//! let hull = ConvexHull::from_rows(vec![[1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0]]).unwrap();
//!
//! let inside = [0.2, 0.3, 0.0, 0.0, 0.0, 0.0, 0.0];
//! assert!(hull.contains(&inside, ConvexHull::DEFAULT_TOLERANCE));
//!
//! let outside = [1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
//! let projected = hull.project(&outside).unwrap();
//! assert!(hull.contains(&projected.ratio, ConvexHull::DEFAULT_TOLERANCE));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod hull;
mod project;

pub use error::{HullError, HullResult};
pub use hull::{ConvexHull, RATIO_DIM};
pub use project::Projection;
