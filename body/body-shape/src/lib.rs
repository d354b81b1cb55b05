//! Learned linear shape model for human body reconstruction.
//!
//! A [`ShapeModelData`] bundle holds the per-gender matrices learned
//! offline: a regression from height-normalized measurement ratios into a
//! small latent coefficient space, a basis expanding latent coefficients
//! into full vertex geometry, the mean shape, the fixed triangulation,
//! and the convex feasible region over ratios.
//!
//! [`ShapeModelData::reconstruct`] is the hot path: two dense
//! matrix-vector products, a height scale, and a grounding translation.
//! It is pure and deterministic, and is expected to run on every
//! parameter edit.
//!
//! # Example
//!
//! ```
//! use body_shape::ShapeModelData;
//! use body_types::{Gender, Measurements};
//! # use body_hull::ConvexHull;
//! # use nalgebra::{DMatrix, DVector};
//! # fn tiny_model() -> ShapeModelData {
//! #     let regression = DMatrix::zeros(2, 7);
//! #     let offset = DVector::from_vec(vec![0.0, 0.0]);
//! #     let basis = DMatrix::zeros(6, 2);
//! #     let mean = DVector::from_vec(vec![0.0, 0.0, 0.0, 0.0, 100.0, 0.0]);
//! #     let hull = ConvexHull::from_rows(
//! #         vec![[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -10.0]],
//! #     ).unwrap();
//! #     ShapeModelData::new(regression, offset, basis, mean, vec![[0, 1, 0]], hull).unwrap()
//! # }
//!
//! let model = tiny_model();
//! let body = model.reconstruct(&Measurements::defaults(Gender::Female)).unwrap();
//!
//! // Grounded: the lowest vertex sits on the Y = 0 plane.
//! assert!(body.mesh.min_y().unwrap().abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod curves;
mod error;
mod model;

pub use curves::{MeasureCurves, DEFAULT_CURVE_SKIP};
pub use error::{ShapeError, ShapeResult};
pub use model::{ReconstructedBody, ShapeModelData};
