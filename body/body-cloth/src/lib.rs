//! Sparse garment binding and deformation.
//!
//! A draped garment is bound to the body surface offline: each garment
//! vertex is influenced by the handful of body vertices nearest to it,
//! recorded as a sparse linear operator. At runtime, deforming the
//! garment onto a new body shape is one sparse matrix product:
//!
//! 1. body displacement from the reference pose at the current height,
//! 2. garment displacement = binding x body displacement,
//! 3. garment vertex = rest vertex at height + displacement, re-grounded
//!    with the body's grounding offset.
//!
//! This is a static linear skinning map, not a cloth simulation; there
//! is no collision handling and no relaxation.
//!
//! # Why sparse
//!
//! The binding has one non-zero row block per garment vertex referencing
//! only its nearby body vertices. At realistic vertex counts a dense
//! `G x V` operator would be prohibitive in both memory and per-edit
//! compute; the operator is stored and applied in CSR form
//! (see [`BindingOperator`]).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod binding;
mod deform;
mod error;

pub use binding::BindingOperator;
pub use deform::ClothModelData;
pub use error::{ClothError, ClothResult};
