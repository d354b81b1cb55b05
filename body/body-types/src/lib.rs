//! Core value types for parametric human body generation.
//!
//! This crate provides the vocabulary shared by the body-generation
//! pipeline:
//!
//! - [`Measurements`] - An ordered vector of 8 anthropometric measurements
//! - [`MeasurementKind`] - Named access into a measurement vector
//! - [`Gender`] - Selects one of the two learned model bundles
//! - [`BodyMesh`] - A triangle mesh value with a fixed triangulation
//! - [`SizingProfile`] - Qualitative sizing presets mapped to measurements
//!
//! # Units
//!
//! All measurements are **centimeters**. Mesh coordinates are in meters
//! once a reconstruction has applied the height scale.
//!
//! # Coordinate System
//!
//! Right-handed, Y-up. Reconstructed bodies are grounded so the lowest
//! vertex sits on the Y=0 plane.
//!
//! # Example
//!
//! ```
//! use body_types::{Gender, MeasurementKind, Measurements};
//!
//! let mut m = Measurements::defaults(Gender::Female);
//! m.set(MeasurementKind::Waist, 72.0);
//!
//! assert!((m.get(MeasurementKind::Waist) - 72.0).abs() < 1e-12);
//! assert!(m.height() > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod gender;
mod measurement;
mod mesh;
mod preset;

pub use gender::Gender;
pub use measurement::{MeasurementKind, Measurements, PARAM_COUNT};
pub use mesh::BodyMesh;
pub use preset::{BuildPreset, SizingProfile};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
