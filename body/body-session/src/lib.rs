//! Session orchestration over shared body model data.
//!
//! Model data is loaded once into a [`ModelSet`] (one [`ModelBundle`]
//! per gender, cross-validated at construction) and shared read-only
//! across any number of [`Session`]s. A session owns the mutable
//! editing state: gender, measurement vector, reconstructed body,
//! optional garment, and the advisory out-of-region flag.
//!
//! Every mutating operation is transactional: it either commits a fully
//! consistent new state (body, garment, and flag together) or returns
//! an error leaving the previous state untouched. There is no partial
//! update and no background work.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bundle;
mod error;
mod session;

pub use bundle::{ModelBundle, ModelSet};
pub use error::{SessionError, SessionResult};
pub use session::Session;
