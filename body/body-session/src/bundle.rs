//! Per-gender model bundles.

use crate::{SessionError, SessionResult};
use body_cloth::ClothModelData;
use body_shape::ShapeModelData;
use body_types::Gender;

/// The model data for one gender: the shape model plus, optionally, a
/// draped garment bound to it.
///
/// Cloth data is optional per gender; a session on a bundle without it
/// simply cannot show a garment.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    shape: ShapeModelData,
    cloth: Option<ClothModelData>,
}

impl ModelBundle {
    /// Pairs a shape model with optional cloth data.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ModelDataMismatch`] when the cloth's
    /// reference body does not have the shape model's vertex count. The
    /// binding operator was trained against that exact body; a mismatch
    /// means the files belong to different model generations.
    pub fn new(shape: ShapeModelData, cloth: Option<ClothModelData>) -> SessionResult<Self> {
        if let Some(cloth) = &cloth {
            if cloth.body_vertex_count() != shape.vertex_count() {
                return Err(SessionError::ModelDataMismatch {
                    shape_vertices: shape.vertex_count(),
                    cloth_vertices: cloth.body_vertex_count(),
                });
            }
        }
        Ok(Self { shape, cloth })
    }

    /// The shape model.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> &ShapeModelData {
        &self.shape
    }

    /// The cloth data, when this gender has a garment.
    #[inline]
    #[must_use]
    pub const fn cloth(&self) -> Option<&ClothModelData> {
        self.cloth.as_ref()
    }
}

/// Both gender bundles, loaded once at startup.
///
/// Read-only after construction; share it across sessions behind an
/// `Arc` without further synchronization.
#[derive(Debug, Clone)]
pub struct ModelSet {
    female: ModelBundle,
    male: ModelBundle,
}

impl ModelSet {
    /// Builds a model set from both gender bundles.
    #[must_use]
    pub const fn new(female: ModelBundle, male: ModelBundle) -> Self {
        Self { female, male }
    }

    /// The bundle for a gender.
    #[inline]
    #[must_use]
    pub const fn bundle(&self, gender: Gender) -> &ModelBundle {
        match gender {
            Gender::Female => &self.female,
            Gender::Male => &self.male,
        }
    }
}
