//! Qualitative sizing presets.
//!
//! UI collaborators often collect coarse inputs (height, weight, and a
//! narrow/average/wide build choice per region) rather than tape
//! measurements. A [`SizingProfile`] maps those onto a full
//! [`Measurements`] vector using gender-specific reference statures, so
//! the result can seed a session directly.

use crate::{Gender, MeasurementKind, Measurements};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pounds-to-kilograms conversion factor.
const LB_TO_KG: f64 = 0.453_592;

/// Qualitative build choice for a body region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BuildPreset {
    /// Narrower than the training mean.
    Narrow,
    /// The training mean.
    #[default]
    Average,
    /// Wider than the training mean.
    Wide,
}

/// Coarse sizing inputs mapped onto a measurement vector.
///
/// # Example
///
/// ```
/// use body_types::{BuildPreset, Gender, MeasurementKind, SizingProfile};
///
/// let profile = SizingProfile::new(168.0, 135.0)
///     .with_shoulders(BuildPreset::Narrow)
///     .with_hips(BuildPreset::Wide);
///
/// let m = profile.to_measurements(Gender::Female);
/// assert!((m.height() - 168.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SizingProfile {
    /// Body height in centimeters.
    pub height_cm: f64,
    /// Body weight in pounds.
    pub weight_lb: f64,
    /// Shoulder build.
    pub shoulders: BuildPreset,
    /// Waist build.
    pub waist: BuildPreset,
    /// Hip build.
    pub hips: BuildPreset,
}

impl SizingProfile {
    /// Creates a profile with average builds everywhere.
    #[inline]
    #[must_use]
    pub fn new(height_cm: f64, weight_lb: f64) -> Self {
        Self {
            height_cm,
            weight_lb,
            shoulders: BuildPreset::default(),
            waist: BuildPreset::default(),
            hips: BuildPreset::default(),
        }
    }

    /// Sets the shoulder build.
    #[inline]
    #[must_use]
    pub const fn with_shoulders(mut self, preset: BuildPreset) -> Self {
        self.shoulders = preset;
        self
    }

    /// Sets the waist build.
    #[inline]
    #[must_use]
    pub const fn with_waist(mut self, preset: BuildPreset) -> Self {
        self.waist = preset;
        self
    }

    /// Sets the hip build.
    #[inline]
    #[must_use]
    pub const fn with_hips(mut self, preset: BuildPreset) -> Self {
        self.hips = preset;
        self
    }

    /// Maps the profile onto a full measurement vector.
    ///
    /// Girths scale with both stature and weight relative to the
    /// gender's reference (180 cm / 70 kg male, 160 cm / 60 kg female);
    /// lengths scale with stature only. Shoulder presets apply a
    /// secondary stature correction so short/tall frames do not
    /// over-shoot.
    #[must_use]
    pub fn to_measurements(&self, gender: Gender) -> Measurements {
        let defaults = Measurements::defaults(gender);

        let (ref_height, ref_weight_kg) = match gender {
            Gender::Female => (160.0, 60.0),
            Gender::Male => (180.0, 70.0),
        };
        let hm = self.height_cm / ref_height;
        let wm = (self.weight_lb * LB_TO_KG) / ref_weight_kg;

        let shoulder_factor = match (self.shoulders, gender) {
            (BuildPreset::Narrow, Gender::Male) => 0.9 * (1.0 - hm * 0.1),
            (BuildPreset::Narrow, Gender::Female) => 0.85 * (1.0 - hm * 0.15),
            (BuildPreset::Average, _) => 1.0,
            (BuildPreset::Wide, Gender::Male) => 1.1 * (1.0 + hm * 0.1),
            (BuildPreset::Wide, Gender::Female) => 1.15 * (1.0 + hm * 0.15),
        };
        let girth_factor = |preset: BuildPreset| match preset {
            BuildPreset::Narrow => 0.9,
            BuildPreset::Average => 1.0,
            BuildPreset::Wide => 1.1,
        };

        let mut m = defaults;
        let d = *defaults.values();
        m.set(MeasurementKind::Bust, d[0] * hm * wm);
        m.set(MeasurementKind::UnderBust, d[1] * hm * wm);
        m.set(
            MeasurementKind::Waist,
            d[2] * girth_factor(self.waist) * hm * wm,
        );
        m.set(
            MeasurementKind::Hip,
            d[3] * girth_factor(self.hips) * hm * wm,
        );
        m.set(MeasurementKind::NeckGirth, d[4] * hm * wm);
        m.set(MeasurementKind::InsideLeg, d[5] * hm);
        m.set(MeasurementKind::Shoulder, d[6] * shoulder_factor * hm);
        m.set(MeasurementKind::Height, self.height_cm);
        m
    }
}
