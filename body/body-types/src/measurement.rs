//! Anthropometric measurement vectors.
//!
//! A [`Measurements`] value holds the 8 parameters that drive the shape
//! model, in the fixed order the learned matrices expect. Index 7 is the
//! body height; indices 0-6 are circumference and length measurements
//! that are normalized by height before entering the model.

use crate::Gender;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of measurement parameters (including height).
pub const PARAM_COUNT: usize = 8;

/// Named access into a measurement vector, in wire order.
///
/// # Example
///
/// ```
/// use body_types::MeasurementKind;
///
/// assert_eq!(MeasurementKind::Height.index(), 7);
/// assert_eq!(MeasurementKind::Bust.label(), "Bust");
/// assert_eq!(MeasurementKind::ALL.len(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MeasurementKind {
    /// Bust circumference.
    Bust,
    /// Under-bust circumference.
    UnderBust,
    /// Waist circumference.
    Waist,
    /// Hip circumference.
    Hip,
    /// Neck girth.
    NeckGirth,
    /// Inside-leg length.
    InsideLeg,
    /// Shoulder width.
    Shoulder,
    /// Body height.
    Height,
}

impl MeasurementKind {
    /// All kinds, in vector order.
    pub const ALL: [Self; PARAM_COUNT] = [
        Self::Bust,
        Self::UnderBust,
        Self::Waist,
        Self::Hip,
        Self::NeckGirth,
        Self::InsideLeg,
        Self::Shoulder,
        Self::Height,
    ];

    /// Position of this parameter in the measurement vector.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Bust => 0,
            Self::UnderBust => 1,
            Self::Waist => 2,
            Self::Hip => 3,
            Self::NeckGirth => 4,
            Self::InsideLeg => 5,
            Self::Shoulder => 6,
            Self::Height => 7,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bust => "Bust",
            Self::UnderBust => "Under Bust",
            Self::Waist => "Waist",
            Self::Hip => "Hip",
            Self::NeckGirth => "Neck Girth",
            Self::InsideLeg => "Inside Leg",
            Self::Shoulder => "Shoulder",
            Self::Height => "Body Height",
        }
    }
}

/// An ordered vector of 8 anthropometric measurements, in centimeters.
///
/// The declared [`Measurements::MIN`]/[`Measurements::MAX`] ranges bound
/// the slider values the UI layer exposes; the UI is responsible for
/// clamping raw input into them. The computational core only ever
/// re-validates height positivity.
///
/// # Example
///
/// ```
/// use body_types::{Gender, MeasurementKind, Measurements};
///
/// let m = Measurements::defaults(Gender::Male);
/// assert!((m.height() - 174.0).abs() < 1e-12);
///
/// let ratios = m.ratios();
/// assert!((ratios[0] - 90.6 / 174.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurements {
    values: [f64; PARAM_COUNT],
}

impl Measurements {
    /// Declared per-parameter minimums (cm).
    pub const MIN: [f64; PARAM_COUNT] = [79.0, 70.0, 52.0, 79.0, 29.0, 65.0, 29.0, 145.0];

    /// Declared per-parameter maximums (cm).
    pub const MAX: [f64; PARAM_COUNT] = [113.0, 101.0, 113.0, 121.0, 45.0, 95.0, 60.0, 201.0];

    /// Training-mean female measurements.
    pub const DEFAULT_FEMALE: [f64; PARAM_COUNT] =
        [90.4, 80.6, 80.2, 98.3, 33.4, 76.3, 36.6, 168.0];

    /// Training-mean male measurements.
    pub const DEFAULT_MALE: [f64; PARAM_COUNT] = [90.6, 86.7, 81.2, 95.2, 38.5, 77.1, 37.7, 174.0];

    /// Creates a measurement vector from raw values.
    #[inline]
    #[must_use]
    pub const fn new(values: [f64; PARAM_COUNT]) -> Self {
        Self { values }
    }

    /// The training-derived default vector for a gender.
    #[inline]
    #[must_use]
    pub const fn defaults(gender: Gender) -> Self {
        match gender {
            Gender::Female => Self::new(Self::DEFAULT_FEMALE),
            Gender::Male => Self::new(Self::DEFAULT_MALE),
        }
    }

    /// Gets one parameter.
    #[inline]
    #[must_use]
    pub const fn get(&self, kind: MeasurementKind) -> f64 {
        self.values[kind.index()]
    }

    /// Sets one parameter.
    #[inline]
    pub fn set(&mut self, kind: MeasurementKind, value: f64) {
        self.values[kind.index()] = value;
    }

    /// The raw value array.
    #[inline]
    #[must_use]
    pub const fn values(&self) -> &[f64; PARAM_COUNT] {
        &self.values
    }

    /// Body height in centimeters.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.values[MeasurementKind::Height.index()]
    }

    /// Whether the height is strictly positive.
    #[inline]
    #[must_use]
    pub fn has_valid_height(&self) -> bool {
        self.height() > 0.0
    }

    /// Height-normalized shape descriptors: `values[i] / height` for the
    /// 7 non-height parameters.
    ///
    /// Callers must have established `height > 0` first; the session and
    /// reconstruction boundaries enforce this.
    #[must_use]
    pub fn ratios(&self) -> [f64; PARAM_COUNT - 1] {
        let h = self.height();
        let mut ratios = [0.0; PARAM_COUNT - 1];
        for (i, r) in ratios.iter_mut().enumerate() {
            *r = self.values[i] / h;
        }
        ratios
    }

    /// Returns a copy clamped into the declared ranges.
    ///
    /// Convenience for UI collaborators; the core never calls this.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let mut values = self.values;
        for i in 0..PARAM_COUNT {
            values[i] = values[i].clamp(Self::MIN[i], Self::MAX[i]);
        }
        Self { values }
    }
}

impl Default for Measurements {
    fn default() -> Self {
        Self::defaults(Gender::Female)
    }
}

impl From<[f64; PARAM_COUNT]> for Measurements {
    fn from(values: [f64; PARAM_COUNT]) -> Self {
        Self::new(values)
    }
}
