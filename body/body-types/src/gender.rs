//! Gender selection for the learned model bundles.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Selects which learned model bundle drives a reconstruction.
///
/// The shape model, feasible region, and garment binding are all learned
/// per gender; a `Gender` value resolves to exactly one immutable bundle.
///
/// # Example
///
/// ```
/// use body_types::Gender;
///
/// assert_eq!(Gender::Female.label(), "female");
/// assert_ne!(Gender::Female, Gender::Male);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Gender {
    /// Female model bundle.
    #[default]
    Female,
    /// Male model bundle.
    Male,
}

impl Gender {
    /// Both genders, in bundle order.
    pub const ALL: [Self; 2] = [Self::Female, Self::Male];

    /// Lowercase display label.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
