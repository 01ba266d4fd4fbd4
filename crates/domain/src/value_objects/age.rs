//! Age value object and the per-turn progression rule.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::LifeStage;

/// Age at which the child becomes an adult and the game ends.
pub const ADULT_AGE: u32 = 18;

/// The child's age in whole years.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Age(u32);

impl Age {
    pub const fn new(years: u32) -> Self {
        Self(years)
    }

    /// Age of a newborn.
    pub const fn newborn() -> Self {
        Self(0)
    }

    #[inline]
    pub fn years(&self) -> u32 {
        self.0
    }

    /// The life stage this age falls into.
    pub fn stage(&self) -> LifeStage {
        LifeStage::for_age(*self)
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Age {
    fn from(years: u32) -> Self {
        Self(years)
    }
}

/// Advance the child by one completed turn.
///
/// Below [`ADULT_AGE`] the age grows by exactly one year; from then on it no
/// longer changes. The returned stage is always looked up from the new age;
/// the incoming stage is accepted only for symmetry with callers that track
/// both and does not influence the result.
pub fn advance_turn(age: Age, _stage: LifeStage) -> (Age, LifeStage) {
    let next = if age.years() < ADULT_AGE {
        Age::new(age.years() + 1)
    } else {
        age
    };
    (next, next.stage())
}
