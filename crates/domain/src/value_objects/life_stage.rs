//! Life stage value object - the child's developmental stage.
//!
//! A stage is never stored independently of age. [`LifeStage::for_age`] is the
//! only way to obtain the stage for an age, backed by a single closed threshold
//! table, so the two cannot drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Age;

/// Ordered developmental stages from birth to adulthood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    Infant,
    Toddler,
    Preschool,
    Elementary,
    Teen,
    Adult,
}

/// Lower age bound (inclusive) at which each stage begins, ascending.
///
/// Each stage covers `[lower, next lower)`; the last one is open-ended.
const STAGE_THRESHOLDS: [(u32, LifeStage); 6] = [
    (0, LifeStage::Infant),
    (1, LifeStage::Toddler),
    (3, LifeStage::Preschool),
    (6, LifeStage::Elementary),
    (13, LifeStage::Teen),
    (18, LifeStage::Adult),
];

impl LifeStage {
    /// Look up the stage for an age in the threshold table.
    pub fn for_age(age: Age) -> Self {
        STAGE_THRESHOLDS
            .iter()
            .rev()
            .find(|(lower, _)| age.years() >= *lower)
            .map(|(_, stage)| *stage)
            .unwrap_or(LifeStage::Infant)
    }

    /// Age at which this stage begins.
    pub fn min_age(&self) -> Age {
        let lower = STAGE_THRESHOLDS
            .iter()
            .find(|(_, stage)| stage == self)
            .map(|(lower, _)| *lower)
            .unwrap_or(0);
        Age::new(lower)
    }

    /// Whether this is the terminal stage.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Adult)
    }

    /// Human-readable label including the stage's age band.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Infant => "Infant (0-1 yr)",
            Self::Toddler => "Toddler (1-3 yrs)",
            Self::Preschool => "Preschool (3-6 yrs)",
            Self::Elementary => "Elementary (6-12 yrs)",
            Self::Teen => "Teenager (13-18 yrs)",
            Self::Adult => "Young Adult (18+ yrs)",
        }
    }

    /// Typical situations worth building a scenario around at this stage.
    pub fn focus_areas(&self) -> &'static str {
        match self {
            Self::Infant => "Crying at night, feeding, sleep routines, first bonding moments.",
            Self::Toddler => "Tantrums, eating, potty training, sharing.",
            Self::Preschool => "Curiosity and endless questions, first friendships, fears, play rules.",
            Self::Elementary => {
                "Not talking about school, fear of failure (e.g. sports), bullying, homework struggle, lying."
            }
            Self::Teen => "Privacy, peer pressure, independence, dating, academic stress.",
            Self::Adult => "Leaving home, career choices, redefining the parent-child relationship.",
        }
    }

    pub fn all() -> [LifeStage; 6] {
        STAGE_THRESHOLDS.map(|(_, stage)| stage)
    }
}

impl fmt::Display for LifeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
