//! Value objects - Immutable objects defined by their attributes

mod age;
mod gender;
mod life_stage;
mod names;
mod parenting_style;
mod stats;

pub use age::{advance_turn, Age, ADULT_AGE};
pub use gender::ChildGender;
pub use life_stage::LifeStage;
pub use names::{ChildName, PlayerName};
pub use parenting_style::ParentingStyle;
pub use stats::{
    apply_delta, PlayerStats, StatDelta, INITIAL_BONDING, INITIAL_CONFIDENCE,
    INITIAL_RESILIENCE, STAT_MAX, STAT_MIN,
};
