//! Growing Together domain - the pure core of the parenting simulation.
//!
//! Holds the stat model, the age/stage progression rule, the session
//! aggregate, the turn phase machine and the content payload types. Nothing in
//! this crate performs I/O.

extern crate self as growtogether_domain;

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod turn;
pub mod value_objects;

pub use aggregates::GameSession;
pub use entities::{ChildLine, Choice, Outcome, Scenario, SelectedChoice, SILENT_OBSERVATION};
pub use error::DomainError;
pub use ids::{ScenarioId, SessionId};
pub use turn::{TurnPhase, TurnState};
pub use value_objects::{
    advance_turn, apply_delta, Age, ChildGender, ChildName, LifeStage, ParentingStyle,
    PlayerName, PlayerStats, StatDelta, ADULT_AGE, INITIAL_BONDING, INITIAL_CONFIDENCE,
    INITIAL_RESILIENCE, STAT_MAX, STAT_MIN,
};
