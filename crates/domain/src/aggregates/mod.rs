//! Aggregates - consistency boundaries for state that changes over a game

pub mod game_session;

pub use game_session::GameSession;
