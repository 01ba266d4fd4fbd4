//! Growing Together Protocol - Shared types for Engine and Presentation communication
//!
//! This crate contains the wire-format DTOs exchanged over the HTTP API:
//! - Request bodies for the `start` and `choose` intents
//! - The read-only session snapshot and its nested views
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, uuid and the domain vocabulary enums
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain IDs** - use raw `uuid::Uuid` in DTOs

pub mod requests;
pub mod responses;

pub use requests::{ChooseRequest, StartSessionRequest};
pub use responses::{
    ChildLineView, ChoiceView, ErrorResponse, JourneySummary, OutcomeView, ScenarioView,
    SessionSnapshot, SessionView, StatsView,
};
