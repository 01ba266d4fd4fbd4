//! Entities - content payloads consumed by a turn

mod outcome;
mod scenario;

pub use outcome::Outcome;
pub use scenario::{ChildLine, Choice, Scenario, SelectedChoice, SILENT_OBSERVATION};
