//! Use cases - User story orchestration.
//!
//! - `content` - scenario and outcome generation on top of the LLM port
//! - `turn` - sequencing of one turn against the active session
//! - `voice` - background narration of child dialogue

pub mod content;
pub mod turn;
pub mod voice;

pub use content::LlmContentProvider;
pub use turn::{TurnController, TurnError, TurnSnapshot};
pub use voice::VoiceNarrator;
