//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - LLM calls (could swap Ollama -> Gemini/OpenAI)
//! - Content generation (could swap the LLM-backed provider for a scripted one)
//! - Voice playback (could swap speech synthesis for silence)
//! - Clock (for testing)

mod error;
mod external;
mod testing;
pub mod types;

pub use error::{ContentError, LlmError, VoiceError};

pub use external::{
    ChatMessage, ContentProvider, FinishReason, LlmPort, LlmRequest, LlmResponse, MessageRole,
    TokenUsage, VoicePort,
};

pub use testing::ClockPort;

pub use types::{EvaluationContext, ScenarioContext, VoiceLine};

#[cfg(test)]
pub use external::{MockContentProvider, MockLlmPort, MockVoicePort};

#[cfg(test)]
pub use testing::MockClockPort;
