//! Error types for port operations.

/// Failure talking to the generative model.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Failure producing scenario or outcome content.
///
/// Always non-fatal: the turn that requested it can be retried.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ContentError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("Invalid content: {0}")]
    InvalidResponse(String),
    /// The task running the request panicked or was shut down.
    #[error("Content request aborted: {0}")]
    Aborted(String),
}

impl ContentError {
    pub fn invalid(message: impl ToString) -> Self {
        Self::InvalidResponse(message.to_string())
    }
}

/// Failure synthesising or playing a voice line. Logged, never surfaced.
#[derive(Debug, Clone, thiserror::Error)]
pub enum VoiceError {
    #[error("Speech synthesis failed: {0}")]
    SynthesisFailed(String),
    #[error("Speech service unavailable")]
    Unavailable,
}
