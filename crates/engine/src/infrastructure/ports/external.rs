//! External service port traits (LLM, content generation, voice).

use async_trait::async_trait;
use growtogether_domain::{Outcome, Scenario};

use super::error::{ContentError, LlmError, VoiceError};
use super::types::{EvaluationContext, ScenarioContext, VoiceLine};

// =============================================================================
// LLM Types
// =============================================================================

/// LLM request/response types
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// The conversation, system prompt first when present
    pub messages: Vec<ChatMessage>,
    /// Temperature for response generation (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Ask the model for a bare JSON object
    pub json_response: bool,
}

impl LlmRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            json_response: false,
        }
    }

    /// Put `prompt` ahead of the conversation, replacing any earlier system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.messages.retain(|m| m.role != MessageRole::System);
        self.messages.insert(0, ChatMessage::system(prompt));
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn expecting_json(mut self) -> Self {
        self.json_response = true;
        self
    }
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    System,
}

#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub finish_reason: FinishReason,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// =============================================================================
// Port traits
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmPort: Send + Sync {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;
}

/// Source of scenarios and evaluated outcomes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn generate_scenario(&self, context: ScenarioContext) -> Result<Scenario, ContentError>;

    async fn evaluate_choice(&self, context: EvaluationContext) -> Result<Outcome, ContentError>;
}

/// Speaks a line of child dialogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoicePort: Send + Sync {
    async fn speak(&self, line: VoiceLine) -> Result<(), VoiceError>;
}
