//! Scenario and outcome generation via LLM.
//!
//! Implements the [`ContentProvider`] port on top of any [`LlmPort`]. Prompts
//! state the exact JSON shape expected back; responses are pulled out of
//! fenced or raw text and decoded into domain types. Nothing here retries.

mod parse;
mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use growtogether_domain::{Outcome, Scenario, ScenarioId};

use crate::infrastructure::ports::{
    ChatMessage, ContentError, ContentProvider, EvaluationContext, FinishReason, LlmPort,
    LlmRequest, ScenarioContext,
};

pub use prompts::OUTPUT_LANGUAGE;

/// Slight creativity for scenarios.
const SCENARIO_TEMPERATURE: f32 = 0.8;
/// More analytical for feedback.
const EVALUATION_TEMPERATURE: f32 = 0.4;

/// Content provider backed by a generative model.
pub struct LlmContentProvider {
    llm: Arc<dyn LlmPort>,
}

impl LlmContentProvider {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self { llm }
    }

    async fn complete(&self, request: LlmRequest) -> Result<String, ContentError> {
        let response = self.llm.generate(request).await?;
        if response.finish_reason == FinishReason::Length {
            tracing::warn!("LLM response was truncated at the token limit");
        }
        Ok(response.content)
    }
}

#[async_trait]
impl ContentProvider for LlmContentProvider {
    async fn generate_scenario(&self, context: ScenarioContext) -> Result<Scenario, ContentError> {
        let request = LlmRequest::new(vec![ChatMessage::user(prompts::scenario_user_message(
            &context,
        ))])
        .with_system_prompt(prompts::scenario_system_prompt())
        .with_temperature(SCENARIO_TEMPERATURE)
        .expecting_json();

        tracing::debug!(
            age = context.age.years(),
            stage = %context.stage,
            "Generating scenario via LLM"
        );

        let content = self.complete(request).await?;
        let scenario = parse::parse_scenario(&content, ScenarioId::new())?;

        tracing::info!(
            scenario_id = %scenario.id(),
            title = %scenario.title(),
            choices = scenario.choices().len(),
            "Scenario generated"
        );

        Ok(scenario)
    }

    async fn evaluate_choice(&self, context: EvaluationContext) -> Result<Outcome, ContentError> {
        let request = LlmRequest::new(vec![ChatMessage::user(
            prompts::evaluation_user_message(&context),
        )])
        .with_system_prompt(prompts::evaluation_system_prompt())
        .with_temperature(EVALUATION_TEMPERATURE)
        .expecting_json();

        tracing::debug!(age = context.age.years(), "Evaluating choice via LLM");

        let content = self.complete(request).await?;
        let outcome = parse::parse_outcome(&content)?;

        tracing::info!(
            bonding = outcome.stat_changes.bonding,
            resilience = outcome.stat_changes.resilience,
            confidence = outcome.stat_changes.confidence,
            "Choice evaluated"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{LlmError, LlmResponse, MessageRole, MockLlmPort};
    use growtogether_domain::{Age, ChildGender, LifeStage, ParentingStyle, PlayerStats, StatDelta};
    use std::sync::Mutex;

    /// Mock LLM that returns a configurable response and records requests
    struct MockLlm {
        response: String,
        seen: Mutex<Vec<LlmRequest>>,
    }

    impl MockLlm {
        fn new(response: impl Into<String>) -> Self {
            Self {
                response: response.into(),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn last_request(&self) -> LlmRequest {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl LlmPort for MockLlm {
        async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
            self.seen.lock().unwrap().push(request);
            Ok(LlmResponse {
                content: self.response.clone(),
                finish_reason: FinishReason::Stop,
                usage: None,
            })
        }
    }

    fn scenario_context() -> ScenarioContext {
        ScenarioContext {
            child_name: "Mia".to_string(),
            age: Age::new(2),
            stage: LifeStage::Toddler,
            gender: ChildGender::Girl,
            stats: PlayerStats::initial(),
        }
    }

    fn evaluation_context() -> EvaluationContext {
        EvaluationContext {
            scenario_context: "She is overtired.".to_string(),
            scenario_description: "Tantrum in the supermarket.".to_string(),
            child_name: "Mia".to_string(),
            age: Age::new(2),
            chosen_text: "Kneel down and name the feeling".to_string(),
            chosen_style: Some(ParentingStyle::Empathetic),
        }
    }

    #[tokio::test]
    async fn test_generate_scenario_uses_creative_json_request() {
        let llm = Arc::new(MockLlm::new(
            r#"{"title": "超市里的哭闹", "description": "她躺在地上大哭。", "context": "她累了。",
               "childDialogue": "我要糖!", "emotion": "angry",
               "choices": [{"id": "1", "text": "蹲下来抱抱她", "style": "Empathetic"}]}"#,
        ));
        let provider = LlmContentProvider::new(llm.clone());

        let scenario = provider.generate_scenario(scenario_context()).await.unwrap();
        assert_eq!(scenario.title(), "超市里的哭闹");
        assert_eq!(scenario.child_line().unwrap().text, "我要糖!");

        let request = llm.last_request();
        assert_eq!(request.temperature, Some(SCENARIO_TEMPERATURE));
        assert!(request.json_response);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert!(request.messages[0].content.contains(OUTPUT_LANGUAGE));
        assert!(request.messages[1].content.contains("Name: Mia"));
    }

    #[tokio::test]
    async fn test_scenario_ids_are_unique() {
        let llm = Arc::new(MockLlm::new(
            r#"{"title": "t", "description": "d", "context": "c",
               "choices": [{"id": "1", "text": "x", "style": "Permissive"}]}"#,
        ));
        let provider = LlmContentProvider::new(llm);
        let a = provider.generate_scenario(scenario_context()).await.unwrap();
        let b = provider.generate_scenario(scenario_context()).await.unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn test_evaluate_choice_uses_analytical_request() {
        let llm = Arc::new(MockLlm::new(
            r#"{"narrative": "她慢慢安静下来。", "childReaction": "抽泣着靠在你肩上。",
               "feedback": "命名情绪帮助幼儿平复。",
               "statChanges": {"bonding": 5, "resilience": 2, "confidence": 0}}"#,
        ));
        let provider = LlmContentProvider::new(llm.clone());

        let outcome = provider.evaluate_choice(evaluation_context()).await.unwrap();
        assert_eq!(outcome.stat_changes, StatDelta::new(5, 2, 0));

        let request = llm.last_request();
        assert_eq!(request.temperature, Some(EVALUATION_TEMPERATURE));
        assert!(request.messages[1].content.contains("She is overtired."));
        assert!(request.messages[1].content.contains("(Style: Empathetic)"));
    }

    #[tokio::test]
    async fn test_llm_failure_becomes_content_error() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .times(1)
            .returning(|_| Err(LlmError::RequestFailed("connection refused".to_string())));
        let provider = LlmContentProvider::new(Arc::new(llm));

        let err = provider.generate_scenario(scenario_context()).await.unwrap_err();
        assert!(matches!(err, ContentError::Llm(LlmError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn test_unparseable_response_is_invalid() {
        let provider = LlmContentProvider::new(Arc::new(MockLlm::new("I'd rather not.")));
        let err = provider.evaluate_choice(evaluation_context()).await.unwrap_err();
        assert!(matches!(err, ContentError::InvalidResponse(_)));
    }
}
