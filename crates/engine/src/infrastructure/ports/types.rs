//! Request payloads handed to external ports.

use growtogether_domain::{
    Age, ChildGender, GameSession, LifeStage, ParentingStyle, PlayerStats, Scenario,
    SelectedChoice,
};

/// Everything the content provider needs to invent the next scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioContext {
    pub child_name: String,
    pub age: Age,
    pub stage: LifeStage,
    pub gender: ChildGender,
    pub stats: PlayerStats,
}

impl ScenarioContext {
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            child_name: session.child_name().to_string(),
            age: session.age(),
            stage: session.stage(),
            gender: session.child_gender(),
            stats: session.stats(),
        }
    }
}

/// Everything the content provider needs to judge the parent's response.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationContext {
    /// Hidden context that came with the scenario
    pub scenario_context: String,
    pub scenario_description: String,
    pub child_name: String,
    pub age: Age,
    pub chosen_text: String,
    /// `None` when the choice could not be matched and a neutral one is used
    pub chosen_style: Option<ParentingStyle>,
}

impl EvaluationContext {
    pub fn new(session: &GameSession, scenario: &Scenario, selected: &SelectedChoice) -> Self {
        Self {
            scenario_context: scenario.context().to_string(),
            scenario_description: scenario.description().to_string(),
            child_name: session.child_name().to_string(),
            age: session.age(),
            chosen_text: selected.text.clone(),
            chosen_style: selected.style.clone(),
        }
    }
}

/// A line of child dialogue to be spoken aloud.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceLine {
    pub text: String,
    pub age: Age,
    pub gender: ChildGender,
    pub emotion: Option<String>,
}
