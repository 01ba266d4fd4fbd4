//! Read-only views returned to Presentation clients.
//!
//! Views never expose a scenario's hidden context or a choice's style label
//! before it has been evaluated; everything else mirrors the session state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use growtogether_domain::{ChildGender, LifeStage, StatDelta, TurnPhase};

/// Current value of each stat, `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsView {
    pub bonding: i32,
    pub resilience: i32,
    pub confidence: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildLineView {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceView {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_line: Option<ChildLineView>,
    pub choices: Vec<ChoiceView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeView {
    pub narrative: String,
    pub child_reaction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_line: Option<ChildLineView>,
    pub feedback: String,
    pub stat_changes: StatDelta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub player_name: String,
    pub child_name: String,
    pub child_gender: ChildGender,
    pub age: u32,
    pub stage: LifeStage,
    /// Stage name with its age band, e.g. "Toddler (1-3 yrs)"
    pub stage_label: String,
    pub stats: StatsView,
    /// One entry per completed turn, oldest first
    pub history: Vec<String>,
    /// RFC 3339 timestamp
    pub started_at: String,
}

/// Shown once the child has grown up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneySummary {
    pub child_name: String,
    pub final_stats: StatsView,
    pub turns_completed: usize,
}

/// Everything Presentation needs to render the game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// `None` until a session has been started
    pub session: Option<SessionView>,
    pub phase: Option<TurnPhase>,
    pub scenario: Option<ScenarioView>,
    pub outcome: Option<OutcomeView>,
    /// A content request is in flight; actions should be disabled
    pub busy: bool,
    /// Last user-visible, retryable error
    pub error: Option<String>,
    pub summary: Option<JourneySummary>,
}

/// Body of every non-2xx API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
