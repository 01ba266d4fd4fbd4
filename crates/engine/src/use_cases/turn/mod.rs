//! Turn sequencing for the active game session.
//!
//! The controller owns the single active [`GameSession`] and its
//! [`TurnState`]. Content requests run with the lock released; at most one is
//! in flight, and a response that comes back after the session was replaced
//! is discarded instead of being written into the new session.
//!
//! Each request is settled on its own task. A caller that stops waiting (a
//! dropped HTTP handler, a timeout) does not leave the session marked busy.

use std::sync::Arc;

use growtogether_domain::{
    ChildGender, ChildLine, ChildName, DomainError, GameSession, Outcome, PlayerName, Scenario,
    SessionId, TurnPhase, TurnState,
};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::infrastructure::ports::{
    ClockPort, ContentError, ContentProvider, EvaluationContext, ScenarioContext, VoiceLine,
    VoicePort,
};
use crate::use_cases::voice::VoiceNarrator;

pub const SCENARIO_FAILED_MESSAGE: &str = "Failed to generate scenario. Please try again.";
pub const EVALUATION_FAILED_MESSAGE: &str = "Failed to evaluate response. Please try again.";

/// Which content request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Scenario,
    Evaluation,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scenario => "scenario",
            Self::Evaluation => "evaluation",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("No active session")]
    NoSession,
    #[error("A {} request is already in progress", .0.as_str())]
    RequestInFlight(RequestKind),
    #[error("The session was replaced while the request was in progress")]
    Superseded,
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Retryable; `message` is safe to show to the player.
    #[error("{message}")]
    Content {
        message: &'static str,
        #[source]
        source: ContentError,
    },
}

/// Read-only copy of the controller state for presentation.
#[derive(Debug, Clone, Default)]
pub struct TurnSnapshot {
    pub session: Option<GameSession>,
    pub turn: Option<TurnState>,
    pub busy: Option<RequestKind>,
    pub last_error: Option<String>,
}

struct ActiveSession {
    session: GameSession,
    turn: TurnState,
    in_flight: Option<RequestKind>,
}

impl ActiveSession {
    fn ensure_idle(&self) -> Result<(), TurnError> {
        match self.in_flight {
            Some(kind) => Err(TurnError::RequestInFlight(kind)),
            None => Ok(()),
        }
    }

    fn ensure_phase(&self, expected: TurnPhase, action: &str) -> Result<(), TurnError> {
        if self.turn.phase() == expected {
            Ok(())
        } else {
            Err(DomainError::invalid_state_transition(format!(
                "cannot {} while {}",
                action,
                self.turn.phase()
            ))
            .into())
        }
    }
}

#[derive(Default)]
struct ControllerState {
    active: Option<ActiveSession>,
    last_error: Option<String>,
}

/// The session a response belongs to, unless it has been replaced meanwhile.
fn still_active(
    active: &mut Option<ActiveSession>,
    session_id: SessionId,
    kind: RequestKind,
) -> Result<&mut ActiveSession, TurnError> {
    match active {
        Some(current) if current.session.id() == session_id => Ok(current),
        _ => {
            tracing::info!(
                session_id = %session_id,
                request = kind.as_str(),
                "Discarding response for a session that is no longer active"
            );
            Err(TurnError::Superseded)
        }
    }
}

/// Wait for a content call, turning a panicked or cancelled task into a failure.
async fn join_content<T>(call: JoinHandle<Result<T, ContentError>>) -> Result<T, ContentError> {
    call.await.unwrap_or_else(|e| Err(ContentError::Aborted(e.to_string())))
}

/// Wait for a request to settle.
async fn join_settled(
    settle: JoinHandle<Result<(), TurnError>>,
    message: &'static str,
) -> Result<(), TurnError> {
    settle.await.unwrap_or_else(|e| {
        Err(TurnError::Content {
            message,
            source: ContentError::Aborted(e.to_string()),
        })
    })
}

fn narrate(narrator: &VoiceNarrator, session: &GameSession, line: Option<ChildLine>) {
    if let Some(line) = line {
        narrator.narrate(VoiceLine {
            text: line.text,
            age: session.age(),
            gender: session.child_gender(),
            emotion: line.emotion,
        });
    }
}

async fn settle_scenario(
    state: &RwLock<ControllerState>,
    narrator: &VoiceNarrator,
    session_id: SessionId,
    result: Result<Scenario, ContentError>,
) -> Result<(), TurnError> {
    let mut guard = state.write().await;
    let state = &mut *guard;
    let active = still_active(&mut state.active, session_id, RequestKind::Scenario)?;
    active.in_flight = None;

    match result {
        Ok(scenario) => {
            let line = scenario.child_line().cloned();
            active.turn.scenario_ready(scenario)?;
            state.last_error = None;
            narrate(narrator, &active.session, line);
            Ok(())
        }
        Err(e) => {
            tracing::warn!(session_id = %session_id, error = %e, "Scenario generation failed");
            state.last_error = Some(SCENARIO_FAILED_MESSAGE.to_string());
            Err(TurnError::Content {
                message: SCENARIO_FAILED_MESSAGE,
                source: e,
            })
        }
    }
}

async fn settle_evaluation(
    state: &RwLock<ControllerState>,
    narrator: &VoiceNarrator,
    session_id: SessionId,
    title: &str,
    result: Result<Outcome, ContentError>,
) -> Result<(), TurnError> {
    let mut guard = state.write().await;
    let state = &mut *guard;
    let active = still_active(&mut state.active, session_id, RequestKind::Evaluation)?;
    active.in_flight = None;

    match result {
        Ok(outcome) => {
            let delta = outcome.stat_changes;
            let line = outcome.child_line.clone();
            active.turn.outcome_ready(outcome)?;
            let entry = active.session.record_outcome(title, delta).to_string();
            tracing::info!(
                session_id = %session_id,
                entry = %entry,
                stats = %active.session.stats(),
                "Outcome applied"
            );
            state.last_error = None;
            narrate(narrator, &active.session, line);
            Ok(())
        }
        Err(e) => {
            active.turn.evaluation_failed()?;
            tracing::warn!(session_id = %session_id, error = %e, "Choice evaluation failed");
            state.last_error = Some(EVALUATION_FAILED_MESSAGE.to_string());
            Err(TurnError::Content {
                message: EVALUATION_FAILED_MESSAGE,
                source: e,
            })
        }
    }
}

pub struct TurnController {
    content: Arc<dyn ContentProvider>,
    narrator: VoiceNarrator,
    clock: Arc<dyn ClockPort>,
    state: Arc<RwLock<ControllerState>>,
}

impl TurnController {
    pub fn new(
        content: Arc<dyn ContentProvider>,
        voice: Arc<dyn VoicePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            content,
            narrator: VoiceNarrator::new(voice),
            clock,
            state: Arc::new(RwLock::new(ControllerState::default())),
        }
    }

    // =========================================================================
    // Presentation intents
    // =========================================================================

    /// Start a new session and ask for its first scenario.
    pub async fn start(
        &self,
        player_name: &str,
        child_name: &str,
        child_gender: ChildGender,
    ) -> Result<SessionId, TurnError> {
        let session_id = self
            .start_session(player_name, child_name, child_gender)
            .await?;
        self.request_scenario().await?;
        Ok(session_id)
    }

    /// Close the current turn and, unless the journey is over, ask for the next scenario.
    pub async fn next(&self) -> Result<TurnPhase, TurnError> {
        let phase = self.complete_turn().await?;
        if phase == TurnPhase::AwaitingScenario {
            self.request_scenario().await?;
            return Ok(TurnPhase::PresentingScenario);
        }
        Ok(phase)
    }

    // =========================================================================
    // Turn operations
    // =========================================================================

    /// Replace any existing session with a fresh one for a newborn.
    pub async fn start_session(
        &self,
        player_name: &str,
        child_name: &str,
        child_gender: ChildGender,
    ) -> Result<SessionId, TurnError> {
        let player_name = PlayerName::new(player_name)?;
        let child_name = ChildName::new(child_name)?;
        let session = GameSession::start(player_name, child_name, child_gender, self.clock.now());
        let session_id = session.id();

        let mut state = self.state.write().await;
        if let Some(previous) = &state.active {
            tracing::info!(previous = %previous.session.id(), "Replacing active session");
        }
        tracing::info!(
            session_id = %session_id,
            child = %session.child_name(),
            gender = %child_gender,
            "Session started"
        );
        state.active = Some(ActiveSession {
            session,
            turn: TurnState::new(),
            in_flight: None,
        });
        state.last_error = None;

        Ok(session_id)
    }

    /// Ask the content provider for the scenario of the current turn.
    pub async fn request_scenario(&self) -> Result<(), TurnError> {
        let (session_id, context) = {
            let mut state = self.state.write().await;
            let active = state.active.as_mut().ok_or(TurnError::NoSession)?;
            active.ensure_idle()?;
            active.ensure_phase(TurnPhase::AwaitingScenario, "request a scenario")?;
            active.in_flight = Some(RequestKind::Scenario);
            (
                active.session.id(),
                ScenarioContext::from_session(&active.session),
            )
        };

        tracing::debug!(
            session_id = %session_id,
            age = context.age.years(),
            stage = %context.stage,
            "Requesting scenario"
        );
        let content = Arc::clone(&self.content);
        let call = tokio::spawn(async move { content.generate_scenario(context).await });

        let state = Arc::clone(&self.state);
        let narrator = self.narrator.clone();
        let settle = tokio::spawn(async move {
            let result = join_content(call).await;
            settle_scenario(&state, &narrator, session_id, result).await
        });
        join_settled(settle, SCENARIO_FAILED_MESSAGE).await
    }

    /// Submit the player's response to the presented scenario.
    ///
    /// An id that is not among the offered choices is evaluated as a silent
    /// observation rather than rejected.
    pub async fn submit_choice(&self, choice_id: &str) -> Result<(), TurnError> {
        let (session_id, context, title) = {
            let mut state = self.state.write().await;
            let active = state.active.as_mut().ok_or(TurnError::NoSession)?;
            active.ensure_idle()?;
            let scenario = active.turn.begin_evaluation()?;
            let selected = scenario.resolve_choice(choice_id);
            if selected.is_neutral() {
                tracing::warn!(choice_id, "Choice not offered, evaluating as silent observation");
            }
            let context = EvaluationContext::new(&active.session, scenario, &selected);
            let title = scenario.title().to_string();
            active.in_flight = Some(RequestKind::Evaluation);
            (active.session.id(), context, title)
        };

        tracing::debug!(session_id = %session_id, choice_id, "Evaluating choice");
        let content = Arc::clone(&self.content);
        let call = tokio::spawn(async move { content.evaluate_choice(context).await });

        let state = Arc::clone(&self.state);
        let narrator = self.narrator.clone();
        let settle = tokio::spawn(async move {
            let result = join_content(call).await;
            settle_evaluation(&state, &narrator, session_id, &title, result).await
        });
        join_settled(settle, EVALUATION_FAILED_MESSAGE).await
    }

    /// Age the child after the outcome has been shown.
    pub async fn complete_turn(&self) -> Result<TurnPhase, TurnError> {
        let mut state = self.state.write().await;
        let active = state.active.as_mut().ok_or(TurnError::NoSession)?;
        active.ensure_idle()?;
        active.ensure_phase(TurnPhase::PresentingOutcome, "complete the turn")?;

        let stage = active.session.advance();
        let phase = active.turn.finish(stage)?;

        tracing::info!(
            session_id = %active.session.id(),
            age = active.session.age().years(),
            stage = %stage,
            "Turn completed"
        );
        if phase == TurnPhase::Terminal {
            tracing::info!(
                session_id = %active.session.id(),
                turns = active.session.history().len(),
                "Journey complete"
            );
        }

        Ok(phase)
    }

    pub async fn snapshot(&self) -> TurnSnapshot {
        let state = self.state.read().await;
        match &state.active {
            Some(active) => TurnSnapshot {
                session: Some(active.session.clone()),
                turn: Some(active.turn.clone()),
                busy: active.in_flight,
                last_error: state.last_error.clone(),
            },
            None => TurnSnapshot {
                last_error: state.last_error.clone(),
                ..TurnSnapshot::default()
            },
        }
    }
}
