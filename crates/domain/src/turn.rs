//! Turn phase state machine.
//!
//! A turn moves `AwaitingScenario -> PresentingScenario -> AwaitingOutcome ->
//! PresentingOutcome` and then loops back to `AwaitingScenario`, or stops at
//! `Terminal` once the child is an adult. Transitions attempted from the wrong
//! phase fail and leave the state untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::{Outcome, Scenario};
use crate::error::DomainError;
use crate::value_objects::LifeStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    /// Waiting for a scenario to be generated
    AwaitingScenario,
    /// Scenario is shown, waiting for the player's choice
    PresentingScenario,
    /// Choice submitted, waiting for its evaluation
    AwaitingOutcome,
    /// Outcome is shown, waiting for the player to continue
    PresentingOutcome,
    /// The child is an adult; no more turns
    Terminal,
}

impl TurnPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingScenario => "awaiting_scenario",
            Self::PresentingScenario => "presenting_scenario",
            Self::AwaitingOutcome => "awaiting_outcome",
            Self::PresentingOutcome => "presenting_outcome",
            Self::Terminal => "terminal",
        }
    }
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Phase plus the scenario and outcome active in the current turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnState {
    phase: TurnPhase,
    scenario: Option<Scenario>,
    outcome: Option<Outcome>,
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnState {
    /// State for a freshly started session.
    pub fn new() -> Self {
        Self {
            phase: TurnPhase::AwaitingScenario,
            scenario: None,
            outcome: None,
        }
    }

    #[inline]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[inline]
    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }

    #[inline]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == TurnPhase::Terminal
    }

    fn expect_phase(&self, expected: TurnPhase, action: &str) -> Result<(), DomainError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(DomainError::invalid_state_transition(format!(
                "cannot {} while {} (expected {})",
                action, self.phase, expected
            )))
        }
    }

    /// A generated scenario arrived.
    pub fn scenario_ready(&mut self, scenario: Scenario) -> Result<(), DomainError> {
        self.expect_phase(TurnPhase::AwaitingScenario, "present a scenario")?;
        self.scenario = Some(scenario);
        self.outcome = None;
        self.phase = TurnPhase::PresentingScenario;
        Ok(())
    }

    /// The player submitted a choice; its evaluation is now pending.
    pub fn begin_evaluation(&mut self) -> Result<&Scenario, DomainError> {
        self.expect_phase(TurnPhase::PresentingScenario, "submit a choice")?;
        let scenario = self.scenario.as_ref().ok_or_else(|| {
            DomainError::invalid_state_transition("no scenario is being presented")
        })?;
        self.phase = TurnPhase::AwaitingOutcome;
        Ok(scenario)
    }

    /// Evaluation failed; the same scenario is presented again for retry.
    pub fn evaluation_failed(&mut self) -> Result<(), DomainError> {
        self.expect_phase(TurnPhase::AwaitingOutcome, "abandon an evaluation")?;
        self.phase = TurnPhase::PresentingScenario;
        Ok(())
    }

    /// The evaluated outcome arrived.
    pub fn outcome_ready(&mut self, outcome: Outcome) -> Result<(), DomainError> {
        self.expect_phase(TurnPhase::AwaitingOutcome, "present an outcome")?;
        self.outcome = Some(outcome);
        self.phase = TurnPhase::PresentingOutcome;
        Ok(())
    }

    /// Close the turn. `stage` is the stage after aging the child.
    pub fn finish(&mut self, stage: LifeStage) -> Result<TurnPhase, DomainError> {
        self.expect_phase(TurnPhase::PresentingOutcome, "complete the turn")?;
        self.scenario = None;
        self.outcome = None;
        self.phase = if stage.is_terminal() {
            TurnPhase::Terminal
        } else {
            TurnPhase::AwaitingScenario
        };
        Ok(self.phase)
    }
}
