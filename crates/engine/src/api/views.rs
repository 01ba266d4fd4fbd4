//! Domain -> wire conversions for the presentation API.

use growtogether_domain::{ChildLine, GameSession, Outcome, PlayerStats, Scenario};
use growtogether_shared::{
    ChildLineView, ChoiceView, JourneySummary, OutcomeView, ScenarioView, SessionSnapshot,
    SessionView, StatsView,
};

use crate::use_cases::turn::TurnSnapshot;

pub fn stats_view(stats: PlayerStats) -> StatsView {
    StatsView {
        bonding: stats.bonding(),
        resilience: stats.resilience(),
        confidence: stats.confidence(),
    }
}

fn child_line_view(line: &ChildLine) -> ChildLineView {
    ChildLineView {
        text: line.text.clone(),
        emotion: line.emotion.clone(),
    }
}

pub fn session_view(session: &GameSession) -> SessionView {
    SessionView {
        session_id: session.id().to_uuid(),
        player_name: session.player_name().to_string(),
        child_name: session.child_name().to_string(),
        child_gender: session.child_gender(),
        age: session.age().years(),
        stage: session.stage(),
        stage_label: session.stage().display_name().to_string(),
        stats: stats_view(session.stats()),
        history: session.history().to_vec(),
        started_at: session.started_at().to_rfc3339(),
    }
}

/// Hidden context and choice styles stay server-side.
pub fn scenario_view(scenario: &Scenario) -> ScenarioView {
    ScenarioView {
        id: scenario.id().to_uuid(),
        title: scenario.title().to_string(),
        description: scenario.description().to_string(),
        child_line: scenario.child_line().map(child_line_view),
        choices: scenario
            .choices()
            .iter()
            .map(|c| ChoiceView {
                id: c.id.clone(),
                text: c.text.clone(),
            })
            .collect(),
    }
}

pub fn outcome_view(outcome: &Outcome) -> OutcomeView {
    OutcomeView {
        narrative: outcome.narrative.clone(),
        child_reaction: outcome.child_reaction.clone(),
        child_line: outcome.child_line.as_ref().map(child_line_view),
        feedback: outcome.feedback.clone(),
        stat_changes: outcome.stat_changes,
    }
}

pub fn snapshot_view(snapshot: &TurnSnapshot) -> SessionSnapshot {
    let turn = snapshot.turn.as_ref();
    let summary = match (&snapshot.session, turn) {
        (Some(session), Some(turn)) if turn.is_terminal() => Some(JourneySummary {
            child_name: session.child_name().to_string(),
            final_stats: stats_view(session.stats()),
            turns_completed: session.history().len(),
        }),
        _ => None,
    };

    SessionSnapshot {
        session: snapshot.session.as_ref().map(session_view),
        phase: turn.map(|t| t.phase()),
        scenario: turn.and_then(|t| t.scenario()).map(scenario_view),
        outcome: turn.and_then(|t| t.outcome()).map(outcome_view),
        busy: snapshot.busy.is_some(),
        error: snapshot.last_error.clone(),
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use growtogether_domain::{
        ChildGender, ChildName, Choice, ParentingStyle, PlayerName, ScenarioId, StatDelta,
        TurnState,
    };

    fn session() -> GameSession {
        GameSession::start(
            PlayerName::new("Mom").unwrap(),
            ChildName::new("Mia").unwrap(),
            ChildGender::Girl,
            Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        )
    }

    #[test]
    fn scenario_view_hides_context_and_styles() {
        let scenario = Scenario::new(
            ScenarioId::new(),
            "Lost toy",
            "Her bunny is missing.",
            "Her brother hid it.",
            vec![Choice::new("1", "Help her look", ParentingStyle::Empathetic)],
        )
        .unwrap();
        let json = serde_json::to_value(scenario_view(&scenario)).unwrap();
        assert!(json.get("context").is_none());
        assert!(json["choices"][0].get("style").is_none());
        assert_eq!(json["choices"][0]["text"], "Help her look");
        assert!(!json.to_string().contains("brother"));
    }

    #[test]
    fn session_view_has_stage_label_and_timestamp() {
        let view = session_view(&session());
        assert_eq!(view.age, 0);
        assert_eq!(view.stage_label, "Infant (0-1 yr)");
        assert_eq!(view.stats.bonding, 50);
        assert_eq!(view.started_at, "2025-01-02T03:04:05+00:00");
    }

    #[test]
    fn summary_only_when_terminal() {
        let mut s = session();
        let snapshot = TurnSnapshot {
            session: Some(s.clone()),
            turn: Some(TurnState::new()),
            busy: None,
            last_error: None,
        };
        assert!(snapshot_view(&snapshot).summary.is_none());

        let scenario = Scenario::new(
            ScenarioId::new(),
            "t",
            "d",
            "c",
            vec![Choice::new("1", "x", ParentingStyle::Permissive)],
        )
        .unwrap();
        let mut turn = TurnState::new();
        for _ in 0..18 {
            turn.scenario_ready(scenario.clone()).unwrap();
            turn.begin_evaluation().unwrap();
            turn.outcome_ready(Outcome::new("n", "r", "f", StatDelta::new(1, 0, 0)))
                .unwrap();
            s.record_outcome("t", StatDelta::new(1, 0, 0));
            turn.finish(s.advance()).unwrap();
        }

        let view = snapshot_view(&TurnSnapshot {
            session: Some(s),
            turn: Some(turn),
            busy: None,
            last_error: None,
        });
        let summary = view.summary.unwrap();
        assert_eq!(summary.turns_completed, 18);
        assert_eq!(summary.final_stats.bonding, 68);
        assert_eq!(view.phase, Some(growtogether_domain::TurnPhase::Terminal));
    }
}
