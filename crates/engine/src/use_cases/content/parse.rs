//! Decoding model output into scenarios and outcomes.

use growtogether_domain::{
    ChildLine, Choice, Outcome, ParentingStyle, Scenario, ScenarioId, StatDelta,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::infrastructure::ports::ContentError;

/// Extract JSON from a response that might have markdown code blocks or extra text.
pub fn extract_json(response: &str) -> &str {
    if let Some(start) = response.find("```json") {
        if let Some(end) = response[start + 7..].find("```") {
            return response[start + 7..start + 7 + end].trim();
        }
    }

    if let Some(start) = response.find("```") {
        if let Some(end) = response[start + 3..].find("```") {
            let content = response[start + 3..start + 3 + end].trim();
            // Skip language identifier if present
            if let Some(newline_pos) = content.find('\n') {
                if !content[..newline_pos].starts_with('{') {
                    return content[newline_pos + 1..].trim();
                }
            }
            return content;
        }
    }

    if let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) {
        if start < end {
            return &response[start..=end];
        }
    }

    response.trim()
}

fn decode<T: DeserializeOwned>(response: &str, what: &str) -> Result<T, ContentError> {
    serde_json::from_str(extract_json(response)).map_err(|e| {
        tracing::warn!(error = %e, response = %response, "Failed to parse {} JSON", what);
        ContentError::invalid(format!("Invalid {} JSON: {}", what, e))
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedScenario {
    title: String,
    description: String,
    #[serde(default)]
    child_dialogue: Option<String>,
    #[serde(default)]
    emotion: Option<String>,
    context: String,
    choices: Vec<GeneratedChoice>,
}

#[derive(Debug, Deserialize)]
struct GeneratedChoice {
    #[serde(default)]
    id: Option<ChoiceKey>,
    text: String,
    #[serde(default)]
    style: String,
}

/// Models sometimes number choices instead of quoting the id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChoiceKey {
    Text(String),
    Number(i64),
}

impl ChoiceKey {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedOutcome {
    narrative: String,
    child_reaction: String,
    #[serde(default)]
    child_dialogue: Option<String>,
    #[serde(default)]
    emotion: Option<String>,
    feedback: String,
    stat_changes: StatDelta,
}

/// Decode a scenario. The id is assigned locally.
pub fn parse_scenario(response: &str, id: ScenarioId) -> Result<Scenario, ContentError> {
    let generated: GeneratedScenario = decode(response, "scenario")?;

    let mut choices: Vec<Choice> = Vec::with_capacity(generated.choices.len());
    for (index, choice) in generated.choices.into_iter().enumerate() {
        let base = choice
            .id
            .map(ChoiceKey::into_string)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| (index + 1).to_string());
        let id = unique_choice_id(&choices, base, index + 1);
        choices.push(Choice::new(id, choice.text, ParentingStyle::parse(&choice.style)));
    }

    let child_line = generated
        .child_dialogue
        .and_then(|text| ChildLine::new(text, generated.emotion));

    Scenario::new(
        id,
        generated.title,
        generated.description,
        generated.context,
        choices,
    )
    .map(|s| s.with_child_line(child_line))
    .map_err(|e| ContentError::invalid(e.to_string()))
}

/// `base`, or `base-{position}` (then `-2`, `-3`, ...) until no offered choice has it.
fn unique_choice_id(choices: &[Choice], base: String, position: usize) -> String {
    let taken = |id: &str| choices.iter().any(|c| c.id == id);
    if !taken(&base) {
        return base;
    }
    let mut candidate = format!("{}-{}", base, position);
    let mut attempt = 2;
    while taken(&candidate) {
        candidate = format!("{}-{}-{}", base, position, attempt);
        attempt += 1;
    }
    candidate
}

/// Decode an outcome. Stat changes are taken as-is; the stat model clamps.
pub fn parse_outcome(response: &str) -> Result<Outcome, ContentError> {
    let generated: GeneratedOutcome = decode(response, "outcome")?;

    let child_line = generated
        .child_dialogue
        .and_then(|text| ChildLine::new(text, generated.emotion));

    Ok(Outcome::new(
        generated.narrative,
        generated.child_reaction,
        generated.feedback,
        generated.stat_changes,
    )
    .with_child_line(child_line))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"{
        "title": "放学后的沉默",
        "description": "孩子回家后一言不发。",
        "childDialogue": "别问了。",
        "emotion": "sad",
        "context": "他今天赛跑输了。",
        "choices": [
            {"id": "1", "text": "你看起来很累,要吃点东西吗?", "style": "Empathetic"},
            {"id": 2, "text": "赢了吗?", "style": "Authoritarian"},
            {"text": "随他去吧。", "style": "Laissez-faire"}
        ]
    }"#;

    #[test]
    fn extract_json_from_markdown_block() {
        let response = "Here you go:\n```json\n{\"a\": 1}\n```\nThanks";
        assert_eq!(extract_json(response), "{\"a\": 1}");
    }

    #[test]
    fn extract_json_from_plain_block_with_language() {
        let response = "```javascript\n{\"a\": 1}\n```";
        assert_eq!(extract_json(response), "{\"a\": 1}");
    }

    #[test]
    fn extract_json_from_surrounding_prose() {
        assert_eq!(extract_json("Sure! {\"a\": {\"b\": 2}} done"), "{\"a\": {\"b\": 2}}");
        assert_eq!(extract_json("  no json  "), "no json");
    }

    #[test]
    fn scenario_fields_are_mapped() {
        let id = ScenarioId::new();
        let scenario = parse_scenario(SCENARIO, id).unwrap();
        assert_eq!(scenario.id(), id);
        assert_eq!(scenario.title(), "放学后的沉默");
        assert_eq!(scenario.context(), "他今天赛跑输了。");
        let line = scenario.child_line().unwrap();
        assert_eq!(line.text, "别问了。");
        assert_eq!(line.emotion.as_deref(), Some("sad"));

        let ids: Vec<&str> = scenario.choices().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert_eq!(scenario.choices()[0].style, ParentingStyle::Empathetic);
        assert_eq!(
            scenario.choices()[2].style,
            ParentingStyle::Other("Laissez-faire".to_string())
        );
    }

    #[test]
    fn duplicate_choice_ids_are_disambiguated() {
        let response = r#"{"title": "t", "description": "d", "context": "c",
            "choices": [{"id": "a", "text": "x", "style": "Permissive"},
                        {"id": "a", "text": "y", "style": "Permissive"}]}"#;
        let scenario = parse_scenario(response, ScenarioId::new()).unwrap();
        assert_eq!(scenario.choices()[1].id, "a-2");
        assert_eq!(scenario.find_choice("a-2").unwrap().text, "y");
    }

    #[test]
    fn disambiguated_ids_do_not_collide_with_offered_ones() {
        let response = r#"{"title": "t", "description": "d", "context": "c",
            "choices": [{"id": "x", "text": "first", "style": "Permissive"},
                        {"id": "x-3", "text": "second", "style": "Permissive"},
                        {"id": "x", "text": "third", "style": "Permissive"},
                        {"id": "x-3", "text": "fourth", "style": "Permissive"}]}"#;
        let scenario = parse_scenario(response, ScenarioId::new()).unwrap();

        let ids: Vec<&str> = scenario.choices().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["x", "x-3", "x-3-2", "x-3-4"]);
        assert_eq!(scenario.find_choice("x-3-2").unwrap().text, "third");
        assert_eq!(scenario.find_choice("x-3").unwrap().text, "second");
    }

    #[test]
    fn scenario_without_choices_is_invalid() {
        let response = r#"{"title": "t", "description": "d", "context": "c", "choices": []}"#;
        let err = parse_scenario(response, ScenarioId::new()).unwrap_err();
        assert!(matches!(err, ContentError::InvalidResponse(_)));
    }

    #[test]
    fn scenario_missing_required_field_is_invalid() {
        let response = r#"{"title": "t", "description": "d", "choices": []}"#;
        assert!(parse_scenario(response, ScenarioId::new()).is_err());
    }

    #[test]
    fn outcome_passes_stat_changes_through() {
        let response = r#"```json
{
  "narrative": "他慢慢开口了。",
  "childReaction": "肩膀放松下来。",
  "childDialogue": "",
  "feedback": "共情先于提问。",
  "statChanges": {"bonding": 25, "resilience": -3, "confidence": 0}
}
```"#;
        let outcome = parse_outcome(response).unwrap();
        assert_eq!(outcome.stat_changes, StatDelta::new(25, -3, 0));
        assert_eq!(outcome.child_line, None);
        assert_eq!(outcome.feedback, "共情先于提问。");
    }

    #[test]
    fn outcome_without_stat_changes_is_invalid() {
        let response = r#"{"narrative": "n", "childReaction": "r", "feedback": "f"}"#;
        assert!(matches!(
            parse_outcome(response).unwrap_err(),
            ContentError::InvalidResponse(_)
        ));
    }
}
