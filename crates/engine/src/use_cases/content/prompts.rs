//! Prompt text for scenario generation and choice evaluation.

use crate::infrastructure::ports::{EvaluationContext, ScenarioContext};

/// All player-facing text is generated in this language.
pub const OUTPUT_LANGUAGE: &str = "Simplified Chinese (zh-CN)";

pub fn scenario_system_prompt() -> String {
    format!(
        r#"You are a parenting simulation engine. You write short, realistic moments from family life that require a response from the parent.

RULES:
1. The situation must fit the child's age and developmental stage.
2. Offer exactly 3 distinct choices, each reflecting a different parenting style (e.g. Empathetic, Authoritarian, Permissive, Authoritative, Neglectful).
3. The "Empathetic" choice should not always be the obvious answer. Sometimes firmness is needed for safety, although empathy usually helps bonding.
4. "context" is hidden from the player: the child's real feelings or the truth behind the situation.
5. "childDialogue" is something the child says out loud in the moment, or an empty string if the child says nothing.
6. Write all player-facing text in {language}. Keep JSON keys and "style" values in English.

You MUST respond with a single JSON object in EXACTLY this shape:
{{
  "title": "A short title for the event",
  "description": "The detailed situation facing the parent",
  "childDialogue": "What the child says, or an empty string",
  "emotion": "The child's emotion in one word",
  "context": "Hidden truth behind the situation",
  "choices": [
    {{ "id": "1", "text": "What the parent says or does", "style": "Empathetic" }}
  ]
}}

Do not include any text outside the JSON object."#,
        language = OUTPUT_LANGUAGE
    )
}

pub fn scenario_user_message(context: &ScenarioContext) -> String {
    format!(
        r#"## Child
Name: {name}
Gender: {gender}
Age: {age}
Stage: {stage}

## Current Stats
{stats}

## Focus Areas for This Stage
{focus}

Generate the next parenting scenario and respond with the JSON format specified."#,
        name = context.child_name,
        gender = context.gender,
        age = context.age,
        stage = context.stage.display_name(),
        stats = context.stats,
        focus = context.stage.focus_areas(),
    )
}

pub fn evaluation_system_prompt() -> String {
    format!(
        r#"You are a child psychologist reviewing a parent's response inside a parenting simulation.

Evaluate the parent's choice:
1. How does the child react immediately?
2. How does this affect the child's long-term growth? Express it as stat changes between -10 and 10 for bonding, resilience and confidence.
3. Give expert parenting advice ("feedback") explaining the psychology behind the reaction. If the parent chose poorly, explain gently why. If they chose well, reinforce why it works. For example, if the child is silent about school and the parent asks "Did you win?", explain why "You look tired" might have been better.

Write all player-facing text in {language}. Keep JSON keys in English.

You MUST respond with a single JSON object in EXACTLY this shape:
{{
  "narrative": "What happens immediately after the parent's choice",
  "childReaction": "Visible description of the child's reaction",
  "childDialogue": "What the child says, or an empty string",
  "emotion": "The child's emotion in one word",
  "feedback": "Parenting analysis and advice",
  "statChanges": {{ "bonding": 0, "resilience": 0, "confidence": 0 }}
}}

Do not include any text outside the JSON object."#,
        language = OUTPUT_LANGUAGE
    )
}

pub fn evaluation_user_message(context: &EvaluationContext) -> String {
    let style = context
        .chosen_style
        .as_ref()
        .map(|s| s.as_str())
        .unwrap_or("none");
    format!(
        r#"## Hidden Context
{hidden}

## Situation
{situation}

## Child
{name} ({age} years old)

## Parent's Choice
"{choice}" (Style: {style})

Evaluate this choice and respond with the JSON format specified."#,
        hidden = context.scenario_context,
        situation = context.scenario_description,
        name = context.child_name,
        age = context.age.years(),
        choice = context.chosen_text,
        style = style,
    )
}
