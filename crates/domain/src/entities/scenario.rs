//! Scenario entity - one parenting situation awaiting the player's response.
//!
//! Scenarios are produced by the content provider and consumed as-is; the
//! domain only guarantees that at least one choice is present.

use crate::error::DomainError;
use crate::ids::ScenarioId;
use crate::value_objects::ParentingStyle;

/// Text used when the player's choice cannot be matched to an offered option.
pub const SILENT_OBSERVATION: &str = "Silent observation";

/// Something the child says out loud, with an optional emotion tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildLine {
    pub text: String,
    pub emotion: Option<String>,
}

impl ChildLine {
    /// Build a line, returning `None` when the text is blank.
    pub fn new(text: impl Into<String>, emotion: Option<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        let emotion = emotion.filter(|e| !e.trim().is_empty());
        Some(Self { text, emotion })
    }
}

/// One response the parent may give.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub id: String,
    pub text: String,
    pub style: ParentingStyle,
}

impl Choice {
    pub fn new(id: impl Into<String>, text: impl Into<String>, style: ParentingStyle) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            style,
        }
    }
}

/// The response actually evaluated for a turn.
///
/// When the requested choice id is not among the offered choices this is a
/// neutral "silent observation" with no id and no style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedChoice {
    pub choice_id: Option<String>,
    pub text: String,
    pub style: Option<ParentingStyle>,
}

impl SelectedChoice {
    pub fn neutral() -> Self {
        Self {
            choice_id: None,
            text: SILENT_OBSERVATION.to_string(),
            style: None,
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.choice_id.is_none()
    }
}

impl From<&Choice> for SelectedChoice {
    fn from(choice: &Choice) -> Self {
        Self {
            choice_id: Some(choice.id.clone()),
            text: choice.text.clone(),
            style: Some(choice.style.clone()),
        }
    }
}

/// A generated parenting situation.
///
/// # Invariants
///
/// - `choices` is never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    id: ScenarioId,
    title: String,
    description: String,
    child_line: Option<ChildLine>,
    /// Hidden context passed back verbatim when evaluating the choice
    context: String,
    choices: Vec<Choice>,
}

impl Scenario {
    /// Create a scenario.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `choices` is empty.
    pub fn new(
        id: ScenarioId,
        title: impl Into<String>,
        description: impl Into<String>,
        context: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Result<Self, DomainError> {
        if choices.is_empty() {
            return Err(DomainError::validation("Scenario must offer at least one choice"));
        }
        Ok(Self {
            id,
            title: title.into(),
            description: description.into(),
            child_line: None,
            context: context.into(),
            choices,
        })
    }

    pub fn with_child_line(mut self, line: Option<ChildLine>) -> Self {
        self.child_line = line;
        self
    }

    #[inline]
    pub fn id(&self) -> ScenarioId {
        self.id
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn child_line(&self) -> Option<&ChildLine> {
        self.child_line.as_ref()
    }

    #[inline]
    pub fn context(&self) -> &str {
        &self.context
    }

    #[inline]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Find the offered choice with this id.
    pub fn find_choice(&self, choice_id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == choice_id)
    }

    /// Resolve the player's selection, degrading to a neutral choice when the
    /// id is not offered.
    pub fn resolve_choice(&self, choice_id: &str) -> SelectedChoice {
        self.find_choice(choice_id)
            .map(SelectedChoice::from)
            .unwrap_or_else(SelectedChoice::neutral)
    }
}
