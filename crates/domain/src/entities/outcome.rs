//! Outcome entity - the evaluated result of the parent's choice.

use super::ChildLine;
use crate::value_objects::StatDelta;

/// What happened after the parent responded, plus the stat change it causes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Story progression immediately after the choice
    pub narrative: String,
    /// Visible description of the child's reaction
    pub child_reaction: String,
    pub child_line: Option<ChildLine>,
    /// Parenting analysis and advice
    pub feedback: String,
    pub stat_changes: StatDelta,
}

impl Outcome {
    pub fn new(
        narrative: impl Into<String>,
        child_reaction: impl Into<String>,
        feedback: impl Into<String>,
        stat_changes: StatDelta,
    ) -> Self {
        Self {
            narrative: narrative.into(),
            child_reaction: child_reaction.into(),
            child_line: None,
            feedback: feedback.into(),
            stat_changes,
        }
    }

    pub fn with_child_line(mut self, line: Option<ChildLine>) -> Self {
        self.child_line = line;
        self
    }
}
