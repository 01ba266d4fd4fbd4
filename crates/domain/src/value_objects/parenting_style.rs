//! Parenting style tags attached to scenario choices.
//!
//! Styles come from generated content and are not validated: labels outside
//! the known taxonomy are kept verbatim in [`ParentingStyle::Other`].

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParentingStyle {
    /// Warm but firm: clear limits with explanation
    Authoritative,
    /// Strict, obedience-first
    Authoritarian,
    /// Warm with few limits
    Permissive,
    /// Disengaged or dismissive
    Neglectful,
    /// Leads with the child's feelings
    Empathetic,
    /// Any label outside the known taxonomy, kept as received
    Other(String),
}

impl ParentingStyle {
    /// Parse a label, falling back to `Other` for anything unrecognised.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "authoritative" => Self::Authoritative,
            "authoritarian" => Self::Authoritarian,
            "permissive" => Self::Permissive,
            "neglectful" => Self::Neglectful,
            "empathetic" => Self::Empathetic,
            _ => Self::Other(label.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Authoritative => "Authoritative",
            Self::Authoritarian => "Authoritarian",
            Self::Permissive => "Permissive",
            Self::Neglectful => "Neglectful",
            Self::Empathetic => "Empathetic",
            Self::Other(label) => label,
        }
    }

    /// Whether the label belongs to the known taxonomy.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for ParentingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for ParentingStyle {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<ParentingStyle> for String {
    fn from(style: ParentingStyle) -> String {
        match style {
            ParentingStyle::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}
