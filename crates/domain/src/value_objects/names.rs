//! Validated name newtypes for the people in a session
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length (in characters) for player and child names
const MAX_NAME_LENGTH: usize = 100;

fn validate_name(kind: &str, name: String) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", kind)));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters",
            kind, MAX_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// PlayerName
// ============================================================================

/// How the parent wants to be addressed (non-empty, <=100 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    /// Create a new validated player name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is empty after trimming
    /// or longer than 100 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        validate_name("Player name", name.into()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PlayerName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> String {
        name.0
    }
}

// ============================================================================
// ChildName
// ============================================================================

/// The simulated child's name (non-empty, <=100 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChildName(String);

impl ChildName {
    /// Create a new validated child name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is empty after trimming
    /// or longer than 100 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        validate_name("Child name", name.into()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChildName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ChildName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ChildName> for String {
    fn from(name: ChildName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed() {
        let name = ChildName::new("  Charlie ").unwrap();
        assert_eq!(name.as_str(), "Charlie");
        assert_eq!(name.to_string(), "Charlie");
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(PlayerName::new("").is_err());
        assert!(PlayerName::new("   ").is_err());
        assert!(ChildName::new("\t\n").is_err());
    }

    #[test]
    fn length_limit_counts_characters_not_bytes() {
        let cjk = "小".repeat(MAX_NAME_LENGTH);
        assert!(ChildName::new(cjk.clone()).is_ok());
        assert!(ChildName::new(format!("{}小", cjk)).is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: PlayerName = serde_json::from_str("\"Mom\"").unwrap();
        assert_eq!(ok.as_str(), "Mom");
        assert!(serde_json::from_str::<PlayerName>("\"  \"").is_err());
    }
}
