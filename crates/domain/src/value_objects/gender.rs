//! Child gender value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The simulated child's gender, chosen once at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildGender {
    Boy,
    Girl,
}

impl ChildGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boy => "boy",
            Self::Girl => "girl",
        }
    }
}

impl fmt::Display for ChildGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
