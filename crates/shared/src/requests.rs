//! Request bodies sent by Presentation clients.

use serde::{Deserialize, Serialize};

use growtogether_domain::ChildGender;

/// Body of `POST /api/session` - begins a new journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartSessionRequest {
    /// How the parent wants to be addressed
    pub player_name: String,
    pub child_name: String,
    pub child_gender: ChildGender,
}

/// Body of `POST /api/session/choice`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChooseRequest {
    pub choice_id: String,
}
