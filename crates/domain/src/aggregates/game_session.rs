//! GameSession aggregate - one play-through from infancy to adulthood
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: identity is fixed at start, everything else changes
//!   only through turn operations
//! - **Newtypes**: `PlayerName` / `ChildName` are validated before they get here
//! - **Derived stage**: the life stage is always looked up from the age

use chrono::{DateTime, Utc};

use crate::ids::SessionId;
use crate::value_objects::{
    advance_turn, Age, ChildGender, ChildName, LifeStage, PlayerName, PlayerStats, StatDelta,
};

/// A single parenting journey.
///
/// # Invariants
///
/// - `stage()` always equals `LifeStage::for_age(age())`
/// - stats are always within `[0, 100]` (enforced by `PlayerStats`)
/// - `history` is append-only, one entry per completed turn
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use growtogether_domain::{ChildGender, ChildName, GameSession, LifeStage, PlayerName};
///
/// let session = GameSession::start(
///     PlayerName::new("Mom").unwrap(),
///     ChildName::new("Charlie").unwrap(),
///     ChildGender::Boy,
///     Utc::now(),
/// );
///
/// assert_eq!(session.age().years(), 0);
/// assert_eq!(session.stage(), LifeStage::Infant);
/// assert!(session.history().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    // Identity
    id: SessionId,
    player_name: PlayerName,
    child_name: ChildName,
    child_gender: ChildGender,

    // Progression
    age: Age,
    stats: PlayerStats,
    history: Vec<String>,

    // Metadata
    started_at: DateTime<Utc>,
}

impl GameSession {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Start a new session for a newborn with the initial stats.
    pub fn start(
        player_name: PlayerName,
        child_name: ChildName,
        child_gender: ChildGender,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SessionId::new(),
            player_name,
            child_name,
            child_gender,
            age: Age::newborn(),
            stats: PlayerStats::initial(),
            history: Vec::new(),
            started_at: now,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[inline]
    pub fn player_name(&self) -> &PlayerName {
        &self.player_name
    }

    #[inline]
    pub fn child_name(&self) -> &ChildName {
        &self.child_name
    }

    #[inline]
    pub fn child_gender(&self) -> ChildGender {
        self.child_gender
    }

    #[inline]
    pub fn age(&self) -> Age {
        self.age
    }

    /// Current life stage, derived from the age.
    #[inline]
    pub fn stage(&self) -> LifeStage {
        self.age.stage()
    }

    #[inline]
    pub fn stats(&self) -> PlayerStats {
        self.stats
    }

    /// Completed turns in order, formatted `"Age {age}: {title}"`.
    #[inline]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    #[inline]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Whether the child has reached adulthood.
    pub fn is_complete(&self) -> bool {
        self.stage().is_terminal()
    }

    // =========================================================================
    // Turn operations
    // =========================================================================

    /// Apply an outcome's stat change and log the turn under the current
    /// (pre-advance) age. Returns the new log entry.
    pub fn record_outcome(&mut self, scenario_title: &str, delta: StatDelta) -> &str {
        self.stats = self.stats.apply(delta);
        self.history
            .push(format!("Age {}: {}", self.age.years(), scenario_title));
        self.history.last().map(String::as_str).unwrap_or_default()
    }

    /// Age the child by one turn and return the resulting stage.
    pub fn advance(&mut self) -> LifeStage {
        let (age, stage) = advance_turn(self.age, self.stage());
        self.age = age;
        stage
    }
}
