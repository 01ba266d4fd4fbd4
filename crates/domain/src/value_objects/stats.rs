//! Player stats value objects - the three bounded parenting counters.
//!
//! Every stat lives in `[STAT_MIN, STAT_MAX]`. Values coming from outside the
//! domain (including deltas proposed by generated content) are never rejected;
//! the resulting stat saturates at the boundary instead.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest value any stat can hold.
pub const STAT_MIN: i32 = 0;

/// Highest value any stat can hold.
pub const STAT_MAX: i32 = 100;

/// Bonding value for a freshly started session.
pub const INITIAL_BONDING: i32 = 50;

/// Resilience value for a freshly started session.
pub const INITIAL_RESILIENCE: i32 = 30;

/// Confidence value for a freshly started session.
pub const INITIAL_CONFIDENCE: i32 = 30;

fn clamp_stat(value: i64) -> i32 {
    // Bounds fit in i32, so the narrowing cast cannot truncate.
    value.clamp(STAT_MIN as i64, STAT_MAX as i64) as i32
}

/// The child's three development stats.
///
/// # Invariants
///
/// - `bonding`, `resilience` and `confidence` are each within `[0, 100]`
///   (enforced on construction and by [`PlayerStats::apply`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PlayerStats {
    bonding: i32,
    resilience: i32,
    confidence: i32,
}

impl PlayerStats {
    /// Build stats from raw values, clamping each into range.
    pub fn new(bonding: i32, resilience: i32, confidence: i32) -> Self {
        Self {
            bonding: clamp_stat(bonding as i64),
            resilience: clamp_stat(resilience as i64),
            confidence: clamp_stat(confidence as i64),
        }
    }

    /// Stats every new session starts with.
    pub fn initial() -> Self {
        Self::new(INITIAL_BONDING, INITIAL_RESILIENCE, INITIAL_CONFIDENCE)
    }

    #[inline]
    pub fn bonding(&self) -> i32 {
        self.bonding
    }

    #[inline]
    pub fn resilience(&self) -> i32 {
        self.resilience
    }

    #[inline]
    pub fn confidence(&self) -> i32 {
        self.confidence
    }

    /// Apply a delta, saturating each field at the stat bounds.
    ///
    /// Total over all inputs: the sum is computed in 64 bits so even
    /// `i32::MIN`/`i32::MAX` deltas clamp instead of overflowing.
    pub fn apply(self, delta: StatDelta) -> Self {
        Self {
            bonding: clamp_stat(self.bonding as i64 + delta.bonding as i64),
            resilience: clamp_stat(self.resilience as i64 + delta.resilience as i64),
            confidence: clamp_stat(self.confidence as i64 + delta.confidence as i64),
        }
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for PlayerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bonding({}), Resilience({}), Confidence({})",
            self.bonding, self.resilience, self.confidence
        )
    }
}

/// Free-function form of [`PlayerStats::apply`].
pub fn apply_delta(current: PlayerStats, delta: StatDelta) -> PlayerStats {
    current.apply(delta)
}

/// Change to each stat proposed by one outcome.
///
/// Content sources are asked to keep each component within `[-10, 10]`, but
/// any integer is accepted here; clamping happens on the resulting stat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatDelta {
    pub bonding: i32,
    pub resilience: i32,
    pub confidence: i32,
}

impl StatDelta {
    pub fn new(bonding: i32, resilience: i32, confidence: i32) -> Self {
        Self {
            bonding,
            resilience,
            confidence,
        }
    }

    /// A delta that changes nothing.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.bonding == 0 && self.resilience == 0 && self.confidence == 0
    }
}
