//! Fundamental identity and classification types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_TIER, MIN_TIER};

/// Monster power level, always within [1, 9].
///
/// Construction clamps out-of-range values, so a `Tier` held anywhere in the
/// game is valid by definition. `Display` prints the bare number, which the
/// battle log format relies on ("Tier 3").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Tier(u8);

impl Tier {
    /// Lowest tier.
    pub const MIN: Tier = Tier(MIN_TIER);
    /// Highest tier. Units at this tier cannot be merged further.
    pub const MAX: Tier = Tier(MAX_TIER);

    /// Build a tier, clamping into [1, 9].
    pub fn new(value: u8) -> Self {
        Tier(value.clamp(MIN_TIER, MAX_TIER))
    }

    /// Raw tier number.
    pub fn get(self) -> u8 {
        self.0
    }

    /// The next tier up, or `None` at the cap.
    pub fn next(self) -> Option<Tier> {
        if self.0 < MAX_TIER {
            Some(Tier(self.0 + 1))
        } else {
            None
        }
    }

    pub fn is_max(self) -> bool {
        self.0 == MAX_TIER
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::MIN
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Manual impl so persisted tiers are clamped on the way in, never trusted.
impl<'de> Deserialize<'de> for Tier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u8::deserialize(deserializer)?;
        Ok(Tier::new(raw))
    }
}

/// Stable unique identifier for a unit.
///
/// Allocated by the roster factory, never reused within a session. Merging
/// destroys both parent ids and allocates a fresh one. Renderers key their
/// own lookup tables by this id; units carry no rendering handles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UnitId(u64);

impl UnitId {
    pub fn new(raw: u64) -> Self {
        UnitId(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which army a unit fights for within a battle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Enemy => write!(f, "Enemy"),
        }
    }
}
