//! The unit model and the factory that builds rosters.

use serde::{Deserialize, Serialize};

use crate::errors::MergeError;
use crate::stats::{base_stats, StatBlock};
use crate::types::{Side, Tier, UnitId};

/// One combat participant.
///
/// Plain `Copy` value: the grid and battle rosters hold copies, the combat
/// engine mutates only its own copies, and the session reconciles surviving
/// health back onto the grid afterwards. Attack and defense are fixed at
/// creation; only health moves during a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub tier: Tier,
    pub side: Side,
    pub attack: u32,
    pub defense: u32,
    pub health: u32,
    pub max_health: u32,
}

impl Unit {
    /// Dead units take no further part in a battle.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Reduce health, clamping at zero. Health can never go negative.
    pub fn apply_damage(&mut self, damage: u32) {
        self.health = self.health.saturating_sub(damage);
    }

    /// Copy of this unit stamped for the given battle side.
    pub fn with_side(mut self, side: Side) -> Unit {
        self.side = side;
        self
    }
}

/// Allocates units with session-unique ids.
///
/// Ids increase monotonically and are never reused; merging two units
/// consumes both parent ids and allocates a fresh one for the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitFactory {
    next_id: u64,
}

impl Default for UnitFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitFactory {
    pub fn new() -> Self {
        UnitFactory { next_id: 1 }
    }

    fn alloc_id(&mut self) -> UnitId {
        let id = UnitId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Bump the allocator past an id seen in restored state, so fresh ids
    /// never collide with persisted ones.
    pub fn ensure_ids_above(&mut self, id: UnitId) {
        self.next_id = self.next_id.max(id.get() + 1);
    }

    /// New unit at the tier's base stats, full health.
    pub fn create(&mut self, tier: Tier, side: Side) -> Unit {
        self.create_with_stats(tier, side, base_stats(tier))
    }

    /// New unit with explicit stats (wave-scaled enemies, restored saves).
    pub fn create_with_stats(&mut self, tier: Tier, side: Side, stats: StatBlock) -> Unit {
        Unit {
            id: self.alloc_id(),
            tier,
            side,
            attack: stats.attack,
            defense: stats.defense,
            health: stats.health,
            max_health: stats.health,
        }
    }

    /// Combine two same-tier units into one unit a tier up.
    ///
    /// The result starts from the new tier's base stats, plus a bonus of
    /// one tenth of the parents' combined stat (floored) on each of attack,
    /// defense, and health. Health bonus is computed from the parents'
    /// maximums, so battle scars on the parents do not weaken the child.
    /// The merged unit spawns at full health.
    ///
    /// Fails without allocating when the tiers differ or the parents are
    /// already at the cap; the caller's state is untouched on failure.
    pub fn merge(&mut self, a: &Unit, b: &Unit) -> Result<Unit, MergeError> {
        if a.tier != b.tier {
            return Err(MergeError::TierMismatch {
                left: a.tier,
                right: b.tier,
            });
        }
        let merged_tier = a.tier.next().ok_or(MergeError::MaxTier(a.tier))?;

        let base = base_stats(merged_tier);
        let stats = StatBlock {
            attack: base.attack + (a.attack + b.attack) / 10,
            defense: base.defense + (a.defense + b.defense) / 10,
            health: base.health + (a.max_health + b.max_health) / 10,
        };
        Ok(self.create_with_stats(merged_tier, a.side, stats))
    }
}
