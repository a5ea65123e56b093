//! Per-tier stat tables and wave scaling.
//!
//! Consolidates the numeric identity of a monster: what a tier is worth at
//! creation time and how enemy stats inflate across waves. Everything here
//! is pure arithmetic so the same inputs always produce the same stats.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ATTACK_PER_TIER, DEFENSE_PER_TIER, ENEMY_DEFENSE_GROWTH_PER_WAVE,
    ENEMY_STAT_GROWTH_PER_WAVE, HEALTH_PER_TIER,
};
use crate::types::Tier;

/// Creation-time combat stats for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub attack: u32,
    pub defense: u32,
    pub health: u32,
}

/// Base stats for a tier, the wave-1 anchor of all scaling.
///
/// Strictly increasing in tier on every stat, so a higher-tier unit is
/// always the stronger one. A bought tier-t monster matches a wave-1
/// tier-t enemy exactly.
pub fn base_stats(tier: Tier) -> StatBlock {
    let t = tier.get() as u32;
    StatBlock {
        attack: ATTACK_PER_TIER * t,
        defense: DEFENSE_PER_TIER * t,
        health: HEALTH_PER_TIER * t,
    }
}

/// Enemy stats for a tier at a given wave.
///
/// Attack and health grow 25% of base per wave past the first, defense a
/// slower 20%. Each stat is floored independently, so the output is
/// bit-for-bit reproducible for the same (tier, wave) pair.
pub fn wave_scaled_stats(tier: Tier, wave: u32) -> StatBlock {
    let base = base_stats(tier);
    let waves_past_first = wave.saturating_sub(1) as f64;
    let growth = 1.0 + waves_past_first * ENEMY_STAT_GROWTH_PER_WAVE;
    let defense_growth = 1.0 + waves_past_first * ENEMY_DEFENSE_GROWTH_PER_WAVE;
    StatBlock {
        attack: (base.attack as f64 * growth).floor() as u32,
        defense: (base.defense as f64 * defense_growth).floor() as u32,
        health: (base.health as f64 * growth).floor() as u32,
    }
}
