//! Battle outcome types shared between the combat engine and its consumers.

use serde::{Deserialize, Serialize};

use crate::unit::Unit;

/// Terminal state of a resolved battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// Every enemy died before the turn cap.
    Victory,
    /// Every player monster died.
    Defeat,
    /// Both sides still stood after the final turn. A designed draw, not
    /// an error.
    Timeout,
}

/// Everything a battle produced, in one value.
///
/// Consumed by the reward calculator and replayed line-by-line by the
/// external animation layer. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    /// Player units still alive at the end, battle damage included.
    pub survivors: Vec<Unit>,
    /// Ordered narration of every attack and death.
    pub log: Vec<String>,
    /// Total damage the player side dealt.
    pub player_damage_dealt: u64,
    /// Total damage the enemy side dealt.
    pub enemy_damage_dealt: u64,
    /// Full turns resolved before termination.
    pub turns: u32,
}

impl BattleResult {
    pub fn is_victory(&self) -> bool {
        self.outcome == BattleOutcome::Victory
    }

    pub fn survivor_count(&self) -> usize {
        self.survivors.len()
    }
}
