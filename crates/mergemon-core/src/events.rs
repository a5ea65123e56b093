//! Events emitted by the game session for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::types::{Tier, UnitId};

/// Gameplay events for the frontend, drained by the host loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A shop purchase landed on the grid.
    MonsterPurchased {
        id: UnitId,
        tier: Tier,
        row: usize,
        col: usize,
        cost: u64,
    },
    /// A monster relocated to an empty cell.
    MonsterMoved {
        id: UnitId,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    },
    /// Two monsters merged into a stronger one.
    MonsterMerged {
        id: UnitId,
        tier: Tier,
        row: usize,
        col: usize,
        coins_awarded: u64,
    },
    /// A new tier became purchasable.
    TierUnlocked { tier: Tier },
    /// Combat began against the current wave.
    BattleStarted { wave: u32, enemy_count: usize },
    /// The wave was cleared.
    WaveCompleted { wave: u32, coins_awarded: u64 },
    /// The wave ended in defeat or a timeout draw.
    WaveFailed { wave: u32, coins_awarded: u64 },
}
