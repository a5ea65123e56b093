//! Battle payout calculation.

use serde::{Deserialize, Serialize};

use mergemon_core::battle::BattleResult;
use mergemon_core::constants::{
    DEFEAT_REWARD_FACTOR, HIGH_WAVE_BONUS_PER_WAVE, HIGH_WAVE_BONUS_THRESHOLD, SURVIVOR_REWARD,
    VICTORY_BONUS_FACTOR, WAVE_REWARD_BASE,
};

/// Coin payout for one battle, plus whether the wave counter advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveRewards {
    pub coins: u64,
    pub wave_completed: bool,
}

/// Map a battle result and wave number to a payout.
///
/// The base grows with the wave and each survivor adds a bounty on top.
/// Victory adds half again the base plus a flat late-game bonus; a
/// defeat or timeout keeps thirty percent of the total instead. Pure
/// arithmetic with a single floor at the end.
pub fn calculate_rewards(result: &BattleResult, wave: u32) -> WaveRewards {
    let base = WAVE_REWARD_BASE * wave as f64;
    let mut coins = base + SURVIVOR_REWARD * result.survivor_count() as f64;

    let wave_completed = result.is_victory();
    if wave_completed {
        coins += base * VICTORY_BONUS_FACTOR;
        if wave > HIGH_WAVE_BONUS_THRESHOLD {
            coins += (wave as f64 * HIGH_WAVE_BONUS_PER_WAVE).floor();
        }
    } else {
        coins *= DEFEAT_REWARD_FACTOR;
    }

    WaveRewards {
        coins: coins.floor() as u64,
        wave_completed,
    }
}
