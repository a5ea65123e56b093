//! Campaign progression: coins, wave counter, and the tier unlock ladder.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use mergemon_core::constants::{
    ALWAYS_UNLOCKED_TIER, MERGE_REWARD_PER_TIER, STARTING_COINS, UNLOCK_TIER_HEADROOM,
};
use mergemon_core::types::Tier;

use crate::rewards::WaveRewards;

/// What a merge did to the campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeProgress {
    pub coins_awarded: u64,
    pub newly_unlocked: bool,
}

/// Long-lived campaign state, mutated by merges and battle outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    coins: u64,
    wave: u32,
    highest_tier_reached: Tier,
    unlocked_tiers: BTreeSet<Tier>,
}

impl Default for Progression {
    fn default() -> Self {
        let mut unlocked_tiers = BTreeSet::new();
        unlocked_tiers.insert(Tier::MIN);
        Self {
            coins: STARTING_COINS,
            wave: 1,
            highest_tier_reached: Tier::MIN,
            unlocked_tiers,
        }
    }
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild progression from persisted parts. Tier 1 is always in the
    /// unlock set and the wave counter never drops below 1.
    pub fn from_parts(
        coins: u64,
        wave: u32,
        highest_tier_reached: Tier,
        mut unlocked_tiers: BTreeSet<Tier>,
    ) -> Self {
        unlocked_tiers.insert(Tier::MIN);
        Self {
            coins,
            wave: wave.max(1),
            highest_tier_reached,
            unlocked_tiers,
        }
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn highest_tier(&self) -> Tier {
        self.highest_tier_reached
    }

    /// Explicitly unlocked tiers, ascending.
    pub fn unlocked_tiers(&self) -> Vec<Tier> {
        self.unlocked_tiers.iter().copied().collect()
    }

    /// Whether the shop may offer a tier: the low tiers always, higher
    /// ones once the player has merged within reach of them.
    pub fn can_unlock_tier(&self, tier: Tier) -> bool {
        if tier.get() <= ALWAYS_UNLOCKED_TIER {
            return true;
        }
        self.highest_tier_reached.get() + UNLOCK_TIER_HEADROOM >= tier.get()
    }

    pub fn add_coins(&mut self, amount: u64) {
        self.coins += amount;
    }

    /// Deduct `amount` if the balance covers it.
    pub fn try_spend(&mut self, amount: u64) -> bool {
        if self.coins < amount {
            return false;
        }
        self.coins -= amount;
        true
    }

    /// Record a merge: award coins for the new tier, and unlock it when
    /// it pushes past the highest tier reached so far.
    pub fn on_monster_merged(&mut self, new_tier: Tier) -> MergeProgress {
        let coins_awarded = MERGE_REWARD_PER_TIER * new_tier.get() as u64;
        self.coins += coins_awarded;

        let newly_unlocked = new_tier > self.highest_tier_reached;
        if newly_unlocked {
            self.highest_tier_reached = new_tier;
        }
        self.unlocked_tiers.insert(new_tier);

        MergeProgress {
            coins_awarded,
            newly_unlocked,
        }
    }

    /// Bank a battle's payout; a completed wave moves the counter on.
    pub fn on_battle_complete(&mut self, rewards: &WaveRewards) {
        self.coins += rewards.coins;
        if rewards.wave_completed {
            self.wave += 1;
        }
    }
}
