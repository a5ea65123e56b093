//! Shop pricing and purchase validation.

use thiserror::Error;

use mergemon_core::constants::MONSTER_COST_PER_TIER;
use mergemon_core::types::Tier;

use crate::progression::Progression;

/// Why a purchase was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("tier {0} is not unlocked yet")]
    TierLocked(Tier),
    #[error("not enough coins: have {have}, need {need}")]
    InsufficientCoins { have: u64, need: u64 },
    #[error("no empty cell left on the board")]
    BoardFull,
}

/// Shop price for a monster of the given tier.
pub fn monster_cost(tier: Tier) -> u64 {
    MONSTER_COST_PER_TIER * tier.get() as u64
}

/// Check the unlock gate and the coin balance for a purchase.
/// Returns the price without deducting it.
pub fn validate_purchase(progression: &Progression, tier: Tier) -> Result<u64, ShopError> {
    if !progression.can_unlock_tier(tier) {
        return Err(ShopError::TierLocked(tier));
    }
    let cost = monster_cost(tier);
    if progression.coins() < cost {
        return Err(ShopError::InsufficientCoins {
            have: progression.coins(),
            need: cost,
        });
    }
    Ok(cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_scales_with_tier() {
        assert_eq!(monster_cost(Tier::new(1)), 50);
        assert_eq!(monster_cost(Tier::new(2)), 100);
        assert_eq!(monster_cost(Tier::new(9)), 450);
    }

    #[test]
    fn starting_coins_afford_two_basic_monsters() {
        let mut progression = Progression::default();
        let cost = validate_purchase(&progression, Tier::new(1)).unwrap();
        assert!(progression.try_spend(cost));
        let cost = validate_purchase(&progression, Tier::new(1)).unwrap();
        assert!(progression.try_spend(cost));
        assert_eq!(progression.coins(), 0);
        assert_eq!(
            validate_purchase(&progression, Tier::new(1)).unwrap_err(),
            ShopError::InsufficientCoins { have: 0, need: 50 }
        );
    }

    #[test]
    fn locked_tier_rejected_before_price() {
        let progression = Progression::default();
        // Plenty of gold would not help; tier 5 needs highest 3.
        assert_eq!(
            validate_purchase(&progression, Tier::new(5)).unwrap_err(),
            ShopError::TierLocked(Tier::new(5))
        );
    }

    #[test]
    fn affordable_low_tier_passes_when_locked_higher() {
        let mut progression = Progression::default();
        progression.add_coins(1000);
        assert_eq!(validate_purchase(&progression, Tier::new(3)).unwrap(), 150);
        assert!(validate_purchase(&progression, Tier::new(4)).is_err());
        progression.on_monster_merged(Tier::new(2));
        assert_eq!(validate_purchase(&progression, Tier::new(4)).unwrap(), 200);
    }
}
