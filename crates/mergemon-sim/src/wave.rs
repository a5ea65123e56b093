//! Wave composition — builds the enemy roster for a given wave number.
//!
//! Count, tier band, and stats are pure functions of the wave number;
//! the per-slot tier roll is the only random element.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use mergemon_core::constants::*;
use mergemon_core::stats::wave_scaled_stats;
use mergemon_core::types::{Side, Tier};
use mergemon_core::unit::{Unit, UnitFactory};

/// Number of enemies in a wave: two plus fractional growth, capped at ten.
pub fn wave_size(wave: u32) -> u32 {
    (WAVE_BASE_COUNT + (wave as f64 * WAVE_COUNT_GROWTH).floor() as u32).min(WAVE_MAX_COUNT)
}

/// Inclusive tier band for a wave. The bottom chases the top and never
/// passes it; early waves collapse to a single tier.
pub fn tier_band(wave: u32) -> (Tier, Tier) {
    let max_tier =
        (1 + (wave as f64 * WAVE_MAX_TIER_GROWTH).floor() as u32).min(MAX_TIER as u32);
    let min_tier = ((wave as f64 * WAVE_MIN_TIER_GROWTH).floor() as u32)
        .max(MIN_TIER as u32)
        .min(max_tier);
    (Tier::new(min_tier as u8), Tier::new(max_tier as u8))
}

/// Weighted tier pick within the band.
///
/// The top of the band gets likelier every wave (capped), the middle grows
/// more slowly, and whatever probability is left falls to the bottom.
fn roll_tier(wave: u32, min_tier: Tier, max_tier: Tier, rng: &mut ChaCha8Rng) -> Tier {
    if min_tier == max_tier {
        return min_tier;
    }

    let p_high = (WAVE_HIGH_TIER_CHANCE_BASE + wave as f64 * WAVE_HIGH_TIER_CHANCE_GROWTH)
        .min(WAVE_HIGH_TIER_CHANCE_CAP);
    let p_mid = (WAVE_MID_TIER_CHANCE_BASE + wave as f64 * WAVE_MID_TIER_CHANCE_GROWTH)
        .min(1.0 - p_high);
    let mid_tier = Tier::new((min_tier.get() + max_tier.get()) / 2);

    let roll: f64 = rng.gen_range(0.0..1.0);
    if roll < p_high {
        max_tier
    } else if roll < p_high + p_mid {
        mid_tier
    } else {
        min_tier
    }
}

/// Build the enemy roster for a wave.
///
/// Stats come from the wave-scaled table, so regenerating the same wave
/// with the same rng state reproduces it bit for bit.
pub fn generate_wave(wave: u32, factory: &mut UnitFactory, rng: &mut ChaCha8Rng) -> Vec<Unit> {
    let count = wave_size(wave);
    let (min_tier, max_tier) = tier_band(wave);

    let mut roster = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let tier = roll_tier(wave, min_tier, max_tier, rng);
        let stats = wave_scaled_stats(tier, wave);
        roster.push(factory.create_with_stats(tier, Side::Enemy, stats));
    }
    roster
}
