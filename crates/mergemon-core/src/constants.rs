//! Game constants and tuning parameters.

// --- Grid ---

/// Board rows.
pub const GRID_ROWS: usize = 5;

/// Board columns.
pub const GRID_COLS: usize = 5;

/// Total cells on the board.
pub const GRID_CELLS: usize = GRID_ROWS * GRID_COLS;

// --- Tiers ---

/// Lowest monster tier.
pub const MIN_TIER: u8 = 1;

/// Highest monster tier. Tier-9 units cannot be merged further.
pub const MAX_TIER: u8 = 9;

/// Tiers at or below this are purchasable from the start.
pub const ALWAYS_UNLOCKED_TIER: u8 = 3;

/// A tier becomes purchasable once `highest_tier_reached + headroom >= tier`.
pub const UNLOCK_TIER_HEADROOM: u8 = 2;

// --- Battle ---

/// Hard cap on battle length. Reaching it ends the battle as a timeout draw.
pub const MAX_BATTLE_TURNS: u32 = 100;

/// Lower bound of the per-attack damage variance roll.
pub const DAMAGE_VARIANCE_MIN: f64 = 0.8;

/// Upper bound of the per-attack damage variance roll.
pub const DAMAGE_VARIANCE_MAX: f64 = 1.2;

/// Fraction of defense subtracted from attack before variance.
pub const DEFENSE_MITIGATION: f64 = 0.5;

/// Every landed attack deals at least this much damage.
pub const MIN_DAMAGE: u32 = 1;

// --- Base stats (per tier) ---

/// Attack per tier point. A tier-t unit starts with 10t attack.
pub const ATTACK_PER_TIER: u32 = 10;

/// Defense per tier point.
pub const DEFENSE_PER_TIER: u32 = 2;

/// Health per tier point.
pub const HEALTH_PER_TIER: u32 = 50;

// --- Wave composition ---

/// Enemies in wave 1 before growth.
pub const WAVE_BASE_COUNT: u32 = 2;

/// Extra enemies per wave (fractional, floored).
pub const WAVE_COUNT_GROWTH: f64 = 0.7;

/// Largest possible wave.
pub const WAVE_MAX_COUNT: u32 = 10;

/// Top-of-band tier growth per wave (fractional, floored).
pub const WAVE_MAX_TIER_GROWTH: f64 = 0.4;

/// Bottom-of-band tier growth per wave (fractional, floored).
pub const WAVE_MIN_TIER_GROWTH: f64 = 0.2;

/// Chance of rolling the band's top tier at wave 0 growth.
pub const WAVE_HIGH_TIER_CHANCE_BASE: f64 = 0.15;

/// High-tier chance gained per wave.
pub const WAVE_HIGH_TIER_CHANCE_GROWTH: f64 = 0.05;

/// High-tier chance never exceeds this.
pub const WAVE_HIGH_TIER_CHANCE_CAP: f64 = 0.7;

/// Chance of rolling the band's middle tier, before the high roll eats in.
pub const WAVE_MID_TIER_CHANCE_BASE: f64 = 0.25;

/// Mid-tier chance gained per wave.
pub const WAVE_MID_TIER_CHANCE_GROWTH: f64 = 0.02;

/// Attack and health growth per wave past the first.
pub const ENEMY_STAT_GROWTH_PER_WAVE: f64 = 0.25;

/// Defense growth per wave past the first (slower than attack/health).
pub const ENEMY_DEFENSE_GROWTH_PER_WAVE: f64 = 0.2;

// --- Economy ---

/// Coins a fresh game starts with.
pub const STARTING_COINS: u64 = 100;

/// Shop price per tier point. A tier-t monster costs 50t coins.
pub const MONSTER_COST_PER_TIER: u64 = 50;

/// Coins awarded per tier point of a freshly merged monster.
pub const MERGE_REWARD_PER_TIER: u64 = 5;

/// Base battle reward per wave number.
pub const WAVE_REWARD_BASE: f64 = 15.0;

/// Coins per surviving player monster.
pub const SURVIVOR_REWARD: f64 = 10.0;

/// Victory adds this multiple of the base reward on top.
pub const VICTORY_BONUS_FACTOR: f64 = 1.5;

/// Waves past this number pay an extra flat bonus on victory.
pub const HIGH_WAVE_BONUS_THRESHOLD: u32 = 5;

/// Extra victory coins per wave number past the threshold gate.
pub const HIGH_WAVE_BONUS_PER_WAVE: f64 = 10.0;

/// Fraction of the reward kept after a defeat or timeout.
pub const DEFEAT_REWARD_FACTOR: f64 = 0.3;
