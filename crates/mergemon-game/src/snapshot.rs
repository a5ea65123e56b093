//! Host-facing view of a session, built on demand for rendering.

use serde::{Deserialize, Serialize};

use mergemon_campaign::shop::monster_cost;
use mergemon_core::constants::{GRID_COLS, GRID_ROWS, MAX_TIER, MIN_TIER};
use mergemon_core::types::{Tier, UnitId};
use mergemon_core::unit::Unit;
use mergemon_sim::engine::BattleStatus;

use crate::session::{GamePhase, GameSession};

/// One grid occupant as the renderer sees it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub id: UnitId,
    pub tier: Tier,
    pub attack: u32,
    pub defense: u32,
    pub health: u32,
    pub max_health: u32,
}

impl CellSnapshot {
    fn from_unit(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            tier: unit.tier,
            attack: unit.attack,
            defense: unit.defense,
            health: unit.health,
            max_health: unit.max_health,
        }
    }
}

/// One shop row: every tier with its price and availability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShopOffer {
    pub tier: Tier,
    pub cost: u64,
    pub unlocked: bool,
    pub affordable: bool,
}

/// The running battle as the renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleView {
    pub status: BattleStatus,
    pub turn: u32,
    pub log: Vec<String>,
}

/// Everything a frontend needs to draw one frame of the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub grid: Vec<Vec<Option<CellSnapshot>>>,
    pub coins: u64,
    pub wave: u32,
    pub highest_tier: Tier,
    pub unlocked_tiers: Vec<Tier>,
    pub shop: Vec<ShopOffer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battle: Option<BattleView>,
}

impl GameSnapshot {
    pub fn build(session: &GameSession) -> Self {
        let grid = (0..GRID_ROWS)
            .map(|row| {
                (0..GRID_COLS)
                    .map(|col| {
                        session
                            .board
                            .unit_at(row, col)
                            .map(CellSnapshot::from_unit)
                    })
                    .collect()
            })
            .collect();

        let coins = session.progression.coins();
        let shop = (MIN_TIER..=MAX_TIER)
            .map(|raw| {
                let tier = Tier::new(raw);
                let cost = monster_cost(tier);
                ShopOffer {
                    tier,
                    cost,
                    unlocked: session.progression.can_unlock_tier(tier),
                    affordable: coins >= cost,
                }
            })
            .collect();

        let battle = session.battle.as_ref().map(|engine| BattleView {
            status: engine.status(),
            turn: engine.turn(),
            log: engine.log().to_vec(),
        });

        Self {
            phase: session.phase,
            grid,
            coins,
            wave: session.progression.wave(),
            highest_tier: session.progression.highest_tier(),
            unlocked_tiers: session.progression.unlocked_tiers(),
            shop,
            battle,
        }
    }
}
