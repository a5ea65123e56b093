//! Save-file shape and the tolerant path back from it.
//!
//! The host owns the actual storage (browser local storage, a file on
//! disk). This module fixes the JSON contract it stores and rebuilds a
//! playable state from whatever comes back, clamping hostile values
//! instead of refusing the whole document.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::warn;

use mergemon_core::constants::{GRID_COLS, GRID_ROWS};
use mergemon_core::types::{Side, Tier, UnitId};
use mergemon_core::unit::{Unit, UnitFactory};

use crate::board::Board;
use crate::progression::Progression;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save data could not be parsed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One persisted grid occupant. Side is not stored; everything on a
/// saved board belongs to the player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedUnit {
    pub id: UnitId,
    pub tier: Tier,
    pub attack: u32,
    pub defense: u32,
    pub health: u32,
    pub max_health: u32,
}

impl SavedUnit {
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

    /// Health is capped at max health so an edited save cannot field an
    /// overhealed unit. Fallen units come back exactly as stored.
    fn to_unit(self) -> Unit {
        Unit {
            id: self.id,
            tier: self.tier,
            side: Side::Player,
            attack: self.attack,
            defense: self.defense,
            health: self.health.min(self.max_health),
            max_health: self.max_health,
        }
    }
}

/// The full persisted game. Field names are part of the stored format;
/// renaming one orphans existing saves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveState {
    pub grid: Vec<Vec<Option<SavedUnit>>>,
    pub coins: u64,
    pub wave: u32,
    pub highest_tier: Tier,
    #[serde(
        default = "default_unlocked",
        deserialize_with = "lenient_unlocked"
    )]
    pub unlocked_monsters: Vec<Tier>,
}

fn default_unlocked() -> Vec<Tier> {
    vec![Tier::MIN]
}

/// Accepts any JSON for the unlock list. An array of numbers restores
/// normally; a missing, null, or otherwise malformed field falls back
/// to the tier-1-only set rather than failing the load.
fn lenient_unlocked<'de, D>(deserializer: D) -> Result<Vec<Tier>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match &value {
        serde_json::Value::Array(items) => {
            let mut tiers = Vec::with_capacity(items.len());
            for item in items {
                match item.as_u64() {
                    Some(raw) => tiers.push(Tier::new(raw.min(u8::MAX as u64) as u8)),
                    None => {
                        warn!("malformed unlockedMonsters entry, resetting to tier 1");
                        return Ok(default_unlocked());
                    }
                }
            }
            Ok(tiers)
        }
        _ => {
            warn!("malformed unlockedMonsters field, resetting to tier 1");
            Ok(default_unlocked())
        }
    }
}

impl SaveState {
    /// Snapshots the board and progression into the persisted shape.
    pub fn capture(board: &Board, progression: &Progression) -> Self {
        let grid = (0..GRID_ROWS)
            .map(|row| {
                (0..GRID_COLS)
                    .map(|col| board.unit_at(row, col).map(SavedUnit::from_unit))
                    .collect()
            })
            .collect();
        Self {
            grid,
            coins: progression.coins(),
            wave: progression.wave(),
            highest_tier: progression.highest_tier(),
            unlocked_monsters: progression.unlocked_tiers(),
        }
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Rebuilds a playable board and progression. Cells beyond the 5x5
    /// grid are dropped, saved ids realign the factory's allocator, and
    /// tiers arrive pre-clamped by their deserializer.
    pub fn restore(&self, factory: &mut UnitFactory) -> (Board, Progression) {
        let mut board = Board::new();
        for (row, cells) in self.grid.iter().take(GRID_ROWS).enumerate() {
            for (col, cell) in cells.iter().take(GRID_COLS).enumerate() {
                if let Some(saved) = cell {
                    let unit = saved.to_unit();
                    factory.ensure_ids_above(unit.id);
                    board.set_cell(row, col, unit);
                }
            }
        }
        let unlocked: BTreeSet<Tier> = self.unlocked_monsters.iter().copied().collect();
        let progression =
            Progression::from_parts(self.coins, self.wave, self.highest_tier, unlocked);
        (board, progression)
    }
}
