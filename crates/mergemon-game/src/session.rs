//! The session state machine: preparation, battle, repeat.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use mergemon_campaign::board::{Board, GridError};
use mergemon_campaign::persistence::{SaveError, SaveState};
use mergemon_campaign::progression::Progression;
use mergemon_campaign::rewards::calculate_rewards;
use mergemon_campaign::shop::{self, ShopError};
use mergemon_core::battle::BattleResult;
use mergemon_core::events::GameEvent;
use mergemon_core::types::{Side, Tier};
use mergemon_core::unit::UnitFactory;
use mergemon_sim::engine::{BattleConfig, BattleEngine};
use mergemon_sim::wave::generate_wave;

use crate::snapshot::GameSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Preparation,
    Battle,
}

#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("a battle is already in progress")]
    BattleInProgress,
    #[error("no battle is in progress")]
    NoBattle,
    #[error("cannot start a battle with an empty board")]
    EmptyBoard,
    #[error(transparent)]
    Shop(#[from] ShopError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// What a move request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Merged(Tier),
}

/// One call to `advance_battle`.
#[derive(Debug)]
pub enum BattleAdvance {
    InProgress { turn: u32 },
    Finished(BattleResult),
}

/// Top-level game orchestrator.
/// Owns the board, the campaign progression, and at most one running
/// battle; the host drives it one call at a time on a single thread.
pub struct GameSession {
    pub phase: GamePhase,
    pub board: Board,
    pub progression: Progression,
    pub factory: UnitFactory,
    pub rng: ChaCha8Rng,
    pub seed: u64,
    pub battle: Option<BattleEngine>,
    pending_events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self {
            phase: GamePhase::Preparation,
            board: Board::new(),
            progression: Progression::new(),
            factory: UnitFactory::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            seed: config.seed,
            battle: None,
            pending_events: Vec::new(),
        }
    }

    /// Buy a monster of `tier` and place it on the first empty cell,
    /// row-major. Returns the cell it landed on.
    pub fn buy_monster(&mut self, tier: Tier) -> Result<(usize, usize), GameError> {
        if self.phase == GamePhase::Battle {
            return Err(GameError::BattleInProgress);
        }
        let cost = shop::validate_purchase(&self.progression, tier)?;
        let (row, col) = match self.board.find_empty_cell() {
            Some(cell) => cell,
            None => return Err(ShopError::BoardFull.into()),
        };
        if !self.progression.try_spend(cost) {
            return Err(ShopError::InsufficientCoins {
                have: self.progression.coins(),
                need: cost,
            }
            .into());
        }
        let unit = self.factory.create(tier, Side::Player);
        self.board.place(unit, row, col)?;
        debug!(%tier, row, col, cost, "monster purchased");
        self.pending_events.push(GameEvent::MonsterPurchased {
            id: unit.id,
            tier,
            row,
            col,
            cost,
        });
        Ok((row, col))
    }

    /// Move a monster to an empty cell, or merge it into a same-tier
    /// occupant. A rejected move leaves the board exactly as it was.
    pub fn move_monster(
        &mut self,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    ) -> Result<MoveOutcome, GameError> {
        if self.phase == GamePhase::Battle {
            return Err(GameError::BattleInProgress);
        }
        if from_row == to_row && from_col == to_col {
            // Dropping a monster back on its own cell changes nothing.
            let unit = self.board.take(from_row, from_col)?;
            let _ = self.board.place(unit, from_row, from_col);
            return Ok(MoveOutcome::Moved);
        }

        let moving = self.board.take(from_row, from_col)?;
        if self.board.unit_at(to_row, to_col).is_none() {
            match self.board.place(moving, to_row, to_col) {
                Ok(()) => {
                    self.pending_events.push(GameEvent::MonsterMoved {
                        id: moving.id,
                        from_row,
                        from_col,
                        to_row,
                        to_col,
                    });
                    Ok(MoveOutcome::Moved)
                }
                Err(err) => {
                    // Source cell was just vacated, so this always lands.
                    let _ = self.board.place(moving, from_row, from_col);
                    Err(err.into())
                }
            }
        } else {
            match self.board.attempt_merge(moving, to_row, to_col, &mut self.factory) {
                Ok(merged) => {
                    let progress = self.progression.on_monster_merged(merged.tier);
                    info!(tier = %merged.tier, coins = progress.coins_awarded, "monsters merged");
                    self.pending_events.push(GameEvent::MonsterMerged {
                        id: merged.id,
                        tier: merged.tier,
                        row: to_row,
                        col: to_col,
                        coins_awarded: progress.coins_awarded,
                    });
                    if progress.newly_unlocked {
                        self.pending_events
                            .push(GameEvent::TierUnlocked { tier: merged.tier });
                    }
                    Ok(MoveOutcome::Merged(merged.tier))
                }
                Err(err) => {
                    let _ = self.board.place(moving, from_row, from_col);
                    Err(err.into())
                }
            }
        }
    }

    /// Begin combat against the current wave. The board roster is
    /// copied into the engine; the grid itself is untouched until the
    /// battle resolves.
    pub fn start_battle(&mut self) -> Result<(), GameError> {
        if self.phase == GamePhase::Battle {
            return Err(GameError::BattleInProgress);
        }
        if self.board.is_empty() {
            return Err(GameError::EmptyBoard);
        }
        let wave = self.progression.wave();
        let enemies = generate_wave(wave, &mut self.factory, &mut self.rng);
        let enemy_count = enemies.len();
        let config = BattleConfig {
            seed: self.rng.gen(),
        };
        self.battle = Some(BattleEngine::new(self.board.roster(), enemies, config));
        self.phase = GamePhase::Battle;
        info!(wave, enemy_count, "battle started");
        self.pending_events
            .push(GameEvent::BattleStarted { wave, enemy_count });
        Ok(())
    }

    /// Resolve one battle turn. The host calls this repeatedly (with
    /// whatever pacing it likes) until `Finished` comes back, at which
    /// point rewards are banked and survivors written to the board.
    pub fn advance_battle(&mut self) -> Result<BattleAdvance, GameError> {
        let engine = match self.battle.as_mut() {
            Some(engine) => engine,
            None => return Err(GameError::NoBattle),
        };
        engine.step();
        if !engine.status().is_terminal() {
            return Ok(BattleAdvance::InProgress {
                turn: engine.turn(),
            });
        }
        let result = match self.battle.take().and_then(BattleEngine::into_result) {
            Some(result) => result,
            None => return Err(GameError::NoBattle),
        };
        Ok(BattleAdvance::Finished(self.finish_battle(result)))
    }

    /// Run the current battle to its terminal state in one call.
    pub fn resolve_battle(&mut self) -> Result<BattleResult, GameError> {
        loop {
            if let BattleAdvance::Finished(result) = self.advance_battle()? {
                return Ok(result);
            }
        }
    }

    fn finish_battle(&mut self, result: BattleResult) -> BattleResult {
        let wave = self.progression.wave();
        self.board.apply_battle_survivors(&result.survivors);
        let rewards = calculate_rewards(&result, wave);
        self.progression.on_battle_complete(&rewards);
        self.phase = GamePhase::Preparation;
        info!(
            wave,
            outcome = ?result.outcome,
            coins = rewards.coins,
            turns = result.turns,
            "battle resolved"
        );
        let event = if rewards.wave_completed {
            GameEvent::WaveCompleted {
                wave,
                coins_awarded: rewards.coins,
            }
        } else {
            GameEvent::WaveFailed {
                wave,
                coins_awarded: rewards.coins,
            }
        };
        self.pending_events.push(event);
        result
    }

    /// Serialize the campaign to the persisted JSON shape. Battles are
    /// not persisted; saving mid-battle stores the pre-battle board.
    pub fn save_state(&self) -> Result<String, GameError> {
        Ok(SaveState::capture(&self.board, &self.progression).to_json()?)
    }

    /// Rebuild a session from persisted JSON.
    /// The RNG is re-seeded offset by the wave counter so a reloaded
    /// game does not replay the exact rolls of the session it saved.
    pub fn restore(raw: &str, config: GameConfig) -> Result<Self, GameError> {
        let saved = SaveState::from_json(raw)?;
        let mut factory = UnitFactory::new();
        let (board, progression) = saved.restore(&mut factory);
        let rng_seed = config.seed.wrapping_add(progression.wave() as u64 * 1000);
        Ok(Self {
            phase: GamePhase::Preparation,
            board,
            progression,
            factory,
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
            seed: config.seed,
            battle: None,
            pending_events: Vec::new(),
        })
    }

    /// Drain all pending game events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Build a host-facing snapshot without advancing anything.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::build(self)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
