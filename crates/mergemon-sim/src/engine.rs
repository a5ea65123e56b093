//! Battle engine — the combat core of the game.
//!
//! `BattleEngine` owns both rosters, resolves one full turn per `step`,
//! and produces a `BattleResult`. The host loop steps it between frames;
//! nothing here blocks or spawns threads.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use mergemon_core::battle::{BattleOutcome, BattleResult};
use mergemon_core::constants::{
    DAMAGE_VARIANCE_MAX, DAMAGE_VARIANCE_MIN, DEFENSE_MITIGATION, MAX_BATTLE_TURNS, MIN_DAMAGE,
};
use mergemon_core::types::Side;
use mergemon_core::unit::Unit;

/// Configuration for starting a battle.
pub struct BattleConfig {
    /// RNG seed for determinism. Same seed = same battle.
    pub seed: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Battle lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleStatus {
    NotStarted,
    Running,
    Victory,
    Defeat,
    Timeout,
}

impl BattleStatus {
    pub fn is_terminal(self) -> bool {
        self.outcome().is_some()
    }

    /// The battle outcome, once terminal.
    pub fn outcome(self) -> Option<BattleOutcome> {
        match self {
            BattleStatus::NotStarted | BattleStatus::Running => None,
            BattleStatus::Victory => Some(BattleOutcome::Victory),
            BattleStatus::Defeat => Some(BattleOutcome::Defeat),
            BattleStatus::Timeout => Some(BattleOutcome::Timeout),
        }
    }
}

/// The battle engine. Owns both rosters and all combat state.
pub struct BattleEngine {
    players: Vec<Unit>,
    enemies: Vec<Unit>,
    status: BattleStatus,
    /// Turn currently being resolved, 1-based.
    turn: u32,
    /// Full turns actually resolved, fixed when the battle terminates.
    turns_resolved: u32,
    rng: ChaCha8Rng,
    log: Vec<String>,
    player_damage_dealt: u64,
    enemy_damage_dealt: u64,
}

impl BattleEngine {
    /// Create a battle engine over copies of both rosters.
    ///
    /// Sides are stamped here; callers hand in grid units and wave units
    /// without caring what side they were on before.
    pub fn new(player_roster: Vec<Unit>, enemy_roster: Vec<Unit>, config: BattleConfig) -> Self {
        Self {
            players: player_roster
                .into_iter()
                .map(|unit| unit.with_side(Side::Player))
                .collect(),
            enemies: enemy_roster
                .into_iter()
                .map(|unit| unit.with_side(Side::Enemy))
                .collect(),
            status: BattleStatus::NotStarted,
            turn: 1,
            turns_resolved: 0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            log: Vec::new(),
            player_damage_dealt: 0,
            enemy_damage_dealt: 0,
        }
    }

    /// Resolve one full turn and return the resulting status.
    ///
    /// Stepping a finished battle is a no-op that reports the same status.
    pub fn step(&mut self) -> BattleStatus {
        if self.status.is_terminal() {
            return self.status;
        }
        self.status = BattleStatus::Running;

        // Decided before this turn acts: a wiped roster or the turn cap.
        if let Some(outcome) = self.check_end() {
            return self.finish(outcome, self.turn.saturating_sub(1));
        }

        self.attack_phase(Side::Player);
        // A mid-turn wipe skips the opposing phase.
        if let Some(outcome) = self.check_end() {
            return self.finish(outcome, self.turn);
        }

        self.attack_phase(Side::Enemy);
        if let Some(outcome) = self.check_end() {
            return self.finish(outcome, self.turn);
        }

        self.turn += 1;
        self.status
    }

    /// Drive the battle to a terminal state and return its result.
    pub fn run_to_completion(mut self) -> BattleResult {
        loop {
            self.step();
            if let Some(outcome) = self.status.outcome() {
                return self.build_result(outcome);
            }
        }
    }

    /// Consume a finished battle into its result. `None` while running.
    pub fn into_result(self) -> Option<BattleResult> {
        let outcome = self.status.outcome()?;
        Some(self.build_result(outcome))
    }

    /// Get the current battle status.
    pub fn status(&self) -> BattleStatus {
        self.status
    }

    /// Get the turn currently being resolved (1-based).
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Get the narration produced so far.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    fn build_result(self, outcome: BattleOutcome) -> BattleResult {
        BattleResult {
            outcome,
            survivors: self
                .players
                .into_iter()
                .filter(Unit::is_alive)
                .collect(),
            log: self.log,
            player_damage_dealt: self.player_damage_dealt,
            enemy_damage_dealt: self.enemy_damage_dealt,
            turns: self.turns_resolved,
        }
    }

    /// Terminal conditions, in precedence order. Deaths win over the cap.
    fn check_end(&self) -> Option<BattleOutcome> {
        if !self.players.iter().any(Unit::is_alive) {
            Some(BattleOutcome::Defeat)
        } else if !self.enemies.iter().any(Unit::is_alive) {
            Some(BattleOutcome::Victory)
        } else if self.turn > MAX_BATTLE_TURNS {
            Some(BattleOutcome::Timeout)
        } else {
            None
        }
    }

    fn finish(&mut self, outcome: BattleOutcome, turns_resolved: u32) -> BattleStatus {
        if outcome == BattleOutcome::Timeout {
            self.log.push(format!(
                "The battle ends in a draw after {} turns!",
                MAX_BATTLE_TURNS
            ));
        }
        self.turns_resolved = turns_resolved;
        self.status = match outcome {
            BattleOutcome::Victory => BattleStatus::Victory,
            BattleOutcome::Defeat => BattleStatus::Defeat,
            BattleOutcome::Timeout => BattleStatus::Timeout,
        };
        debug!(?outcome, turns = turns_resolved, "battle resolved");
        self.status
    }

    /// Every living unit on `side` attacks a random living opponent,
    /// in roster order.
    fn attack_phase(&mut self, side: Side) {
        let attacker_count = match side {
            Side::Player => self.players.len(),
            Side::Enemy => self.enemies.len(),
        };

        for index in 0..attacker_count {
            let attacker = self.unit_at(side, index);
            if !attacker.is_alive() {
                continue;
            }

            let target_index = match self.pick_target(side.opponent()) {
                Some(target) => target,
                // Opposing roster wiped earlier in this phase; nothing
                // left to hit.
                None => continue,
            };

            let defender = self.unit_at(side.opponent(), target_index);
            let damage = self.roll_damage(&attacker, &defender);

            self.log.push(format!(
                "{} Tier {} monster attacks {} Tier {} monster for {} damage!",
                attacker.side, attacker.tier, defender.side, defender.tier, damage
            ));
            match side {
                Side::Player => self.player_damage_dealt += damage as u64,
                Side::Enemy => self.enemy_damage_dealt += damage as u64,
            }

            let defender = self.unit_at_mut(side.opponent(), target_index);
            defender.apply_damage(damage);
            if !defender.is_alive() {
                let line = format!(
                    "{} Tier {} monster is defeated!",
                    defender.side, defender.tier
                );
                self.log.push(line);
            }
        }
    }

    /// Uniformly random living unit on `side`, by roster index. No tier
    /// matching, no focus fire.
    fn pick_target(&mut self, side: Side) -> Option<usize> {
        let roster = match side {
            Side::Player => &self.players,
            Side::Enemy => &self.enemies,
        };
        let alive: Vec<usize> = roster
            .iter()
            .enumerate()
            .filter(|(_, unit)| unit.is_alive())
            .map(|(index, _)| index)
            .collect();
        if alive.is_empty() {
            return None;
        }
        let pick = self.rng.gen_range(0..alive.len());
        Some(alive[pick])
    }

    /// Attack minus half the defender's defense, scaled by a uniform
    /// variance roll, floored, never below the damage minimum.
    fn roll_damage(&mut self, attacker: &Unit, defender: &Unit) -> u32 {
        let variance = self.rng.gen_range(DAMAGE_VARIANCE_MIN..DAMAGE_VARIANCE_MAX);
        let raw =
            (attacker.attack as f64 - defender.defense as f64 * DEFENSE_MITIGATION) * variance;
        (raw.floor() as i64).max(MIN_DAMAGE as i64) as u32
    }

    fn unit_at(&self, side: Side, index: usize) -> Unit {
        match side {
            Side::Player => self.players[index],
            Side::Enemy => self.enemies[index],
        }
    }

    fn unit_at_mut(&mut self, side: Side, index: usize) -> &mut Unit {
        match side {
            Side::Player => &mut self.players[index],
            Side::Enemy => &mut self.enemies[index],
        }
    }
}

/// Resolve an entire battle in one call.
pub fn simulate_battle(
    player_roster: Vec<Unit>,
    enemy_roster: Vec<Unit>,
    seed: u64,
) -> BattleResult {
    BattleEngine::new(player_roster, enemy_roster, BattleConfig { seed }).run_to_completion()
}
