//! Battle simulation for MERGEMON.
//!
//! Owns the combat turn loop and wave composition. Completely headless:
//! battles resolve up front into a `BattleResult` whose log the frontend
//! animation layer replays at its own pace.

pub mod engine;
pub mod wave;

pub use engine::{simulate_battle, BattleConfig, BattleEngine, BattleStatus};
pub use mergemon_core as core;
