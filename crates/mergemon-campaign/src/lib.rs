//! Campaign layer for MERGEMON: the board, the economy, and everything
//! that outlives a single battle.

pub mod board;
pub mod persistence;
pub mod progression;
pub mod rewards;
pub mod shop;

pub use board::{Board, GridError};
pub use persistence::{SaveError, SaveState};
pub use progression::Progression;
pub use rewards::{calculate_rewards, WaveRewards};
pub use shop::{monster_cost, ShopError};
