//! Top-level game session for the MERGEMON battle core.
//!
//! Ties the board, shop, progression, and battle engine into a single
//! host-facing state machine. The host (a renderer, a test harness)
//! calls session methods, drains events for feedback, and pulls
//! snapshots for display; nothing here talks to a screen directly.

pub mod session;
pub mod snapshot;

pub use session::{BattleAdvance, GameConfig, GameError, GamePhase, GameSession, MoveOutcome};
pub use snapshot::{BattleView, CellSnapshot, GameSnapshot, ShopOffer};
