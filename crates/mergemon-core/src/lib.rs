//! Core types and definitions for the MERGEMON battle core.
//!
//! This crate defines the vocabulary shared across all other crates:
//! units, tiers, stat tables, battle results, events, and constants.
//! It has no dependency on any runtime framework.

pub mod battle;
pub mod constants;
pub mod errors;
pub mod events;
pub mod stats;
pub mod types;
pub mod unit;
