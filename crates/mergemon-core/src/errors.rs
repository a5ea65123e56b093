//! Precondition errors for the unit model.

use thiserror::Error;

use crate::types::Tier;

/// Why a merge was refused. Refusal never changes any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MergeError {
    /// Only same-tier units can be merged.
    #[error("cannot merge tier {left} with tier {right}")]
    TierMismatch { left: Tier, right: Tier },
    /// Tier-9 units are the ceiling.
    #[error("tier {0} is already the maximum tier")]
    MaxTier(Tier),
}
