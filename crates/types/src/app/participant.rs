// Path: crates/types/src/app/participant.rs

//! The identity-keyed record holding all per-participant platform state.

use super::Balance;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Everything the platform tracks about a single identity, independent of any survey.
///
/// An absent record is equivalent to `ParticipantRecord::default()`.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParticipantRecord {
    /// Locked collateral.
    pub stake: Balance,
    /// Open surveys this identity has voted in and not yet been released from.
    pub active_participations: u32,
    /// Timestamp (seconds) of the last vote that refreshed the recency window.
    /// `None` until the identity casts its first vote.
    pub last_qualifying_vote_at: Option<u64>,
}

impl ParticipantRecord {
    /// Returns true iff the identity is bound to at least one open survey.
    pub fn is_participating(&self) -> bool {
        self.active_participations > 0
    }

    /// Releases one active participation, never dropping below zero.
    pub fn release_participation(&mut self) {
        self.active_participations = self.active_participations.saturating_sub(1);
    }
}
