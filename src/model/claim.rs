//! Claim signals and their resolution outcomes.

use super::reiatsu_player::PlayerClass;

/// Kind of marker posted to a spawn channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Real,
    Decoy,
}

/// A user attempted to claim a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimSignal {
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub user_id: u64,
}

/// Result of resolving a claim signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The claimant won the pending real marker.
    Captured {
        user_id: u64,
        gain: u64,
        is_rare: bool,
        class: PlayerClass,
    },
    /// A decoy was claimed; its owner got paid, the claimant got nothing.
    DecoyTriggered {
        owner_id: u64,
        claimant_id: u64,
        gain: u64,
    },
    /// Stale, duplicate or unrelated claim.
    Ignored,
}
