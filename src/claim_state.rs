//! Position Claim State Machine
//!
//! Authoritative lifecycle of a single position claim. The ledger owns one
//! `ClaimRecord` per actively claimed position and drives it through
//! validated transitions; invalid transitions return errors immediately
//! instead of silently overwriting state.
//!
//! # State Flow
//!
//! ```text
//! Unclaimed
//!     ↓ claim
//! Pending
//!     ↓ payment succeeded        ↓ payment failed / hold expired
//! Paid (terminal)            Unclaimed (position released)
//! ```
//!
//! `Paid` is terminal for the ledger: refunds and removals are a distinct
//! operation outside this engine.

use crate::types::{EntryId, PositionId};
use std::fmt;
use thiserror::Error;

/// Lifecycle state of a position claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ClaimState {
    /// No active claimant; position is available
    Unclaimed = 0,
    /// Provisionally reserved, awaiting payment confirmation
    Pending = 1,
    /// Payment confirmed (terminal for the ledger)
    Paid = 2,
}

impl ClaimState {
    /// Returns true if this state holds the position against other claims
    #[inline]
    pub const fn occupies(self) -> bool {
        matches!(self, Self::Pending | Self::Paid)
    }

    /// Returns true if no further claim transitions are possible
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Paid)
    }

    /// Returns a human-readable description of this state
    pub const fn description(self) -> &'static str {
        match self {
            Self::Unclaimed => "unclaimed",
            Self::Pending => "pending payment",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for ClaimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur during claim transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    /// Attempted to settle a claim that is already paid
    #[error("claim on position '{position}' is already settled as paid")]
    AlreadySettled { position: PositionId },

    /// Attempted to settle or release a claim that is not pending
    #[error("claim on position '{position}' is {state}, expected pending")]
    NotPending { position: PositionId, state: ClaimState },
}

impl From<ClaimError> for crate::error::SponsorBoardError {
    fn from(err: ClaimError) -> Self {
        crate::error::SponsorBoardError::State(err.to_string())
    }
}

/// The ledger's record of one active claim.
///
/// Records exist only while a position is occupied; releasing a claim
/// removes the record, returning the position to the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRecord {
    position_id: PositionId,
    entry_id: EntryId,
    state: ClaimState,
    /// Unix seconds when the claim was made; drives the expiry sweep
    claimed_at: u64,
}

impl ClaimRecord {
    /// Create a fresh pending claim
    pub fn pending(position_id: PositionId, entry_id: EntryId, claimed_at: u64) -> Self {
        Self {
            position_id,
            entry_id,
            state: ClaimState::Pending,
            claimed_at,
        }
    }

    #[inline]
    pub fn position_id(&self) -> &PositionId {
        &self.position_id
    }

    #[inline]
    pub fn entry_id(&self) -> EntryId {
        self.entry_id
    }

    #[inline]
    pub fn state(&self) -> ClaimState {
        self.state
    }

    #[inline]
    pub fn claimed_at(&self) -> u64 {
        self.claimed_at
    }

    /// Age of the claim in seconds at `now`
    #[inline]
    pub fn age_at(&self, now: u64) -> u64 {
        now.saturating_sub(self.claimed_at)
    }

    /// Mark the claim paid.
    ///
    /// # Errors
    ///
    /// - `AlreadySettled` if the claim is already paid
    pub fn settle(&mut self) -> Result<(), ClaimError> {
        match self.state {
            ClaimState::Pending => {
                self.state = ClaimState::Paid;
                Ok(())
            }
            ClaimState::Paid => Err(ClaimError::AlreadySettled {
                position: self.position_id.clone(),
            }),
            ClaimState::Unclaimed => Err(ClaimError::NotPending {
                position: self.position_id.clone(),
                state: self.state,
            }),
        }
    }

    /// Check that the claim may be released (payment failure or expiry).
    ///
    /// A paid claim is never releasable through this path; the caller must
    /// re-check this inside its critical section so a concurrently
    /// settling payment always wins over an expiry sweep.
    pub fn releasable(&self) -> Result<(), ClaimError> {
        match self.state {
            ClaimState::Pending => Ok(()),
            ClaimState::Paid => Err(ClaimError::AlreadySettled {
                position: self.position_id.clone(),
            }),
            ClaimState::Unclaimed => Err(ClaimError::NotPending {
                position: self.position_id.clone(),
                state: self.state,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ClaimRecord {
        ClaimRecord::pending("3".to_string(), 1, 1000)
    }

    #[test]
    fn test_fresh_claim_is_pending() {
        let claim = record();
        assert_eq!(claim.state(), ClaimState::Pending);
        assert!(claim.state().occupies());
        assert!(!claim.state().is_terminal());
    }

    #[test]
    fn test_settle_pending_claim() {
        let mut claim = record();
        claim.settle().unwrap();
        assert_eq!(claim.state(), ClaimState::Paid);
        assert!(claim.state().is_terminal());
    }

    #[test]
    fn test_settle_twice_is_error() {
        let mut claim = record();
        claim.settle().unwrap();
        let err = claim.settle().unwrap_err();
        assert!(matches!(err, ClaimError::AlreadySettled { .. }));
    }

    #[test]
    fn test_paid_claim_is_not_releasable() {
        let mut claim = record();
        claim.settle().unwrap();
        let err = claim.releasable().unwrap_err();
        assert!(matches!(err, ClaimError::AlreadySettled { .. }));
    }

    #[test]
    fn test_pending_claim_is_releasable() {
        assert!(record().releasable().is_ok());
    }

    #[test]
    fn test_age_at() {
        let claim = record();
        assert_eq!(claim.age_at(1000), 0);
        assert_eq!(claim.age_at(1030), 30);
        // Clock skew backwards never underflows
        assert_eq!(claim.age_at(500), 0);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ClaimState::Unclaimed.to_string(), "unclaimed");
        assert_eq!(ClaimState::Pending.to_string(), "pending payment");
        assert_eq!(ClaimState::Paid.to_string(), "paid");
    }

    #[test]
    fn test_claim_error_converts_to_state_error() {
        let err: crate::error::SponsorBoardError = ClaimError::AlreadySettled {
            position: "3".to_string(),
        }
        .into();
        assert!(matches!(err, crate::error::SponsorBoardError::State(_)));
    }
}
