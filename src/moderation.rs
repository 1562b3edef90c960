//! Logo Moderation State Machine
//!
//! Governs visibility of logo-type sponsor entries: every uploaded logo
//! enters review as `pending` and must be explicitly approved before the
//! public renderer will place it. `approved` and `rejected` are terminal,
//! with one exception: uploading a replacement logo re-enters review as
//! `pending` on the same entry.

use crate::error::SponsorBoardError;
use crate::sponsor::SponsorEntry;
use crate::types::{LogoApprovalStatus, SponsorType};
use thiserror::Error;

/// Errors from moderation actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModerationError {
    /// Attempted to approve/reject an entry already in a terminal state
    #[error("logo is already {current}; terminal moderation states cannot be re-decided")]
    TerminalTransition { current: LogoApprovalStatus },

    /// Moderation action on a non-logo entry
    #[error("entry is a {sponsor_type} sponsor; only logo entries are moderated")]
    NotALogo { sponsor_type: SponsorType },

    /// Rejection without a reason for the sponsor
    #[error("rejection requires a non-empty reason")]
    MissingReason,
}

impl From<ModerationError> for SponsorBoardError {
    fn from(err: ModerationError) -> Self {
        match err {
            ModerationError::MissingReason => SponsorBoardError::Validation(err.to_string()),
            _ => SponsorBoardError::State(err.to_string()),
        }
    }
}

/// Approve a pending logo, making it eligible for public rendering.
///
/// # Errors
///
/// - `NotALogo` for text entries
/// - `TerminalTransition` if the logo was already decided
pub fn approve(entry: &mut SponsorEntry) -> Result<(), ModerationError> {
    ensure_logo(entry)?;
    if entry.logo_approval.is_terminal() {
        return Err(ModerationError::TerminalTransition {
            current: entry.logo_approval,
        });
    }
    entry.logo_approval = LogoApprovalStatus::Approved;
    entry.rejection_reason = None;
    log::info!(
        "logo approved: entry {} ({})",
        entry.id,
        entry.display_name
    );
    Ok(())
}

/// Reject a pending logo with a reason surfaced to the sponsor.
///
/// # Errors
///
/// - `NotALogo` for text entries
/// - `MissingReason` if `reason` is empty or whitespace
/// - `TerminalTransition` if the logo was already decided
pub fn reject(entry: &mut SponsorEntry, reason: &str) -> Result<(), ModerationError> {
    ensure_logo(entry)?;
    if reason.trim().is_empty() {
        return Err(ModerationError::MissingReason);
    }
    if entry.logo_approval.is_terminal() {
        return Err(ModerationError::TerminalTransition {
            current: entry.logo_approval,
        });
    }
    entry.logo_approval = LogoApprovalStatus::Rejected;
    entry.rejection_reason = Some(reason.trim().to_string());
    log::info!(
        "logo rejected: entry {} ({}): {}",
        entry.id,
        entry.display_name,
        reason.trim()
    );
    Ok(())
}

/// Replace the entry's logo and re-enter review.
///
/// This is the one permitted exit from a terminal state: a new upload
/// resets the same entry to `pending` and clears any rejection reason.
///
/// # Errors
///
/// - `NotALogo` for text entries
pub fn resubmit(entry: &mut SponsorEntry, logo_url: &str) -> Result<(), ModerationError> {
    ensure_logo(entry)?;
    entry.logo_url = Some(logo_url.to_string());
    entry.logo_approval = LogoApprovalStatus::Pending;
    entry.rejection_reason = None;
    log::info!(
        "logo resubmitted: entry {} ({}) back to pending review",
        entry.id,
        entry.display_name
    );
    Ok(())
}

fn ensure_logo(entry: &SponsorEntry) -> Result<(), ModerationError> {
    if entry.sponsor_type != SponsorType::Logo {
        return Err(ModerationError::NotALogo {
            sponsor_type: entry.sponsor_type,
        });
    }
    Ok(())
}
