//! Error handling module for sponsorboard
//!
//! Provides centralized error handling with proper error types using thiserror.
//! All errors in the engine should use these types for consistency.

use crate::types::PositionId;
use thiserror::Error;

/// A claim lost a race or targeted an occupied slot.
///
/// Recoverable by the caller choosing another position; the ledger never
/// retries on its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    /// Another sponsor holds an active claim on this position
    #[error("position '{position}' is already taken")]
    PositionAlreadyTaken { position: PositionId },
}

/// Main error type for sponsorboard operations
#[derive(Error, Debug)]
pub enum SponsorBoardError {
    /// Claim conflicts (lost race for a position)
    #[error("conflict: {0}")]
    Conflict(#[from] ConflictError),

    /// Validation errors (invalid pricing config, closed campaign,
    /// campaign type mismatch, missing rejection reason)
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown campaign, position, or sponsor entry
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid state transition (terminal moderation state, settled claim)
    #[error("state error: {0}")]
    State(String),

    /// IO errors (campaign file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for sponsorboard operations
pub type Result<T> = std::result::Result<T, SponsorBoardError>;

// Convenient error constructors
impl SponsorBoardError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a state error
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Create a position-taken conflict
    pub fn position_taken(position: impl Into<PositionId>) -> Self {
        Self::Conflict(ConflictError::PositionAlreadyTaken {
            position: position.into(),
        })
    }

    /// Check if this error is a lost claim race
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SponsorBoardError::validation("campaign is closed");
        assert_eq!(err.to_string(), "validation error: campaign is closed");

        let err = SponsorBoardError::not_found("campaign 'shirt-2026'");
        assert_eq!(err.to_string(), "not found: campaign 'shirt-2026'");
    }

    #[test]
    fn test_conflict_display_names_position() {
        let err = SponsorBoardError::position_taken("3");
        assert!(err.is_conflict());
        assert!(err.to_string().contains("'3'"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SponsorBoardError = io_err.into();
        assert!(matches!(err, SponsorBoardError::Io(_)));
    }

    #[test]
    fn test_error_constructors() {
        let err = SponsorBoardError::state("already approved");
        assert!(matches!(err, SponsorBoardError::State(_)));
        assert!(!err.is_conflict());
    }
}
