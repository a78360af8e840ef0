//! Error types shared across the tracker
//!
//! Every rejected operation returns one of these kinds together with a
//! human-readable detail; the calling layer maps them to its own
//! transport-level signals. Mail and notification failures are NOT here:
//! dispatch is best-effort and recovered at the recipient level.

use thiserror::Error;

/// Convenience alias used throughout the workspace
pub type PlenaryResult<T> = Result<T, PlenaryError>;

/// The record kinds a NotFound can point at
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Country,
    Meeting,
    Subcommittee,
    Delegate,
    Resolution,
    Assignment,
    Report,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Country => "country",
            Self::Meeting => "meeting",
            Self::Subcommittee => "subcommittee",
            Self::Delegate => "delegate",
            Self::Resolution => "resolution",
            Self::Assignment => "assignment",
            Self::Report => "report",
        };
        write!(f, "{}", label)
    }
}

/// Failure results of the core operations
#[derive(Error, Clone, Debug, PartialEq)]
pub enum PlenaryError {
    /// A referenced record does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: String },

    /// One or more content rules were violated. The payload carries every
    /// violation, not just the first.
    #[error("validation failed: {}", violations.join("; "))]
    ValidationFailed { violations: Vec<String> },

    /// Contribution weights for a resolution did not sum to 100
    #[error("contribution weights must sum to 100, got {actual}")]
    WeightSumInvalid { actual: u32 },

    /// The actor lacks the required privilege or jurisdiction
    #[error("permission denied: {reason}")]
    PermissionDenied { reason: String },

    /// The operation is not legal from the record's current state
    #[error("invalid state transition: {detail}")]
    InvalidStateTransition { detail: String },
}

impl PlenaryError {
    /// Shorthand for NotFound with a displayable id
    pub fn not_found(kind: RecordKind, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Shorthand for PermissionDenied
    pub fn denied(reason: impl Into<String>) -> Self {
        Self::PermissionDenied {
            reason: reason.into(),
        }
    }

    /// Shorthand for InvalidStateTransition
    pub fn bad_transition(detail: impl Into<String>) -> Self {
        Self::InvalidStateTransition {
            detail: detail.into(),
        }
    }
}
