//! Resolutions and their assignments
//!
//! A resolution is an actionable decision produced by a meeting. It is
//! distributed across subcommittees as a set of weighted assignments; the
//! live assignments for one resolution must carry weights summing to
//! exactly 100 before the resolution counts as fully distributed.

use crate::{AssignmentId, DelegateId, MeetingId, ResolutionId, SubcommitteeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Resolution ───────────────────────────────────────────────────────

/// Lifecycle state of a resolution
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ResolutionStatus {
    /// Created, awaiting distribution to subcommittees
    #[default]
    Assigned,
    /// Distributed; subcommittees are working and reporting
    InProgress,
    /// All work concluded
    Completed,
    /// Withdrawn by an authorized actor
    Cancelled,
}

impl ResolutionStatus {
    /// Reports may only be filed while the resolution is open for work
    pub fn accepts_reports(&self) -> bool {
        matches!(self, Self::Assigned | Self::InProgress)
    }
}

/// An actionable decision produced by a meeting
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Resolution {
    /// Unique identifier
    pub id: ResolutionId,
    /// Resolution title
    pub title: String,
    /// Free-text description
    pub description: String,
    /// The meeting that produced this resolution
    pub meeting_id: MeetingId,
    /// Who recorded the resolution
    pub created_by: DelegateId,
    /// Current lifecycle state. Advances only through explicit transition
    /// calls; distribution is the one step that moves Assigned to
    /// InProgress on the caller's behalf.
    pub status: ResolutionStatus,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When the record was last updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resolution {
    /// Create a new resolution in the Assigned state
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        meeting_id: MeetingId,
        created_by: DelegateId,
    ) -> Self {
        Self {
            id: ResolutionId::generate(),
            title: title.into(),
            description: description.into(),
            meeting_id,
            created_by,
            status: ResolutionStatus::Assigned,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Move to a new status, stamping the update time
    pub fn set_status(&mut self, status: ResolutionStatus) {
        self.status = status;
        self.updated_at = Some(Utc::now());
    }
}

// ── Assignment ───────────────────────────────────────────────────────

/// Lifecycle state of a single assignment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AssignmentStatus {
    #[default]
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

/// A proposed (subcommittee, weight) share, as submitted by the caller.
/// Weights are integer percentages; the validator enforces that one
/// resolution's shares sum to exactly 100.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSpec {
    /// The responsible group
    pub subcommittee_id: SubcommitteeId,
    /// Contribution weight (integer percent)
    pub weight: u32,
}

impl ShareSpec {
    pub fn new(subcommittee_id: SubcommitteeId, weight: u32) -> Self {
        Self {
            subcommittee_id,
            weight,
        }
    }
}

/// A persisted link between a resolution and one responsible group.
/// Assignments are replaced as a whole set, never patched row by row, so
/// the sum-to-100 invariant is kept atomic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier
    pub id: AssignmentId,
    /// The resolution being distributed
    pub resolution_id: ResolutionId,
    /// The responsible group
    pub subcommittee_id: SubcommitteeId,
    /// Contribution weight (integer percent)
    pub weight: u32,
    /// Who created the assignment
    pub assigned_by: DelegateId,
    /// Current lifecycle state
    pub status: AssignmentStatus,
    /// When the assignment was created
    pub assigned_at: DateTime<Utc>,
}

impl Assignment {
    pub fn new(
        resolution_id: ResolutionId,
        subcommittee_id: SubcommitteeId,
        weight: u32,
        assigned_by: DelegateId,
    ) -> Self {
        Self {
            id: AssignmentId::generate(),
            resolution_id,
            subcommittee_id,
            weight,
            assigned_by,
            status: AssignmentStatus::Assigned,
            assigned_at: Utc::now(),
        }
    }
}
