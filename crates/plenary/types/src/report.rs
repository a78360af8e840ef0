//! Progress reports and the two-stage review chain
//!
//! A report is a subcommittee's self-assessment against its assignment.
//! It enters at Submitted, is reviewed first by a delegation head and then
//! by a commissioner. A rejection at either stage is not terminal: the
//! submitter may revise and resubmit, which resets the chain and bumps the
//! version counter.

use crate::{DelegateId, ReportId, ResolutionId, SubcommitteeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Status ───────────────────────────────────────────────────────────

/// Position of a report in the review chain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReportStatus {
    /// Filed and awaiting first-stage review
    #[default]
    Submitted,
    /// Cleared the delegation-head stage, awaiting the commissioner
    ApprovedByDelegationHead,
    /// Turned back at the delegation-head stage
    RejectedByDelegationHead,
    /// Cleared both stages; the report is final
    ApprovedByCommissioner,
    /// Turned back at the commissioner stage
    RejectedByCommissioner,
}

impl ReportStatus {
    /// Rejected at either stage; the submitter may revise and resubmit
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            Self::RejectedByDelegationHead | Self::RejectedByCommissioner
        )
    }

    /// Final approval is the only terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ApprovedByCommissioner)
    }
}

// ── Review record ────────────────────────────────────────────────────

/// One completed review: who, what they said, when
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// The reviewing delegate
    pub reviewer_id: DelegateId,
    /// Reviewer comments, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// When the review happened
    pub reviewed_at: DateTime<Utc>,
}

impl ReviewRecord {
    pub fn new(reviewer_id: DelegateId, comments: Option<String>) -> Self {
        Self {
            reviewer_id,
            comments,
            reviewed_at: Utc::now(),
        }
    }
}

// ── Report ───────────────────────────────────────────────────────────

/// A subcommittee's progress report against one assignment
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    /// Unique identifier
    pub id: ReportId,
    /// The resolution reported against
    pub resolution_id: ResolutionId,
    /// The reporting subcommittee
    pub subcommittee_id: SubcommitteeId,
    /// The delegate who filed the report
    pub submitted_by: DelegateId,
    /// Self-assessed completion (integer percent, 0-100). Stored as
    /// submitted; never recomputed or overwritten by the system.
    pub performance_percentage: u32,
    /// What was done
    pub progress_details: String,
    /// What stood in the way
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hindrances: Option<String>,
    /// Position in the review chain
    pub status: ReportStatus,
    /// First-stage (delegation head) review, once performed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegation_head_review: Option<ReviewRecord>,
    /// Second-stage (commissioner) review, once performed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commissioner_review: Option<ReviewRecord>,
    /// When the report was (last) submitted
    pub submitted_at: DateTime<Utc>,
    /// When the record was last updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Set when the report clears the final stage
    pub is_final: bool,
    /// Submission counter; starts at 1 and increments on every resubmission
    pub version: u32,
}

impl Report {
    /// Clear both review stages, used when a rejected report is resubmitted
    pub fn clear_reviews(&mut self) {
        self.delegation_head_review = None;
        self.commissioner_review = None;
    }
}

// ── Draft and revision ───────────────────────────────────────────────

/// An unvalidated report submission. Fields mirror what a caller sends;
/// the lifecycle validates content and references before anything is
/// persisted, collecting every violated rule rather than the first.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportDraft {
    pub resolution_id: Option<ResolutionId>,
    pub subcommittee_id: Option<SubcommitteeId>,
    pub submitted_by: DelegateId,
    pub performance_percentage: Option<u32>,
    pub progress_details: Option<String>,
    pub hindrances: Option<String>,
}

impl ReportDraft {
    pub fn new(submitted_by: DelegateId) -> Self {
        Self {
            resolution_id: None,
            subcommittee_id: None,
            submitted_by,
            performance_percentage: None,
            progress_details: None,
            hindrances: None,
        }
    }

    pub fn for_resolution(mut self, resolution_id: ResolutionId) -> Self {
        self.resolution_id = Some(resolution_id);
        self
    }

    pub fn from_subcommittee(mut self, subcommittee_id: SubcommitteeId) -> Self {
        self.subcommittee_id = Some(subcommittee_id);
        self
    }

    pub fn with_performance(mut self, percentage: u32) -> Self {
        self.performance_percentage = Some(percentage);
        self
    }

    pub fn with_progress_details(mut self, details: impl Into<String>) -> Self {
        self.progress_details = Some(details.into());
        self
    }

    pub fn with_hindrances(mut self, hindrances: impl Into<String>) -> Self {
        self.hindrances = Some(hindrances.into());
        self
    }
}

/// Revised content for resubmitting a rejected report. References are
/// fixed; only the narrative fields and the self-assessment change.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReportRevision {
    pub performance_percentage: Option<u32>,
    pub progress_details: Option<String>,
    pub hindrances: Option<String>,
}

impl ReportRevision {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_performance(mut self, percentage: u32) -> Self {
        self.performance_percentage = Some(percentage);
        self
    }

    pub fn with_progress_details(mut self, details: impl Into<String>) -> Self {
        self.progress_details = Some(details.into());
        self
    }

    pub fn with_hindrances(mut self, hindrances: impl Into<String>) -> Self {
        self.hindrances = Some(hindrances.into());
        self
    }
}
