//! Flat read-model views returned to callers
//!
//! Query operations return these instead of raw records so callers get
//! denormalized rows (ids plus resolved names) without reaching into the
//! store themselves.

use crate::{
    AssignmentId, AssignmentStatus, DelegateId, ReportId, ReportStatus, ResolutionId,
    SubcommitteeId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One assignment row, with the subcommittee name resolved
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssignmentView {
    pub id: AssignmentId,
    pub resolution_id: ResolutionId,
    pub subcommittee_id: SubcommitteeId,
    pub subcommittee_name: String,
    pub weight: u32,
    pub assigned_by: DelegateId,
    pub assigned_at: DateTime<Utc>,
    pub status: AssignmentStatus,
}

/// One report row as it appears in a progress summary
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportView {
    pub id: ReportId,
    pub resolution_id: ResolutionId,
    pub subcommittee_id: SubcommitteeId,
    pub submitted_by: DelegateId,
    pub performance_percentage: u32,
    pub status: ReportStatus,
    pub version: u32,
    pub submitted_at: DateTime<Utc>,
}

/// Resolution-level completion summary.
///
/// `overall` is the weight-sum of per-group reported performance: each
/// report contributes `performance * weight / 100` for the assignment of
/// the same subcommittee. Reports without a matching live assignment
/// contribute zero. The assignment-time sum-to-100 invariant is trusted
/// here, not re-verified.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub resolution_id: ResolutionId,
    pub overall: f64,
    pub total_assignments: usize,
    pub total_reports: usize,
    pub assignments: Vec<AssignmentView>,
    pub reports: Vec<ReportView>,
}
