//! Resolution-level progress aggregation
//!
//! Overall completion is the weight-sum of per-group reported
//! performance: each report contributes performance x weight / 100 for
//! the assignment held by the same subcommittee. A report whose group
//! holds no live assignment contributes zero, silently; that is a
//! data-quality gap the aggregator tolerates rather than rejects. The
//! sum-to-100 invariant is trusted from assignment time and NOT
//! re-verified here.

use plenary_store::MemoryStore;
use plenary_types::{
    AssignmentView, PlenaryError, PlenaryResult, ProgressSummary, RecordKind, ReportView,
    ResolutionId,
};

/// Computes resolution completion summaries on demand
#[derive(Clone, Copy, Debug, Default)]
pub struct ProgressAggregator;

impl ProgressAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Summarize one resolution: overall weighted completion plus the
    /// flat assignment and report rows behind the number.
    pub fn progress(
        &self,
        store: &MemoryStore,
        resolution_id: &ResolutionId,
    ) -> PlenaryResult<ProgressSummary> {
        if store.resolution(resolution_id).is_none() {
            return Err(PlenaryError::not_found(RecordKind::Resolution, resolution_id));
        }

        let assignments = store.assignments_for_resolution(resolution_id);
        let reports = store.reports_for_resolution(resolution_id);

        let overall: f64 = reports
            .iter()
            .map(|report| {
                assignments
                    .iter()
                    .find(|a| a.subcommittee_id == report.subcommittee_id)
                    .map(|a| {
                        f64::from(report.performance_percentage) * f64::from(a.weight) / 100.0
                    })
                    .unwrap_or(0.0)
            })
            .sum();

        let assignment_views: Vec<AssignmentView> = assignments
            .iter()
            .map(|a| AssignmentView {
                id: a.id.clone(),
                resolution_id: a.resolution_id.clone(),
                subcommittee_id: a.subcommittee_id.clone(),
                subcommittee_name: store
                    .subcommittee(&a.subcommittee_id)
                    .map(|s| s.name.clone())
                    .unwrap_or_default(),
                weight: a.weight,
                assigned_by: a.assigned_by.clone(),
                assigned_at: a.assigned_at,
                status: a.status,
            })
            .collect();

        let mut report_views: Vec<ReportView> = reports
            .iter()
            .map(|r| ReportView {
                id: r.id.clone(),
                resolution_id: r.resolution_id.clone(),
                subcommittee_id: r.subcommittee_id.clone(),
                submitted_by: r.submitted_by.clone(),
                performance_percentage: r.performance_percentage,
                status: r.status,
                version: r.version,
                submitted_at: r.submitted_at,
            })
            .collect();
        report_views.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at));

        Ok(ProgressSummary {
            resolution_id: resolution_id.clone(),
            total_assignments: assignment_views.len(),
            total_reports: report_views.len(),
            overall,
            assignments: assignment_views,
            reports: report_views,
        })
    }
}
