//! Report lifecycle: submission, two-stage review, resubmission
//!
//! The chain is fixed at two stages. A report enters at Submitted, a
//! delegation head (derived privilege, never a stored role) passes or
//! turns it back, and a commissioner general gives the final word. A
//! rejection at either stage sends the report back to its submitter, who
//! may revise and resubmit; resubmission clears both review stages and
//! bumps the version counter. Every transition is guarded by the current
//! status, so a review that raced a resubmission is rejected instead of
//! being applied to stale state.

use crate::PrivilegeDeriver;
use chrono::Utc;
use plenary_store::MemoryStore;
use plenary_types::{
    DelegateId, PlenaryError, PlenaryResult, RecordKind, Report, ReportDraft, ReportId,
    ReportRevision, ReportStatus, ReviewRecord, RoleTag,
};
use tracing::{info, warn};

/// Drives reports through the two-stage approval chain
#[derive(Clone, Copy, Debug, Default)]
pub struct ReportLifecycle {
    privilege: PrivilegeDeriver,
}

impl ReportLifecycle {
    pub fn new() -> Self {
        Self {
            privilege: PrivilegeDeriver::new(),
        }
    }

    /// File a new progress report.
    ///
    /// Content rules are checked first and ALL violations are reported
    /// together. The report must target an existing assignment whose
    /// resolution is still open for work, and the submitter must belong
    /// to the assignment's subcommittee.
    pub fn submit(&self, store: &mut MemoryStore, draft: ReportDraft) -> PlenaryResult<Report> {
        let violations = draft_violations(&draft);
        let (Some(resolution_id), Some(subcommittee_id), Some(details), Some(performance)) = (
            draft.resolution_id.clone(),
            draft.subcommittee_id.clone(),
            draft.progress_details.clone(),
            draft.performance_percentage,
        ) else {
            return Err(PlenaryError::ValidationFailed { violations });
        };
        if !violations.is_empty() {
            warn!(count = violations.len(), "report draft failed validation");
            return Err(PlenaryError::ValidationFailed { violations });
        }

        let resolution = store
            .resolution(&resolution_id)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Resolution, &resolution_id))?;
        if store.subcommittee(&subcommittee_id).is_none() {
            return Err(PlenaryError::not_found(
                RecordKind::Subcommittee,
                &subcommittee_id,
            ));
        }
        let submitter = store
            .delegate(&draft.submitted_by)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Delegate, &draft.submitted_by))?;

        if store.assignment_for(&resolution_id, &subcommittee_id).is_none() {
            return Err(PlenaryError::not_found(
                RecordKind::Assignment,
                format!("{}/{}", resolution_id, subcommittee_id),
            ));
        }
        if !resolution.status.accepts_reports() {
            return Err(PlenaryError::bad_transition(format!(
                "reports may only be filed while the resolution is assigned or in progress, found {:?}",
                resolution.status
            )));
        }
        if !submitter.belongs_to(&subcommittee_id) {
            return Err(PlenaryError::denied(
                "only members of the assigned subcommittee may file its reports",
            ));
        }

        let report = Report {
            id: ReportId::generate(),
            resolution_id,
            subcommittee_id,
            submitted_by: draft.submitted_by.clone(),
            performance_percentage: performance,
            progress_details: details,
            hindrances: draft.hindrances.clone(),
            status: ReportStatus::Submitted,
            delegation_head_review: None,
            commissioner_review: None,
            submitted_at: Utc::now(),
            updated_at: None,
            is_final: false,
            version: 1,
        };
        let id = store.insert_report(report.clone());
        info!(report = %id, submitter = %report.submitted_by, "progress report submitted");
        Ok(report)
    }

    /// First-stage review by a delegation head.
    ///
    /// The reviewer's authority is derived at call time; the report must
    /// currently be Submitted.
    pub fn review_by_delegation_head(
        &self,
        store: &mut MemoryStore,
        report_id: &ReportId,
        reviewer_id: &DelegateId,
        approved: bool,
        comments: Option<String>,
    ) -> PlenaryResult<Report> {
        if store.delegate(reviewer_id).is_none() {
            return Err(PlenaryError::not_found(RecordKind::Delegate, reviewer_id));
        }
        if !self.privilege.has_review_privilege_by_id(store, reviewer_id) {
            return Err(PlenaryError::denied(
                "only a delegation head may perform first-stage review",
            ));
        }

        let report = store
            .report_mut(report_id)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Report, report_id))?;
        if report.status != ReportStatus::Submitted {
            return Err(PlenaryError::bad_transition(format!(
                "first-stage review requires a submitted report, found {:?}",
                report.status
            )));
        }

        report.delegation_head_review = Some(ReviewRecord::new(reviewer_id.clone(), comments));
        report.status = if approved {
            ReportStatus::ApprovedByDelegationHead
        } else {
            ReportStatus::RejectedByDelegationHead
        };
        report.updated_at = Some(Utc::now());

        info!(
            report = %report_id,
            reviewer = %reviewer_id,
            approved,
            "first-stage review recorded"
        );
        Ok(report.clone())
    }

    /// Second-stage review by a commissioner general.
    ///
    /// Only legal once the report cleared stage one; approval here is
    /// terminal and marks the report final.
    pub fn review_by_commissioner(
        &self,
        store: &mut MemoryStore,
        report_id: &ReportId,
        reviewer_id: &DelegateId,
        approved: bool,
        comments: Option<String>,
    ) -> PlenaryResult<Report> {
        let reviewer = store
            .delegate(reviewer_id)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Delegate, reviewer_id))?;
        if reviewer.role != RoleTag::CommissionerGeneral {
            return Err(PlenaryError::denied(
                "only a commissioner general may perform final review",
            ));
        }

        let report = store
            .report_mut(report_id)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Report, report_id))?;
        if report.status != ReportStatus::ApprovedByDelegationHead {
            return Err(PlenaryError::bad_transition(format!(
                "final review requires first-stage approval, found {:?}",
                report.status
            )));
        }

        report.commissioner_review = Some(ReviewRecord::new(reviewer_id.clone(), comments));
        if approved {
            report.status = ReportStatus::ApprovedByCommissioner;
            report.is_final = true;
        } else {
            report.status = ReportStatus::RejectedByCommissioner;
        }
        report.updated_at = Some(Utc::now());

        info!(
            report = %report_id,
            reviewer = %reviewer_id,
            approved,
            "final review recorded"
        );
        Ok(report.clone())
    }

    /// Resubmit a rejected report with revised content.
    ///
    /// Only the original submitter, only from a rejected state, and only
    /// while the resolution still accepts reports. The review chain is
    /// cleared and the version counter incremented.
    pub fn resubmit(
        &self,
        store: &mut MemoryStore,
        report_id: &ReportId,
        submitter_id: &DelegateId,
        revision: ReportRevision,
    ) -> PlenaryResult<Report> {
        let report = store
            .report(report_id)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Report, report_id))?;
        if &report.submitted_by != submitter_id {
            return Err(PlenaryError::denied(
                "only the original submitter may resubmit a report",
            ));
        }
        if !report.status.is_rejected() {
            return Err(PlenaryError::bad_transition(format!(
                "resubmission is only allowed from a rejected state, found {:?}",
                report.status
            )));
        }
        let resolution = store
            .resolution(&report.resolution_id)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Resolution, &report.resolution_id))?;
        if !resolution.status.accepts_reports() {
            return Err(PlenaryError::bad_transition(format!(
                "reports may only be filed while the resolution is assigned or in progress, found {:?}",
                resolution.status
            )));
        }

        let violations = content_violations(
            revision.progress_details.as_deref(),
            revision.performance_percentage,
        );
        let (Some(details), Some(performance)) = (
            revision.progress_details.clone(),
            revision.performance_percentage,
        ) else {
            return Err(PlenaryError::ValidationFailed { violations });
        };
        if !violations.is_empty() {
            return Err(PlenaryError::ValidationFailed { violations });
        }

        let report = store
            .report_mut(report_id)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Report, report_id))?;
        report.progress_details = details;
        report.hindrances = revision.hindrances.clone();
        report.performance_percentage = performance;
        report.status = ReportStatus::Submitted;
        report.clear_reviews();
        report.version += 1;
        report.submitted_at = Utc::now();
        report.updated_at = Some(Utc::now());

        info!(report = %report_id, version = report.version, "report resubmitted");
        Ok(report.clone())
    }
}

/// Content rules shared by submission and resubmission. Collects every
/// violation rather than stopping at the first.
fn content_violations(details: Option<&str>, performance: Option<u32>) -> Vec<String> {
    let mut violations = Vec::new();

    match details.map(str::trim) {
        None | Some("") => violations.push("progress details are required".to_string()),
        Some(trimmed) if trimmed.chars().count() < 10 => {
            violations.push("progress details must be at least 10 characters long".to_string());
        }
        Some(_) => {}
    }

    match performance {
        None => violations.push("performance percentage is required".to_string()),
        Some(p) if p > 100 => {
            violations.push("performance percentage must be between 0 and 100".to_string());
        }
        Some(_) => {}
    }

    violations
}

fn draft_violations(draft: &ReportDraft) -> Vec<String> {
    let mut violations = content_violations(
        draft.progress_details.as_deref(),
        draft.performance_percentage,
    );
    if draft.resolution_id.is_none() {
        violations.push("resolution is required".to_string());
    }
    if draft.subcommittee_id.is_none() {
        violations.push("subcommittee is required".to_string());
    }
    violations
}
