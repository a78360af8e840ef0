//! The Secretariat: composition root for the tracker core
//!
//! Owns the record store and the dispatch sinks, composes the specialized
//! components (share validator, scope guard, privilege deriver,
//! assignment manager, report lifecycle, progress aggregator) and exposes
//! every operation as a plain function call over plain data. The calling
//! layer (HTTP, CLI) maps the returned errors to its own signals.
//!
//! All state changes inside one call apply before any dispatch happens;
//! notification and mail failures are recovered per recipient and never
//! surface as operation failures.

use crate::dispatch::{
    approval_mail, assignment_mail, forwarded_report_mail, rejection_mail, review_request_mail,
    MailSink, NotificationKind, NotificationSink, TracingMailer, TracingNotifier,
};
use crate::{AssignmentManager, PrivilegeDeriver, ProgressAggregator, ReportLifecycle, ScopeGuard};
use chrono::{DateTime, Utc};
use plenary_store::MemoryStore;
use plenary_types::{
    Assignment, AssignmentView, Country, CountryId, Delegate, DelegateId, Meeting, MeetingId,
    PlenaryError, PlenaryResult, ProgressSummary, RecordKind, Report, ReportDraft, ReportId,
    ReportRevision, ReportStatus, Resolution, ResolutionId, ResolutionStatus, RoleTag, ShareSpec,
    Subcommittee, SubcommitteeId,
};
use tracing::warn;

/// The coordination surface of the tracker
pub struct Secretariat<N = TracingNotifier, M = TracingMailer>
where
    N: NotificationSink,
    M: MailSink,
{
    /// The shared record set (the only shared mutable resource)
    store: MemoryStore,
    /// In-app notification sink, invoked never owned
    notifier: N,
    /// Outbound mail sink, invoked never owned
    mailer: M,
    /// Distribution of resolutions across subcommittees
    assignments: AssignmentManager,
    /// The two-stage report state machine
    reports: ReportLifecycle,
    /// Resolution completion summaries
    aggregator: ProgressAggregator,
    /// Jurisdiction scoping for secretarial roles
    scope: ScopeGuard,
    /// Delegation-head privilege derivation
    privilege: PrivilegeDeriver,
}

impl Secretariat {
    /// A secretariat with an empty store and log-only sinks
    pub fn new() -> Self {
        Self::with_sinks(TracingNotifier, TracingMailer)
    }
}

impl Default for Secretariat {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, M> Secretariat<N, M>
where
    N: NotificationSink,
    M: MailSink,
{
    /// A secretariat with an empty store and the given sinks
    pub fn with_sinks(notifier: N, mailer: M) -> Self {
        Self {
            store: MemoryStore::new(),
            notifier,
            mailer,
            assignments: AssignmentManager::new(),
            reports: ReportLifecycle::new(),
            aggregator: ProgressAggregator::new(),
            scope: ScopeGuard::new(),
            privilege: PrivilegeDeriver::new(),
        }
    }

    /// Wrap an existing record set
    pub fn with_store(store: MemoryStore, notifier: N, mailer: M) -> Self {
        Self {
            store,
            ..Self::with_sinks(notifier, mailer)
        }
    }

    /// Read access to the record set
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// The notification sink (tests read captured notifications here)
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The mail sink (tests read captured mail here)
    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    // ── Record registration ──────────────────────────────────────────

    pub fn register_country(&mut self, name: impl Into<String>) -> CountryId {
        self.store.insert_country(Country::new(name))
    }

    pub fn register_subcommittee(&mut self, name: impl Into<String>) -> SubcommitteeId {
        self.store.insert_subcommittee(Subcommittee::new(name))
    }

    pub fn register_delegate(&mut self, delegate: Delegate) -> DelegateId {
        self.store.insert_delegate(delegate)
    }

    // ── Meetings ─────────────────────────────────────────────────────

    /// Schedule a meeting. Jurisdiction-scoped creators must match the
    /// hosting country.
    pub fn schedule_meeting(
        &mut self,
        title: impl Into<String>,
        hosting_country_id: CountryId,
        created_by: DelegateId,
        scheduled_at: DateTime<Utc>,
    ) -> PlenaryResult<Meeting> {
        let creator = self
            .store
            .delegate(&created_by)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Delegate, &created_by))?
            .clone();
        if self.store.country(&hosting_country_id).is_none() {
            return Err(PlenaryError::not_found(
                RecordKind::Country,
                &hosting_country_id,
            ));
        }
        self.scope
            .authorize_jurisdiction(&self.store, &creator, &hosting_country_id)?;

        let meeting = Meeting::new(title, hosting_country_id, created_by, scheduled_at);
        self.store.insert_meeting(meeting.clone());
        Ok(meeting)
    }

    /// Check whether a delegate may take minutes for a meeting: a
    /// secretarial role acting inside its own jurisdiction.
    pub fn authorize_minute_taking(
        &self,
        actor_id: &DelegateId,
        meeting_id: &MeetingId,
    ) -> PlenaryResult<()> {
        let actor = self
            .store
            .delegate(actor_id)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Delegate, actor_id))?;
        let meeting = self
            .store
            .meeting(meeting_id)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Meeting, meeting_id))?;
        self.scope
            .authorize_meeting_management(&self.store, actor, meeting)
    }

    // ── Resolutions ──────────────────────────────────────────────────

    /// Record a resolution produced by a meeting. It starts in Assigned,
    /// awaiting distribution.
    pub fn create_resolution(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        meeting_id: &MeetingId,
        created_by: &DelegateId,
    ) -> PlenaryResult<Resolution> {
        if self.store.meeting(meeting_id).is_none() {
            return Err(PlenaryError::not_found(RecordKind::Meeting, meeting_id));
        }
        if self.store.delegate(created_by).is_none() {
            return Err(PlenaryError::not_found(RecordKind::Delegate, created_by));
        }

        let resolution = Resolution::new(title, description, meeting_id.clone(), created_by.clone());
        self.store.insert_resolution(resolution.clone());
        Ok(resolution)
    }

    /// Explicit status transition for a resolution
    pub fn update_resolution_status(
        &mut self,
        resolution_id: &ResolutionId,
        status: ResolutionStatus,
    ) -> PlenaryResult<Resolution> {
        let resolution = self
            .store
            .resolution_mut(resolution_id)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Resolution, resolution_id))?;
        resolution.set_status(status);
        Ok(resolution.clone())
    }

    pub fn resolution(&self, id: &ResolutionId) -> Option<&Resolution> {
        self.store.resolution(id)
    }

    pub fn resolutions_for_meeting(&self, meeting_id: &MeetingId) -> Vec<&Resolution> {
        self.store.resolutions_for_meeting(meeting_id)
    }

    pub fn resolutions_by_status(&self, status: ResolutionStatus) -> Vec<&Resolution> {
        self.store.resolutions_by_status(status)
    }

    pub fn resolutions_for_subcommittee(
        &self,
        subcommittee_id: &SubcommitteeId,
    ) -> Vec<&Resolution> {
        self.store.resolutions_for_subcommittee(subcommittee_id)
    }

    // ── Assignment distribution ──────────────────────────────────────

    /// Distribute a resolution across subcommittees and notify every
    /// member of each assigned group. The state change commits before any
    /// dispatch; a failed mail never rolls it back.
    pub fn assign_resolution(
        &mut self,
        resolution_id: &ResolutionId,
        shares: &[ShareSpec],
        actor_id: &DelegateId,
    ) -> PlenaryResult<Vec<Assignment>> {
        let rows = self
            .assignments
            .assign(&mut self.store, resolution_id, shares, actor_id)?;

        let title = self
            .store
            .resolution(resolution_id)
            .map(|r| r.title.clone())
            .unwrap_or_default();
        for row in &rows {
            let group_name = self
                .store
                .subcommittee(&row.subcommittee_id)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            let members: Vec<Delegate> = self
                .store
                .delegates_in_subcommittee(&row.subcommittee_id)
                .into_iter()
                .cloned()
                .collect();
            for member in members {
                self.notifier.notify(
                    &member.id,
                    "New Task Assignment",
                    &format!(
                        "A new resolution has been assigned to your subcommittee: {} (Contribution: {}%)",
                        title, row.weight
                    ),
                    NotificationKind::TaskAssignment,
                    RecordKind::Resolution,
                    &row.resolution_id.0,
                );
                let (subject, body) =
                    assignment_mail(&member.name, &group_name, &title, row.weight);
                self.mail_best_effort(&member.email, &member.name, &subject, &body);
            }
        }
        Ok(rows)
    }

    /// Replace the whole assignment set of a resolution (corrections).
    /// Silent: replacement does not re-notify members.
    pub fn replace_assignments(
        &mut self,
        resolution_id: &ResolutionId,
        shares: &[ShareSpec],
        actor_id: &DelegateId,
    ) -> PlenaryResult<Vec<Assignment>> {
        self.assignments
            .replace_all(&mut self.store, resolution_id, shares, actor_id)
    }

    pub fn list_assignments(
        &self,
        resolution_id: &ResolutionId,
    ) -> PlenaryResult<Vec<AssignmentView>> {
        self.assignments.list(&self.store, resolution_id)
    }

    /// Resolution completion summary
    pub fn resolution_progress(
        &self,
        resolution_id: &ResolutionId,
    ) -> PlenaryResult<ProgressSummary> {
        self.aggregator.progress(&self.store, resolution_id)
    }

    // ── Reports ──────────────────────────────────────────────────────

    /// File a progress report and notify the delegation heads. The
    /// candidate pool is every chair and vice chair; authority is derived
    /// per candidate and only the privileged subset is notified.
    pub fn submit_report(&mut self, draft: ReportDraft) -> PlenaryResult<Report> {
        let report = self.reports.submit(&mut self.store, draft)?;
        self.notify_delegation_heads(&report);
        Ok(report)
    }

    /// First-stage review. Approval forwards the report to the
    /// commissioners; rejection sends it back to the submitter with the
    /// reviewer's comments.
    pub fn review_report_by_delegation_head(
        &mut self,
        report_id: &ReportId,
        reviewer_id: &DelegateId,
        approved: bool,
        comments: Option<String>,
    ) -> PlenaryResult<Report> {
        let report = self.reports.review_by_delegation_head(
            &mut self.store,
            report_id,
            reviewer_id,
            approved,
            comments,
        )?;

        let title = self.resolution_title(&report.resolution_id);
        let review_comments = report
            .delegation_head_review
            .as_ref()
            .and_then(|r| r.comments.clone());

        if report.status == ReportStatus::ApprovedByDelegationHead {
            let commissioners: Vec<Delegate> = self
                .store
                .delegates_with_role(RoleTag::CommissionerGeneral)
                .into_iter()
                .cloned()
                .collect();
            for commissioner in commissioners {
                self.notifier.notify(
                    &commissioner.id,
                    "Report Approved by Delegation Head",
                    &format!(
                        "A report for '{}' has been approved and forwarded for final review",
                        title
                    ),
                    NotificationKind::ReportApproval,
                    RecordKind::Report,
                    &report.id.0,
                );
                let (subject, body) = forwarded_report_mail(&commissioner.name, &title);
                self.mail_best_effort(&commissioner.email, &commissioner.name, &subject, &body);
            }

            if let Some(submitter) = self.store.delegate(&report.submitted_by).cloned() {
                self.notifier.notify(
                    &submitter.id,
                    "Report Approved",
                    &format!(
                        "Your report for '{}' has been approved and forwarded to the commissioner general",
                        title
                    ),
                    NotificationKind::ReportApproval,
                    RecordKind::Report,
                    &report.id.0,
                );
                let (subject, body) =
                    approval_mail(&submitter.name, &title, review_comments.as_deref());
                self.mail_best_effort(&submitter.email, &submitter.name, &subject, &body);
            }
        } else if let Some(submitter) = self.store.delegate(&report.submitted_by).cloned() {
            let comment_text = review_comments.clone().unwrap_or_default();
            self.notifier.notify(
                &submitter.id,
                "Report Rejected",
                &format!(
                    "Your report for '{}' has been rejected. Comments: {}",
                    title, comment_text
                ),
                NotificationKind::ReportRejection,
                RecordKind::Report,
                &report.id.0,
            );
            let (subject, body) =
                rejection_mail(&submitter.name, &title, review_comments.as_deref());
            self.mail_best_effort(&submitter.email, &submitter.name, &subject, &body);
        }

        Ok(report)
    }

    /// Final review by a commissioner general. The submitter learns the
    /// outcome either way.
    pub fn review_report_by_commissioner(
        &mut self,
        report_id: &ReportId,
        reviewer_id: &DelegateId,
        approved: bool,
        comments: Option<String>,
    ) -> PlenaryResult<Report> {
        let report = self.reports.review_by_commissioner(
            &mut self.store,
            report_id,
            reviewer_id,
            approved,
            comments,
        )?;

        let title = self.resolution_title(&report.resolution_id);
        if let Some(submitter) = self.store.delegate(&report.submitted_by).cloned() {
            if report.status == ReportStatus::ApprovedByCommissioner {
                self.notifier.notify(
                    &submitter.id,
                    "Report Finalized",
                    &format!("Your report for '{}' has received final approval", title),
                    NotificationKind::ReportApproval,
                    RecordKind::Report,
                    &report.id.0,
                );
            } else {
                self.notifier.notify(
                    &submitter.id,
                    "Report Rejected",
                    &format!(
                        "Your report for '{}' was rejected at final review. Please revise and resubmit",
                        title
                    ),
                    NotificationKind::ReportRejection,
                    RecordKind::Report,
                    &report.id.0,
                );
            }
        }
        Ok(report)
    }

    /// Resubmit a rejected report; the delegation heads are notified
    /// again, exactly as for a first submission.
    pub fn resubmit_report(
        &mut self,
        report_id: &ReportId,
        submitter_id: &DelegateId,
        revision: ReportRevision,
    ) -> PlenaryResult<Report> {
        let report = self
            .reports
            .resubmit(&mut self.store, report_id, submitter_id, revision)?;
        self.notify_delegation_heads(&report);
        Ok(report)
    }

    pub fn report(&self, id: &ReportId) -> Option<&Report> {
        self.store.report(id)
    }

    pub fn reports_for_resolution(&self, resolution_id: &ResolutionId) -> Vec<&Report> {
        self.store.reports_for_resolution(resolution_id)
    }

    pub fn reports_for_subcommittee(&self, subcommittee_id: &SubcommitteeId) -> Vec<&Report> {
        self.store.reports_for_subcommittee(subcommittee_id)
    }

    pub fn reports_by_submitter(&self, delegate_id: &DelegateId) -> Vec<&Report> {
        self.store.reports_by_submitter(delegate_id)
    }

    pub fn reports_by_status(&self, status: ReportStatus) -> Vec<&Report> {
        self.store.reports_by_status(status)
    }

    pub fn reports_reviewed_by_delegation_head(&self, reviewer_id: &DelegateId) -> Vec<&Report> {
        self.store.reports_reviewed_by_delegation_head(reviewer_id)
    }

    pub fn reports_reviewed_by_commissioner(&self, reviewer_id: &DelegateId) -> Vec<&Report> {
        self.store.reports_reviewed_by_commissioner(reviewer_id)
    }

    // ── Privilege queries ────────────────────────────────────────────

    /// Derived delegation-head authority, recomputed on every call
    pub fn has_review_privilege(&self, delegate_id: &DelegateId) -> bool {
        self.privilege
            .has_review_privilege_by_id(&self.store, delegate_id)
    }

    /// Effective role label for display
    pub fn display_role(&self, delegate_id: &DelegateId) -> PlenaryResult<String> {
        let delegate = self
            .store
            .delegate(delegate_id)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Delegate, delegate_id))?;
        Ok(self.privilege.display_role(&self.store, delegate))
    }

    /// Id of the distinguished "Head Of Delegation" subcommittee
    pub fn delegation_group_id(&self) -> Option<SubcommitteeId> {
        self.privilege.delegation_group_id(&self.store)
    }

    pub fn is_delegation_group(&self, subcommittee_id: &SubcommitteeId) -> bool {
        self.privilege.is_delegation_group(&self.store, subcommittee_id)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn resolution_title(&self, resolution_id: &ResolutionId) -> String {
        self.store
            .resolution(resolution_id)
            .map(|r| r.title.clone())
            .unwrap_or_default()
    }

    /// Notify every delegate whose delegation-head authority derives true.
    /// The candidate pool is every chair and vice chair; each candidate is
    /// checked individually against current membership.
    fn notify_delegation_heads(&mut self, report: &Report) {
        let title = self.resolution_title(&report.resolution_id);
        let submitter_name = self
            .store
            .delegate(&report.submitted_by)
            .map(|d| d.name.clone())
            .unwrap_or_default();

        let mut candidates: Vec<Delegate> = self
            .store
            .delegates_with_role(RoleTag::Chair)
            .into_iter()
            .cloned()
            .collect();
        candidates.extend(
            self.store
                .delegates_with_role(RoleTag::ViceChair)
                .into_iter()
                .cloned(),
        );

        let reviewers: Vec<Delegate> = candidates
            .into_iter()
            .filter(|d| self.privilege.has_review_privilege(&self.store, d))
            .collect();

        for reviewer in reviewers {
            self.notifier.notify(
                &reviewer.id,
                "New Report Submission",
                &format!(
                    "A new report has been submitted for '{}' by {}",
                    title, submitter_name
                ),
                NotificationKind::ReportSubmission,
                RecordKind::Report,
                &report.id.0,
            );
            let (subject, body) = review_request_mail(&reviewer.name, &title, &submitter_name);
            self.mail_best_effort(&reviewer.email, &reviewer.name, &subject, &body);
        }
    }

    /// Attempt one mail; a failure is logged and the recipient skipped
    fn mail_best_effort(&mut self, to_address: &str, to_name: &str, subject: &str, body: &str) {
        if let Err(err) = self.mailer.send(to_address, to_name, subject, body) {
            warn!(
                to = to_address,
                error = %err,
                "mail dispatch failed, recipient skipped"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{RecordingMailer, RecordingNotifier};
    use crate::HEAD_OF_DELEGATION;

    type TestSecretariat = Secretariat<RecordingNotifier, RecordingMailer>;

    struct World {
        secretariat: TestSecretariat,
        uganda: CountryId,
        kenya: CountryId,
        customs: SubcommitteeId,
        it: SubcommitteeId,
        secretary_id: DelegateId,
        kenyan_secretary_id: DelegateId,
        customs_chair_id: DelegateId,
        it_chair_id: DelegateId,
        hod_chair_id: DelegateId,
        commissioner_id: DelegateId,
        meeting_id: MeetingId,
        resolution_id: ResolutionId,
    }

    fn world() -> World {
        world_with_mailer(RecordingMailer::new())
    }

    fn world_with_mailer(mailer: RecordingMailer) -> World {
        let mut secretariat = Secretariat::with_sinks(RecordingNotifier::new(), mailer);

        let uganda = secretariat.register_country("Uganda");
        let kenya = secretariat.register_country("Kenya");
        let customs = secretariat.register_subcommittee("Customs");
        let it = secretariat.register_subcommittee("Information Technology");
        let hod = secretariat.register_subcommittee(HEAD_OF_DELEGATION);

        let secretary_id = secretariat.register_delegate(
            Delegate::new("Grace", "grace@example.org", RoleTag::Secretary)
                .with_country(uganda.clone()),
        );
        let kenyan_secretary_id = secretariat.register_delegate(
            Delegate::new("Wanjiku", "wanjiku@example.org", RoleTag::Secretary)
                .with_country(kenya.clone()),
        );
        let customs_chair_id = secretariat.register_delegate(
            Delegate::new("Joy", "joy@example.org", RoleTag::Chair)
                .with_subcommittee(customs.clone()),
        );
        let it_chair_id = secretariat.register_delegate(
            Delegate::new("Peter", "peter@example.org", RoleTag::Chair)
                .with_subcommittee(it.clone()),
        );
        let hod_chair_id = secretariat.register_delegate(
            Delegate::new("Amina", "amina@example.org", RoleTag::Chair)
                .with_subcommittee(hod),
        );
        let commissioner_id = secretariat.register_delegate(Delegate::new(
            "Rose",
            "rose@example.org",
            RoleTag::CommissionerGeneral,
        ));

        let meeting = secretariat
            .schedule_meeting(
                "Council Session",
                uganda.clone(),
                secretary_id.clone(),
                Utc::now(),
            )
            .unwrap();
        let meeting_id = meeting.id;
        let resolution = secretariat
            .create_resolution(
                "Harmonize customs codes",
                "Align tariff schedules",
                &meeting_id,
                &secretary_id,
            )
            .unwrap();

        World {
            secretariat,
            uganda,
            kenya,
            customs,
            it,
            secretary_id,
            kenyan_secretary_id,
            customs_chair_id,
            it_chair_id,
            hod_chair_id,
            commissioner_id,
            meeting_id,
            resolution_id: resolution.id,
        }
    }

    fn default_shares(w: &World) -> Vec<ShareSpec> {
        vec![
            ShareSpec::new(w.customs.clone(), 70),
            ShareSpec::new(w.it.clone(), 30),
        ]
    }

    fn customs_draft(w: &World) -> ReportDraft {
        ReportDraft::new(w.customs_chair_id.clone())
            .for_resolution(w.resolution_id.clone())
            .from_subcommittee(w.customs.clone())
            .with_performance(80)
            .with_progress_details("Tariff schedule drafted and circulated to members")
    }

    #[test]
    fn test_assignment_notifies_group_members() {
        let mut w = world();
        w.secretariat
            .assign_resolution(&w.resolution_id, &default_shares(&w), &w.secretary_id)
            .unwrap();

        let notifier = w.secretariat.notifier();
        assert_eq!(notifier.for_delegate(&w.customs_chair_id).len(), 1);
        assert_eq!(notifier.for_delegate(&w.it_chair_id).len(), 1);
        // The secretary is not a member of any assigned group.
        assert!(notifier.for_delegate(&w.secretary_id).is_empty());

        let mailer = w.secretariat.mailer();
        assert_eq!(mailer.sent.len(), 2);
        assert!(mailer
            .sent
            .iter()
            .any(|m| m.to_address == "joy@example.org" && m.body.contains("70%")));
    }

    #[test]
    fn test_assignment_mail_failure_does_not_abort() {
        let mut w = world_with_mailer(RecordingMailer::new().rejecting("joy@example.org"));
        w.secretariat
            .assign_resolution(&w.resolution_id, &default_shares(&w), &w.secretary_id)
            .unwrap();

        // The failed recipient is skipped, everyone else still gets mail,
        // and the assignment itself stands.
        assert_eq!(w.secretariat.mailer().sent.len(), 1);
        assert_eq!(
            w.secretariat.list_assignments(&w.resolution_id).unwrap().len(),
            2
        );
        // In-app notification still went to the member whose mail bounced.
        assert_eq!(
            w.secretariat.notifier().for_delegate(&w.customs_chair_id).len(),
            1
        );
    }

    #[test]
    fn test_foreign_secretary_cannot_assign() {
        let mut w = world();
        let err = w
            .secretariat
            .assign_resolution(&w.resolution_id, &default_shares(&w), &w.kenyan_secretary_id)
            .unwrap_err();
        assert!(matches!(err, PlenaryError::PermissionDenied { .. }));
        assert!(w.secretariat.notifier().sent.is_empty());
    }

    #[test]
    fn test_submission_notifies_only_derived_reviewers() {
        let mut w = world();
        w.secretariat
            .assign_resolution(&w.resolution_id, &default_shares(&w), &w.secretary_id)
            .unwrap();
        w.secretariat.submit_report(customs_draft(&w)).unwrap();

        let notifier = w.secretariat.notifier();
        let hod_notices = notifier.for_delegate(&w.hod_chair_id);
        assert!(hod_notices
            .iter()
            .any(|n| n.kind == NotificationKind::ReportSubmission));
        // An ordinary chair is in the candidate pool but derives no
        // authority, so no submission notice reaches them.
        assert!(!notifier
            .for_delegate(&w.it_chair_id)
            .iter()
            .any(|n| n.kind == NotificationKind::ReportSubmission));
    }

    #[test]
    fn test_stage_one_approval_forwards_to_commissioners() {
        let mut w = world();
        w.secretariat
            .assign_resolution(&w.resolution_id, &default_shares(&w), &w.secretary_id)
            .unwrap();
        let report = w.secretariat.submit_report(customs_draft(&w)).unwrap();

        w.secretariat
            .review_report_by_delegation_head(
                &report.id,
                &w.hod_chair_id,
                true,
                Some("Well documented".into()),
            )
            .unwrap();

        let notifier = w.secretariat.notifier();
        assert!(notifier
            .for_delegate(&w.commissioner_id)
            .iter()
            .any(|n| n.kind == NotificationKind::ReportApproval));
        assert!(notifier
            .for_delegate(&w.customs_chair_id)
            .iter()
            .any(|n| n.kind == NotificationKind::ReportApproval));
    }

    #[test]
    fn test_stage_one_rejection_reaches_submitter_only() {
        let mut w = world();
        w.secretariat
            .assign_resolution(&w.resolution_id, &default_shares(&w), &w.secretary_id)
            .unwrap();
        let report = w.secretariat.submit_report(customs_draft(&w)).unwrap();

        w.secretariat
            .review_report_by_delegation_head(
                &report.id,
                &w.hod_chair_id,
                false,
                Some("Numbers missing".into()),
            )
            .unwrap();

        let notifier = w.secretariat.notifier();
        let rejection_notices: Vec<_> = notifier
            .sent
            .iter()
            .filter(|n| n.kind == NotificationKind::ReportRejection)
            .collect();
        assert_eq!(rejection_notices.len(), 1);
        assert_eq!(rejection_notices[0].delegate_id, w.customs_chair_id);
        assert!(rejection_notices[0].message.contains("Numbers missing"));
        assert!(notifier.for_delegate(&w.commissioner_id).is_empty());
    }

    #[test]
    fn test_resubmission_renotifies_reviewers() {
        let mut w = world();
        w.secretariat
            .assign_resolution(&w.resolution_id, &default_shares(&w), &w.secretary_id)
            .unwrap();
        let report = w.secretariat.submit_report(customs_draft(&w)).unwrap();
        w.secretariat
            .review_report_by_delegation_head(&report.id, &w.hod_chair_id, false, None)
            .unwrap();

        w.secretariat
            .resubmit_report(
                &report.id,
                &w.customs_chair_id,
                ReportRevision::new()
                    .with_performance(85)
                    .with_progress_details("Numbers added for every tariff line"),
            )
            .unwrap();

        let submissions = w
            .secretariat
            .notifier()
            .for_delegate(&w.hod_chair_id)
            .iter()
            .filter(|n| n.kind == NotificationKind::ReportSubmission)
            .count();
        assert_eq!(submissions, 2);
    }

    #[test]
    fn test_minute_taking_authorization() {
        let w = world();
        assert!(w
            .secretariat
            .authorize_minute_taking(&w.secretary_id, &w.meeting_id)
            .is_ok());
        assert!(w
            .secretariat
            .authorize_minute_taking(&w.kenyan_secretary_id, &w.meeting_id)
            .is_err());
        // Chairs are not secretarial at all.
        assert!(w
            .secretariat
            .authorize_minute_taking(&w.customs_chair_id, &w.meeting_id)
            .is_err());
    }

    #[test]
    fn test_schedule_meeting_respects_jurisdiction() {
        let mut w = world();
        let err = w
            .secretariat
            .schedule_meeting(
                "Cross-border session",
                w.uganda.clone(),
                w.kenyan_secretary_id.clone(),
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, PlenaryError::PermissionDenied { .. }));

        // In their own jurisdiction it goes through.
        assert!(w
            .secretariat
            .schedule_meeting(
                "Nairobi session",
                w.kenya.clone(),
                w.kenyan_secretary_id.clone(),
                Utc::now(),
            )
            .is_ok());
    }

    #[test]
    fn test_display_role_and_group_queries() {
        let w = world();
        assert_eq!(
            w.secretariat.display_role(&w.hod_chair_id).unwrap(),
            "Head of Delegation"
        );
        assert_eq!(w.secretariat.display_role(&w.it_chair_id).unwrap(), "Chair");
        assert!(w.secretariat.has_review_privilege(&w.hod_chair_id));
        assert!(!w.secretariat.has_review_privilege(&w.it_chair_id));

        let hod_group = w.secretariat.delegation_group_id().unwrap();
        assert!(w.secretariat.is_delegation_group(&hod_group));
        assert!(!w.secretariat.is_delegation_group(&w.customs));
    }

    #[test]
    fn test_progress_after_full_cycle() {
        let mut w = world();
        w.secretariat
            .assign_resolution(&w.resolution_id, &default_shares(&w), &w.secretary_id)
            .unwrap();
        w.secretariat.submit_report(customs_draft(&w)).unwrap();
        w.secretariat
            .submit_report(
                ReportDraft::new(w.it_chair_id.clone())
                    .for_resolution(w.resolution_id.clone())
                    .from_subcommittee(w.it.clone())
                    .with_performance(60)
                    .with_progress_details("Data exchange prototype deployed"),
            )
            .unwrap();

        // 80 * 70/100 + 60 * 30/100
        let summary = w.secretariat.resolution_progress(&w.resolution_id).unwrap();
        assert_eq!(summary.overall, 74.0);
        assert_eq!(summary.total_assignments, 2);
        assert_eq!(summary.total_reports, 2);
    }
}
