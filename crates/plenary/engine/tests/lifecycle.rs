//! End-to-end lifecycle: a resolution from creation through distribution,
//! reporting, two-stage review, resubmission, and aggregation.

use chrono::Utc;
use plenary_engine::dispatch::{NotificationKind, RecordingMailer, RecordingNotifier};
use plenary_engine::{Secretariat, HEAD_OF_DELEGATION};
use plenary_types::{
    Delegate, DelegateId, PlenaryError, ReportDraft, ReportRevision, ReportStatus, ResolutionId,
    ResolutionStatus, RoleTag, ShareSpec, SubcommitteeId,
};

struct World {
    secretariat: Secretariat<RecordingNotifier, RecordingMailer>,
    customs: SubcommitteeId,
    it: SubcommitteeId,
    secretary: DelegateId,
    kenyan_secretary: DelegateId,
    customs_chair: DelegateId,
    it_chair: DelegateId,
    hod_vice_chair: DelegateId,
    commissioner: DelegateId,
    resolution: ResolutionId,
}

fn build_world() -> World {
    let mut secretariat =
        Secretariat::with_sinks(RecordingNotifier::new(), RecordingMailer::new());

    let uganda = secretariat.register_country("Uganda");
    let kenya = secretariat.register_country("Kenya");
    let customs = secretariat.register_subcommittee("Customs");
    let it = secretariat.register_subcommittee("Information Technology");
    let hod = secretariat.register_subcommittee(HEAD_OF_DELEGATION);

    let secretary = secretariat.register_delegate(
        Delegate::new("Grace Auma", "grace@example.org", RoleTag::Secretary)
            .with_country(uganda.clone()),
    );
    let kenyan_secretary = secretariat.register_delegate(
        Delegate::new("Wanjiku Kamau", "wanjiku@example.org", RoleTag::Secretary)
            .with_country(kenya),
    );
    let customs_chair = secretariat.register_delegate(
        Delegate::new("Joy Nabirye", "joy@example.org", RoleTag::Chair)
            .with_subcommittee(customs.clone()),
    );
    let it_chair = secretariat.register_delegate(
        Delegate::new("Peter Okello", "peter@example.org", RoleTag::Chair)
            .with_subcommittee(it.clone()),
    );
    let hod_vice_chair = secretariat.register_delegate(
        Delegate::new("Amina Hassan", "amina@example.org", RoleTag::ViceChair)
            .with_subcommittee(hod),
    );
    let commissioner = secretariat.register_delegate(Delegate::new(
        "Rose Mwangi",
        "rose@example.org",
        RoleTag::CommissionerGeneral,
    ));

    let meeting = secretariat
        .schedule_meeting("Annual Council Session", uganda.clone(), secretary.clone(), Utc::now())
        .expect("meeting in own jurisdiction");
    let resolution = secretariat
        .create_resolution(
            "Harmonize customs codes",
            "Align tariff schedules across member states",
            &meeting.id,
            &secretary,
        )
        .expect("resolution created");

    World {
        secretariat,
        customs,
        it,
        secretary,
        kenyan_secretary,
        customs_chair,
        it_chair,
        hod_vice_chair,
        commissioner,
        resolution: resolution.id,
    }
}

#[test]
fn full_resolution_lifecycle() {
    let mut w = build_world();

    // A secretary from the wrong jurisdiction cannot distribute.
    let err = w
        .secretariat
        .assign_resolution(
            &w.resolution,
            &[
                ShareSpec::new(w.customs.clone(), 70),
                ShareSpec::new(w.it.clone(), 30),
            ],
            &w.kenyan_secretary,
        )
        .unwrap_err();
    assert!(matches!(err, PlenaryError::PermissionDenied { .. }));

    // A short weight set aborts without touching the store.
    let err = w
        .secretariat
        .assign_resolution(
            &w.resolution,
            &[
                ShareSpec::new(w.customs.clone(), 60),
                ShareSpec::new(w.it.clone(), 30),
            ],
            &w.secretary,
        )
        .unwrap_err();
    assert_eq!(err, PlenaryError::WeightSumInvalid { actual: 90 });
    assert!(w.secretariat.list_assignments(&w.resolution).unwrap().is_empty());
    assert_eq!(
        w.secretariat.resolution(&w.resolution).unwrap().status,
        ResolutionStatus::Assigned
    );

    // A valid distribution advances the resolution and notifies members.
    w.secretariat
        .assign_resolution(
            &w.resolution,
            &[
                ShareSpec::new(w.customs.clone(), 70),
                ShareSpec::new(w.it.clone(), 30),
            ],
            &w.secretary,
        )
        .unwrap();
    assert_eq!(
        w.secretariat.resolution(&w.resolution).unwrap().status,
        ResolutionStatus::InProgress
    );
    assert_eq!(
        w.secretariat
            .notifier()
            .for_delegate(&w.customs_chair)
            .len(),
        1
    );

    // Customs files a report; only the derived delegation head is told.
    let report = w
        .secretariat
        .submit_report(
            ReportDraft::new(w.customs_chair.clone())
                .for_resolution(w.resolution.clone())
                .from_subcommittee(w.customs.clone())
                .with_performance(80)
                .with_progress_details("Tariff schedule drafted and circulated to members")
                .with_hindrances("Two member states sent figures late"),
        )
        .unwrap();
    assert!(w
        .secretariat
        .notifier()
        .for_delegate(&w.hod_vice_chair)
        .iter()
        .any(|n| n.kind == NotificationKind::ReportSubmission));
    assert!(!w
        .secretariat
        .notifier()
        .for_delegate(&w.it_chair)
        .iter()
        .any(|n| n.kind == NotificationKind::ReportSubmission));

    // The commissioner cannot jump the chain.
    let err = w
        .secretariat
        .review_report_by_commissioner(&report.id, &w.commissioner, true, None)
        .unwrap_err();
    assert!(matches!(err, PlenaryError::InvalidStateTransition { .. }));

    // Stage one rejection goes back to the submitter.
    w.secretariat
        .review_report_by_delegation_head(
            &report.id,
            &w.hod_vice_chair,
            false,
            Some("Performance numbers are not broken down per state".into()),
        )
        .unwrap();
    assert_eq!(
        w.secretariat.report(&report.id).unwrap().status,
        ReportStatus::RejectedByDelegationHead
    );

    // The submitter revises; the chain resets and the version bumps.
    let resubmitted = w
        .secretariat
        .resubmit_report(
            &report.id,
            &w.customs_chair,
            ReportRevision::new()
                .with_performance(85)
                .with_progress_details("Per-state breakdown added for every tariff line"),
        )
        .unwrap();
    assert_eq!(resubmitted.status, ReportStatus::Submitted);
    assert_eq!(resubmitted.version, 2);
    assert!(resubmitted.delegation_head_review.is_none());
    assert!(resubmitted.commissioner_review.is_none());

    // This time both stages approve.
    w.secretariat
        .review_report_by_delegation_head(
            &report.id,
            &w.hod_vice_chair,
            true,
            Some("Breakdown looks complete".into()),
        )
        .unwrap();
    let finalized = w
        .secretariat
        .review_report_by_commissioner(&report.id, &w.commissioner, true, None)
        .unwrap();
    assert_eq!(finalized.status, ReportStatus::ApprovedByCommissioner);
    assert!(finalized.is_final);

    // IT files its own report; the weighted overall combines both.
    w.secretariat
        .submit_report(
            ReportDraft::new(w.it_chair.clone())
                .for_resolution(w.resolution.clone())
                .from_subcommittee(w.it.clone())
                .with_performance(60)
                .with_progress_details("Data exchange prototype deployed to staging"),
        )
        .unwrap();

    // 85 * 70/100 + 60 * 30/100
    let summary = w.secretariat.resolution_progress(&w.resolution).unwrap();
    assert_eq!(summary.overall, 77.5);
    assert_eq!(summary.total_assignments, 2);
    assert_eq!(summary.total_reports, 2);
}

#[test]
fn corrections_replace_the_whole_share_set() {
    let mut w = build_world();
    w.secretariat
        .assign_resolution(
            &w.resolution,
            &[
                ShareSpec::new(w.customs.clone(), 70),
                ShareSpec::new(w.it.clone(), 30),
            ],
            &w.secretary,
        )
        .unwrap();

    // An invalid correction leaves the old set standing.
    let err = w
        .secretariat
        .replace_assignments(
            &w.resolution,
            &[ShareSpec::new(w.customs.clone(), 80)],
            &w.secretary,
        )
        .unwrap_err();
    assert_eq!(err, PlenaryError::WeightSumInvalid { actual: 80 });
    assert_eq!(w.secretariat.list_assignments(&w.resolution).unwrap().len(), 2);

    // A valid one swaps it atomically.
    w.secretariat
        .replace_assignments(
            &w.resolution,
            &[
                ShareSpec::new(w.customs.clone(), 50),
                ShareSpec::new(w.it.clone(), 50),
            ],
            &w.secretary,
        )
        .unwrap();
    let views = w.secretariat.list_assignments(&w.resolution).unwrap();
    assert_eq!(views.len(), 2);
    assert!(views.iter().all(|v| v.weight == 50));
}

#[test]
fn minute_taking_is_jurisdiction_bound() {
    let w = build_world();
    let meeting_id = w
        .secretariat
        .resolution(&w.resolution)
        .expect("resolution exists")
        .meeting_id
        .clone();

    assert!(w
        .secretariat
        .authorize_minute_taking(&w.secretary, &meeting_id)
        .is_ok());
    assert!(w
        .secretariat
        .authorize_minute_taking(&w.kenyan_secretary, &meeting_id)
        .is_err());
}
