//! Plenary demo: the full life of one resolution
//!
//! 1. A secretary schedules a meeting in her own jurisdiction
//! 2. The meeting produces a resolution, distributed 70/30 across two
//!    subcommittees
//! 3. The customs subcommittee reports progress
//! 4. A delegation head (derived privilege, not a stored role) turns the
//!    report back; the chair revises and resubmits
//! 5. Both review stages approve; the weighted overall is aggregated

use chrono::Utc;
use colored::Colorize;
use plenary_engine::dispatch::{RecordingMailer, RecordingNotifier};
use plenary_engine::{Secretariat, HEAD_OF_DELEGATION};
use plenary_types::{Delegate, ReportDraft, ReportRevision, RoleTag, ShareSpec};

fn header(title: &str) {
    println!();
    println!("{}", "═".repeat(64).cyan());
    println!("  {}", title.cyan().bold());
    println!("{}", "═".repeat(64).cyan());
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_target(false)
        .init();

    let mut secretariat =
        Secretariat::with_sinks(RecordingNotifier::new(), RecordingMailer::new());

    header("Setup: countries, subcommittees, delegates");

    let uganda = secretariat.register_country("Uganda");
    let kenya = secretariat.register_country("Kenya");
    let customs = secretariat.register_subcommittee("Customs");
    let it = secretariat.register_subcommittee("Information Technology");
    let hod_group = secretariat.register_subcommittee(HEAD_OF_DELEGATION);

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
    let delegation_head = secretariat.register_delegate(
        Delegate::new("Amina Hassan", "amina@example.org", RoleTag::ViceChair)
            .with_subcommittee(hod_group),
    );
    let commissioner = secretariat.register_delegate(Delegate::new(
        "Rose Mwangi",
        "rose@example.org",
        RoleTag::CommissionerGeneral,
    ));

    println!(
        "  effective role of {}: {}",
        "Amina".bold(),
        secretariat
            .display_role(&delegation_head)
            .expect("delegate exists")
            .green()
    );
    println!(
        "  effective role of {}: {}",
        "Peter".bold(),
        secretariat
            .display_role(&it_chair)
            .expect("delegate exists")
            .yellow()
    );

    header("Meeting and resolution");

    let meeting = secretariat
        .schedule_meeting("Annual Council Session", uganda, secretary.clone(), Utc::now())
        .expect("secretary acts in her own jurisdiction");
    let resolution = secretariat
        .create_resolution(
            "Harmonize customs codes",
            "Align tariff schedules across member states",
            &meeting.id,
            &secretary,
        )
        .expect("resolution created");
    println!("  resolution {} created", resolution.id.short().bold());

    header("Distribution (70/30), with a jurisdiction denial first");

    let shares = vec![
        ShareSpec::new(customs.clone(), 70),
        ShareSpec::new(it.clone(), 30),
    ];
    match secretariat.assign_resolution(&resolution.id, &shares, &kenyan_secretary) {
        Err(err) => println!("  {} {}", "denied:".red().bold(), err),
        Ok(_) => println!("  unexpected approval"),
    }
    secretariat
        .assign_resolution(&resolution.id, &shares, &secretary)
        .expect("valid distribution");
    println!(
        "  distributed; {} in-app notifications, {} mails sent",
        secretariat.notifier().sent.len().to_string().bold(),
        secretariat.mailer().sent.len().to_string().bold()
    );

    header("Report, rejection, resubmission");

    let report = secretariat
        .submit_report(
            ReportDraft::new(customs_chair.clone())
                .for_resolution(resolution.id.clone())
                .from_subcommittee(customs)
                .with_performance(80)
                .with_progress_details("Tariff schedule drafted and circulated to members")
                .with_hindrances("Two member states sent figures late"),
        )
        .expect("valid report");

    secretariat
        .review_report_by_delegation_head(
            &report.id,
            &delegation_head,
            false,
            Some("Performance numbers are not broken down per state".into()),
        )
        .expect("first-stage review");
    println!("  report turned back at stage one");

    let resubmitted = secretariat
        .resubmit_report(
            &report.id,
            &customs_chair,
            ReportRevision::new()
                .with_performance(85)
                .with_progress_details("Per-state breakdown added for every tariff line"),
        )
        .expect("resubmission");
    println!("  resubmitted as version {}", resubmitted.version.to_string().bold());

    header("Two-stage approval and aggregation");

    secretariat
        .review_report_by_delegation_head(&report.id, &delegation_head, true, None)
        .expect("stage one approval");
    let finalized = secretariat
        .review_report_by_commissioner(&report.id, &commissioner, true, None)
        .expect("final approval");
    println!(
        "  report final: {} (version {})",
        finalized.is_final.to_string().green().bold(),
        finalized.version
    );

    secretariat
        .submit_report(
            ReportDraft::new(it_chair)
                .for_resolution(resolution.id.clone())
                .from_subcommittee(it)
                .with_performance(60)
                .with_progress_details("Data exchange prototype deployed to staging"),
        )
        .expect("second report");

    let summary = secretariat
        .resolution_progress(&resolution.id)
        .expect("summary");
    println!(
        "  overall completion: {} (from {} assignments, {} reports)",
        format!("{:.1}%", summary.overall).green().bold(),
        summary.total_assignments,
        summary.total_reports
    );
}
