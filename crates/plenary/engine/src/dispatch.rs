//! Notification and mail dispatch seams
//!
//! The engine never owns delivery. It composes messages and hands them to
//! these sinks on state changes; the in-app sink is fire-and-forget and
//! the mail sink may fail per recipient. Fan-out is best-effort
//! throughout: a failed send is logged and the recipient skipped, never
//! propagated into the operation that triggered it, because by dispatch
//! time the state change has already committed.

use plenary_types::{DelegateId, RecordKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Sinks ────────────────────────────────────────────────────────────

/// Category of an in-app notification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    TaskAssignment,
    ReportSubmission,
    ReportApproval,
    ReportRejection,
}

/// In-app notification sink. Fire-and-forget; no return value consumed.
pub trait NotificationSink {
    fn notify(
        &mut self,
        delegate_id: &DelegateId,
        title: &str,
        message: &str,
        kind: NotificationKind,
        related: RecordKind,
        related_id: &str,
    );
}

/// Mail delivery failure, recovered at the recipient level
#[derive(Error, Clone, Debug)]
#[error("mail delivery failed: {0}")]
pub struct MailError(pub String);

/// Outbound mail sink
pub trait MailSink {
    fn send(
        &mut self,
        to_address: &str,
        to_name: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), MailError>;
}

// ── Default sinks ────────────────────────────────────────────────────

/// Logs notifications through tracing and drops them
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(
        &mut self,
        delegate_id: &DelegateId,
        title: &str,
        _message: &str,
        kind: NotificationKind,
        related: RecordKind,
        related_id: &str,
    ) {
        tracing::info!(
            delegate = %delegate_id,
            title = title,
            kind = ?kind,
            related = %related,
            related_id = related_id,
            "notification dispatched"
        );
    }
}

/// Logs outbound mail through tracing and reports success
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingMailer;

impl MailSink for TracingMailer {
    fn send(
        &mut self,
        to_address: &str,
        _to_name: &str,
        subject: &str,
        _body: &str,
    ) -> Result<(), MailError> {
        tracing::info!(to = to_address, subject = subject, "mail dispatched");
        Ok(())
    }
}

// ── Recording sinks ──────────────────────────────────────────────────

/// One captured in-app notification
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub delegate_id: DelegateId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub related_id: String,
}

/// Captures notifications in memory; used by tests and demos
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    pub sent: Vec<NotificationRecord>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications captured for one recipient
    pub fn for_delegate(&self, delegate_id: &DelegateId) -> Vec<&NotificationRecord> {
        self.sent
            .iter()
            .filter(|n| &n.delegate_id == delegate_id)
            .collect()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(
        &mut self,
        delegate_id: &DelegateId,
        title: &str,
        message: &str,
        kind: NotificationKind,
        _related: RecordKind,
        related_id: &str,
    ) {
        self.sent.push(NotificationRecord {
            delegate_id: delegate_id.clone(),
            title: title.to_string(),
            message: message.to_string(),
            kind,
            related_id: related_id.to_string(),
        });
    }
}

/// One captured outbound mail
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MailRecord {
    pub to_address: String,
    pub subject: String,
    pub body: String,
}

/// Captures mail in memory. Addresses listed in `reject` fail delivery,
/// which is how tests exercise the catch-log-continue fan-out.
#[derive(Clone, Debug, Default)]
pub struct RecordingMailer {
    pub sent: Vec<MailRecord>,
    pub reject: Vec<String>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every delivery to the given address
    pub fn rejecting(mut self, address: impl Into<String>) -> Self {
        self.reject.push(address.into());
        self
    }
}

impl MailSink for RecordingMailer {
    fn send(
        &mut self,
        to_address: &str,
        _to_name: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), MailError> {
        if self.reject.iter().any(|a| a == to_address) {
            return Err(MailError(format!("recipient {} unavailable", to_address)));
        }
        self.sent.push(MailRecord {
            to_address: to_address.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

// ── Message composition ──────────────────────────────────────────────

/// Subject and body for a new-assignment notice to a group member
pub fn assignment_mail(
    member_name: &str,
    subcommittee_name: &str,
    resolution_title: &str,
    weight: u32,
) -> (String, String) {
    let subject = format!("New Task Assignment: {}", resolution_title);
    let body = format!(
        "Dear {},\n\n\
         A new resolution has been assigned to your subcommittee ({}).\n\n\
         Resolution: {}\n\
         Your subcommittee's contribution: {}%\n\n\
         Please sign in to Plenary for details and begin working on this task.\n\n\
         Best regards,\n\
         The Plenary Team",
        member_name, subcommittee_name, resolution_title, weight
    );
    (subject, body)
}

/// Subject and body asking a reviewer to look at a report
pub fn review_request_mail(
    reviewer_name: &str,
    resolution_title: &str,
    submitter_name: &str,
) -> (String, String) {
    let subject = format!("Report Awaiting Review: {}", resolution_title);
    let body = format!(
        "Dear {},\n\n\
         A progress report for '{}' was submitted by {} and awaits your review.\n\n\
         Best regards,\n\
         The Plenary Team",
        reviewer_name, resolution_title, submitter_name
    );
    (subject, body)
}

/// Subject and body telling a commissioner a report cleared stage one
pub fn forwarded_report_mail(reviewer_name: &str, resolution_title: &str) -> (String, String) {
    let subject = format!("Report Forwarded for Final Review: {}", resolution_title);
    let body = format!(
        "Dear {},\n\n\
         A progress report for '{}' was approved by the delegation head and is\n\
         forwarded for your final review.\n\n\
         Best regards,\n\
         The Plenary Team",
        reviewer_name, resolution_title
    );
    (subject, body)
}

/// Subject and body telling a submitter their report was approved at stage one
pub fn approval_mail(
    submitter_name: &str,
    resolution_title: &str,
    comments: Option<&str>,
) -> (String, String) {
    let subject = format!("Report Approved: {}", resolution_title);
    let mut body = format!(
        "Dear {},\n\n\
         Your report for '{}' was approved and forwarded to the commissioner\n\
         general for final review.\n",
        submitter_name, resolution_title
    );
    if let Some(comments) = comments {
        body.push_str(&format!("\nReviewer comments: {}\n", comments));
    }
    body.push_str("\nBest regards,\nThe Plenary Team");
    (subject, body)
}

/// Subject and body telling a submitter their report was turned back
pub fn rejection_mail(
    submitter_name: &str,
    resolution_title: &str,
    comments: Option<&str>,
) -> (String, String) {
    let subject = format!("Report Rejected: {}", resolution_title);
    let mut body = format!(
        "Dear {},\n\n\
         Your report for '{}' was rejected. Please revise and resubmit.\n",
        submitter_name, resolution_title
    );
    if let Some(comments) = comments {
        body.push_str(&format!("\nReviewer comments: {}\n", comments));
    }
    body.push_str("\nBest regards,\nThe Plenary Team");
    (subject, body)
}
