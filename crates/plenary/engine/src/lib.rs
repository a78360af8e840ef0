//! Plenary core engine
//!
//! The resolution-assignment / weighted-progress / two-stage-approval
//! core. Meetings produce resolutions; a resolution is distributed across
//! subcommittees as weighted shares summing to 100; each subcommittee
//! reports progress; every report passes a delegation-head review and a
//! commissioner review before it is final.
//!
//! # Architecture
//!
//! The [`Secretariat`] composes specialized components:
//!
//! - [`ShareValidator`] — enforces the sum-to-100 law on contribution shares
//! - [`ScopeGuard`] — restricts jurisdiction-bound roles to their own country
//! - [`PrivilegeDeriver`] — derives delegation-head authority from group
//!   membership, never from a stored flag
//! - [`AssignmentManager`] — creates and replaces assignment sets atomically
//! - [`ReportLifecycle`] — drives reports through the two-stage review chain
//! - [`ProgressAggregator`] — computes weighted completion on demand
//!
//! Notification and mail delivery are consumed through the sink traits in
//! [`dispatch`]: invoked, never owned, and always best-effort.
//!
//! # Example
//!
//! ```rust
//! use plenary_engine::Secretariat;
//! use plenary_types::{Delegate, ReportDraft, RoleTag, ShareSpec};
//!
//! let mut secretariat = Secretariat::new();
//!
//! let uganda = secretariat.register_country("Uganda");
//! let customs = secretariat.register_subcommittee("Customs");
//! let secretary = secretariat.register_delegate(
//!     Delegate::new("Grace", "grace@example.org", RoleTag::Secretary)
//!         .with_country(uganda.clone()),
//! );
//! let chair = secretariat.register_delegate(
//!     Delegate::new("Joy", "joy@example.org", RoleTag::Chair)
//!         .with_subcommittee(customs.clone()),
//! );
//!
//! let meeting = secretariat
//!     .schedule_meeting("Council Session", uganda, secretary.clone(), chrono::Utc::now())
//!     .unwrap();
//! let resolution = secretariat
//!     .create_resolution(
//!         "Harmonize customs codes",
//!         "Align tariff schedules",
//!         &meeting.id,
//!         &secretary,
//!     )
//!     .unwrap();
//!
//! secretariat
//!     .assign_resolution(&resolution.id, &[ShareSpec::new(customs.clone(), 100)], &secretary)
//!     .unwrap();
//!
//! secretariat
//!     .submit_report(
//!         ReportDraft::new(chair)
//!             .for_resolution(resolution.id.clone())
//!             .from_subcommittee(customs)
//!             .with_performance(80)
//!             .with_progress_details("Tariff schedule drafted and circulated"),
//!     )
//!     .unwrap();
//!
//! let summary = secretariat.resolution_progress(&resolution.id).unwrap();
//! assert_eq!(summary.overall, 80.0);
//! ```

#![deny(unsafe_code)]

pub mod assignments;
pub mod dispatch;
pub mod privilege;
pub mod progress;
pub mod reports;
pub mod scope;
pub mod secretariat;
pub mod shares;

pub use assignments::AssignmentManager;
pub use dispatch::{
    MailError, MailSink, NotificationKind, NotificationSink, RecordingMailer, RecordingNotifier,
    TracingMailer, TracingNotifier,
};
pub use privilege::{PrivilegeDeriver, HEAD_OF_DELEGATION};
pub use progress::ProgressAggregator;
pub use reports::ReportLifecycle;
pub use scope::ScopeGuard;
pub use secretariat::Secretariat;
pub use shares::ShareValidator;
