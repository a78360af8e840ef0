//! Plenary domain types
//!
//! Records for the resolution-tracking core: meetings produce resolutions,
//! resolutions are distributed across subcommittees with weighted
//! contribution shares, subcommittees report progress, and reports pass
//! through a two-stage review chain.
//!
//! Associations are one-directional by design: records reference each other
//! through opaque ids and the store answers by-foreign-key queries, so no
//! record holds a back-pointer cycle.

pub mod delegate;
pub mod error;
pub mod ids;
pub mod org;
pub mod report;
pub mod resolution;
pub mod views;

pub use delegate::{Delegate, RoleTag};
pub use error::{PlenaryError, PlenaryResult, RecordKind};
pub use ids::{
    AssignmentId, CountryId, DelegateId, MeetingId, ReportId, ResolutionId, SubcommitteeId,
};
pub use org::{Country, Meeting, Subcommittee};
pub use report::{Report, ReportDraft, ReportRevision, ReportStatus, ReviewRecord};
pub use resolution::{Assignment, AssignmentStatus, Resolution, ResolutionStatus, ShareSpec};
pub use views::{AssignmentView, ProgressSummary, ReportView};
