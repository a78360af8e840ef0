//! In-memory record store
//!
//! The canonical record set: countries, meetings, subcommittees,
//! delegates, resolutions, assignments, reports. Keyed arenas with the
//! exact query shapes the engine needs. Assignments are held as a flat
//! list in insertion order because they are only ever read per-resolution
//! and replaced as a whole set.

use plenary_types::{
    Assignment, Country, CountryId, Delegate, DelegateId, Meeting, MeetingId, Report, ReportId,
    ReportStatus, Resolution, ResolutionId, ResolutionStatus, RoleTag, Subcommittee,
    SubcommitteeId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The shared record set all core operations read and write
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    countries: HashMap<CountryId, Country>,
    meetings: HashMap<MeetingId, Meeting>,
    subcommittees: HashMap<SubcommitteeId, Subcommittee>,
    delegates: HashMap<DelegateId, Delegate>,
    resolutions: HashMap<ResolutionId, Resolution>,
    assignments: Vec<Assignment>,
    reports: HashMap<ReportId, Report>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // ── Countries ────────────────────────────────────────────────────

    pub fn insert_country(&mut self, country: Country) -> CountryId {
        let id = country.id.clone();
        self.countries.insert(id.clone(), country);
        id
    }

    pub fn country(&self, id: &CountryId) -> Option<&Country> {
        self.countries.get(id)
    }

    // ── Meetings ─────────────────────────────────────────────────────

    pub fn insert_meeting(&mut self, meeting: Meeting) -> MeetingId {
        let id = meeting.id.clone();
        self.meetings.insert(id.clone(), meeting);
        id
    }

    pub fn meeting(&self, id: &MeetingId) -> Option<&Meeting> {
        self.meetings.get(id)
    }

    // ── Subcommittees ────────────────────────────────────────────────

    pub fn insert_subcommittee(&mut self, subcommittee: Subcommittee) -> SubcommitteeId {
        let id = subcommittee.id.clone();
        self.subcommittees.insert(id.clone(), subcommittee);
        id
    }

    pub fn subcommittee(&self, id: &SubcommitteeId) -> Option<&Subcommittee> {
        self.subcommittees.get(id)
    }

    /// Resolve a subcommittee by its exact name
    pub fn subcommittee_by_name(&self, name: &str) -> Option<&Subcommittee> {
        self.subcommittees.values().find(|s| s.name == name)
    }

    // ── Delegates ────────────────────────────────────────────────────

    pub fn insert_delegate(&mut self, delegate: Delegate) -> DelegateId {
        let id = delegate.id.clone();
        self.delegates.insert(id.clone(), delegate);
        id
    }

    pub fn delegate(&self, id: &DelegateId) -> Option<&Delegate> {
        self.delegates.get(id)
    }

    /// All delegates belonging to one subcommittee
    pub fn delegates_in_subcommittee(&self, subcommittee_id: &SubcommitteeId) -> Vec<&Delegate> {
        self.delegates
            .values()
            .filter(|d| d.subcommittee_id.as_ref() == Some(subcommittee_id))
            .collect()
    }

    /// All delegates carrying one role tag
    pub fn delegates_with_role(&self, role: RoleTag) -> Vec<&Delegate> {
        self.delegates.values().filter(|d| d.role == role).collect()
    }

    // ── Resolutions ──────────────────────────────────────────────────

    pub fn insert_resolution(&mut self, resolution: Resolution) -> ResolutionId {
        let id = resolution.id.clone();
        self.resolutions.insert(id.clone(), resolution);
        id
    }

    pub fn resolution(&self, id: &ResolutionId) -> Option<&Resolution> {
        self.resolutions.get(id)
    }

    pub fn resolution_mut(&mut self, id: &ResolutionId) -> Option<&mut Resolution> {
        self.resolutions.get_mut(id)
    }

    pub fn resolutions_for_meeting(&self, meeting_id: &MeetingId) -> Vec<&Resolution> {
        self.resolutions
            .values()
            .filter(|r| &r.meeting_id == meeting_id)
            .collect()
    }

    pub fn resolutions_by_status(&self, status: ResolutionStatus) -> Vec<&Resolution> {
        self.resolutions
            .values()
            .filter(|r| r.status == status)
            .collect()
    }

    /// Resolutions with at least one assignment held by the subcommittee
    pub fn resolutions_for_subcommittee(
        &self,
        subcommittee_id: &SubcommitteeId,
    ) -> Vec<&Resolution> {
        self.resolutions
            .values()
            .filter(|r| {
                self.assignments
                    .iter()
                    .any(|a| a.resolution_id == r.id && &a.subcommittee_id == subcommittee_id)
            })
            .collect()
    }

    // ── Assignments ──────────────────────────────────────────────────

    pub fn insert_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// All assignment rows for one resolution, in insertion order
    pub fn assignments_for_resolution(&self, resolution_id: &ResolutionId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| &a.resolution_id == resolution_id)
            .collect()
    }

    /// The first assignment row linking a resolution and a subcommittee
    pub fn assignment_for(
        &self,
        resolution_id: &ResolutionId,
        subcommittee_id: &SubcommitteeId,
    ) -> Option<&Assignment> {
        self.assignments.iter().find(|a| {
            &a.resolution_id == resolution_id && &a.subcommittee_id == subcommittee_id
        })
    }

    /// Swap the whole assignment set for one resolution in a single step:
    /// every existing row for the resolution is removed and the new rows
    /// appended. Returns the number of rows removed.
    pub fn replace_assignments(
        &mut self,
        resolution_id: &ResolutionId,
        new_rows: Vec<Assignment>,
    ) -> usize {
        let before = self.assignments.len();
        self.assignments.retain(|a| &a.resolution_id != resolution_id);
        let removed = before - self.assignments.len();
        self.assignments.extend(new_rows);
        removed
    }

    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    // ── Reports ──────────────────────────────────────────────────────

    pub fn insert_report(&mut self, report: Report) -> ReportId {
        let id = report.id.clone();
        self.reports.insert(id.clone(), report);
        id
    }

    pub fn report(&self, id: &ReportId) -> Option<&Report> {
        self.reports.get(id)
    }

    pub fn report_mut(&mut self, id: &ReportId) -> Option<&mut Report> {
        self.reports.get_mut(id)
    }

    pub fn reports_for_resolution(&self, resolution_id: &ResolutionId) -> Vec<&Report> {
        self.reports
            .values()
            .filter(|r| &r.resolution_id == resolution_id)
            .collect()
    }

    pub fn reports_for_subcommittee(&self, subcommittee_id: &SubcommitteeId) -> Vec<&Report> {
        self.reports
            .values()
            .filter(|r| &r.subcommittee_id == subcommittee_id)
            .collect()
    }

    pub fn reports_by_submitter(&self, delegate_id: &DelegateId) -> Vec<&Report> {
        self.reports
            .values()
            .filter(|r| &r.submitted_by == delegate_id)
            .collect()
    }

    pub fn reports_by_status(&self, status: ReportStatus) -> Vec<&Report> {
        self.reports
            .values()
            .filter(|r| r.status == status)
            .collect()
    }

    /// Reports whose first-stage review was performed by the delegate
    pub fn reports_reviewed_by_delegation_head(&self, reviewer_id: &DelegateId) -> Vec<&Report> {
        self.reports
            .values()
            .filter(|r| {
                r.delegation_head_review
                    .as_ref()
                    .is_some_and(|review| &review.reviewer_id == reviewer_id)
            })
            .collect()
    }

    /// Reports whose second-stage review was performed by the delegate
    pub fn reports_reviewed_by_commissioner(&self, reviewer_id: &DelegateId) -> Vec<&Report> {
        self.reports
            .values()
            .filter(|r| {
                r.commissioner_review
                    .as_ref()
                    .is_some_and(|review| &review.reviewer_id == reviewer_id)
            })
            .collect()
    }

    pub fn report_count(&self) -> usize {
        self.reports.len()
    }
}
