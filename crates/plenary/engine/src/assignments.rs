//! Assignment manager: distributing resolutions across subcommittees
//!
//! A distribution is a set of (subcommittee, weight) shares summing to
//! 100. All checks run before the first write, so a failed call leaves
//! the store exactly as it was; corrections replace the whole set in one
//! step rather than patching rows.

use crate::{ScopeGuard, ShareValidator};
use plenary_store::MemoryStore;
use plenary_types::{
    Assignment, AssignmentView, Delegate, DelegateId, PlenaryError, PlenaryResult, RecordKind,
    Resolution, ResolutionId, ResolutionStatus, ShareSpec,
};
use tracing::info;

/// Creates and replaces the assignment set of a resolution
#[derive(Clone, Copy, Debug, Default)]
pub struct AssignmentManager {
    validator: ShareValidator,
    scope: ScopeGuard,
}

impl AssignmentManager {
    pub fn new() -> Self {
        Self {
            validator: ShareValidator::new(),
            scope: ScopeGuard::new(),
        }
    }

    /// Distribute a resolution across subcommittees.
    ///
    /// Jurisdiction-scoped actors are checked against the hosting country
    /// of the resolution's owning meeting. The share set is validated and
    /// every referenced subcommittee resolved before any row is written;
    /// on success the resolution advances Assigned -> InProgress. Returns
    /// the created rows so the caller can fan out notifications.
    pub fn assign(
        &self,
        store: &mut MemoryStore,
        resolution_id: &ResolutionId,
        shares: &[ShareSpec],
        actor_id: &DelegateId,
    ) -> PlenaryResult<Vec<Assignment>> {
        let resolution = store
            .resolution(resolution_id)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Resolution, resolution_id))?
            .clone();
        let actor = store
            .delegate(actor_id)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Delegate, actor_id))?
            .clone();

        self.authorize(store, &resolution, &actor)?;
        let rows = self.build_rows(store, &resolution, shares, resolution.created_by.clone())?;

        for row in &rows {
            store.insert_assignment(row.clone());
        }
        if resolution.status == ResolutionStatus::Assigned {
            if let Some(resolution) = store.resolution_mut(resolution_id) {
                resolution.set_status(ResolutionStatus::InProgress);
            }
        }

        info!(
            resolution = %resolution_id,
            shares = rows.len(),
            "resolution distributed across subcommittees"
        );
        Ok(rows)
    }

    /// Replace the whole assignment set of a resolution.
    ///
    /// Used for corrections. The new set is validated up front and the
    /// swap happens in a single store step: either the full old set is
    /// gone and the full new set exists, or nothing changed.
    pub fn replace_all(
        &self,
        store: &mut MemoryStore,
        resolution_id: &ResolutionId,
        shares: &[ShareSpec],
        actor_id: &DelegateId,
    ) -> PlenaryResult<Vec<Assignment>> {
        let resolution = store
            .resolution(resolution_id)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Resolution, resolution_id))?
            .clone();
        if store.delegate(actor_id).is_none() {
            return Err(PlenaryError::not_found(RecordKind::Delegate, actor_id));
        }

        let rows = self.build_rows(store, &resolution, shares, actor_id.clone())?;
        let removed = store.replace_assignments(resolution_id, rows.clone());

        info!(
            resolution = %resolution_id,
            removed,
            inserted = rows.len(),
            "assignment set replaced"
        );
        Ok(rows)
    }

    /// Flat assignment rows for one resolution, names resolved
    pub fn list(
        &self,
        store: &MemoryStore,
        resolution_id: &ResolutionId,
    ) -> PlenaryResult<Vec<AssignmentView>> {
        if store.resolution(resolution_id).is_none() {
            return Err(PlenaryError::not_found(RecordKind::Resolution, resolution_id));
        }
        Ok(store
            .assignments_for_resolution(resolution_id)
            .into_iter()
            .map(|a| view_of(store, a))
            .collect())
    }

    fn authorize(
        &self,
        store: &MemoryStore,
        resolution: &Resolution,
        actor: &Delegate,
    ) -> PlenaryResult<()> {
        let meeting = store
            .meeting(&resolution.meeting_id)
            .ok_or_else(|| PlenaryError::not_found(RecordKind::Meeting, &resolution.meeting_id))?;
        self.scope
            .authorize_jurisdiction(store, actor, &meeting.hosting_country_id)
    }

    /// Validate the share set and materialize assignment rows. Nothing is
    /// written here; a failure leaves the store untouched.
    fn build_rows(
        &self,
        store: &MemoryStore,
        resolution: &Resolution,
        shares: &[ShareSpec],
        assigned_by: DelegateId,
    ) -> PlenaryResult<Vec<Assignment>> {
        self.validator.validate(shares)?;

        let mut rows = Vec::with_capacity(shares.len());
        for share in shares {
            if store.subcommittee(&share.subcommittee_id).is_none() {
                return Err(PlenaryError::not_found(
                    RecordKind::Subcommittee,
                    &share.subcommittee_id,
                ));
            }
            rows.push(Assignment::new(
                resolution.id.clone(),
                share.subcommittee_id.clone(),
                share.weight,
                assigned_by.clone(),
            ));
        }
        Ok(rows)
    }
}

fn view_of(store: &MemoryStore, assignment: &Assignment) -> AssignmentView {
    AssignmentView {
        id: assignment.id.clone(),
        resolution_id: assignment.resolution_id.clone(),
        subcommittee_id: assignment.subcommittee_id.clone(),
        subcommittee_name: store
            .subcommittee(&assignment.subcommittee_id)
            .map(|s| s.name.clone())
            .unwrap_or_default(),
        weight: assignment.weight,
        assigned_by: assignment.assigned_by.clone(),
        assigned_at: assignment.assigned_at,
        status: assignment.status,
    }
}
