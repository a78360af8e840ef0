//! Location scope guard
//!
//! Secretarial roles are jurisdiction-bound: they may only act on records
//! hosted by their own country. The rule itself is a pure comparison,
//! both jurisdictions present and equal. A missing jurisdiction on either
//! side is a deny, not an error; callers get a descriptive message
//! explaining which side fell short.

use plenary_store::MemoryStore;
use plenary_types::{CountryId, Delegate, Meeting, PlenaryError, PlenaryResult};
use tracing::debug;

/// Decides whether a jurisdiction-bound actor may touch a target record
#[derive(Clone, Copy, Debug, Default)]
pub struct ScopeGuard;

impl ScopeGuard {
    pub fn new() -> Self {
        Self
    }

    /// The scope rule: true only if both jurisdictions are present and equal
    pub fn can_act(&self, actor: Option<&CountryId>, target: Option<&CountryId>) -> bool {
        match (actor, target) {
            (Some(actor), Some(target)) => actor == target,
            _ => false,
        }
    }

    /// Gate a jurisdiction-scoped action against a hosting country.
    ///
    /// Roles that are not jurisdiction-scoped pass through; secretarial
    /// roles must match the hosting country.
    pub fn authorize_jurisdiction(
        &self,
        store: &MemoryStore,
        actor: &Delegate,
        hosting_country_id: &CountryId,
    ) -> PlenaryResult<()> {
        if !actor.role.is_secretarial() {
            return Ok(());
        }
        if self.can_act(actor.country_id.as_ref(), Some(hosting_country_id)) {
            return Ok(());
        }

        debug!(
            actor = %actor.id,
            role = %actor.role,
            "jurisdiction mismatch, denying scoped action"
        );
        Err(PlenaryError::denied(self.denial_message(
            store,
            actor,
            Some(hosting_country_id),
        )))
    }

    /// Gate meeting management and minute-taking: these are secretarial
    /// tasks, so the role itself is required in addition to the scope rule.
    pub fn authorize_meeting_management(
        &self,
        store: &MemoryStore,
        actor: &Delegate,
        meeting: &Meeting,
    ) -> PlenaryResult<()> {
        if !actor.role.is_secretarial() {
            return Err(PlenaryError::denied(
                "only secretaries may perform meeting management tasks",
            ));
        }
        if self.can_act(
            actor.country_id.as_ref(),
            Some(&meeting.hosting_country_id),
        ) {
            return Ok(());
        }
        Err(PlenaryError::denied(self.denial_message(
            store,
            actor,
            Some(&meeting.hosting_country_id),
        )))
    }

    /// Compose the human-readable reason a scoped action was denied
    pub fn denial_message(
        &self,
        store: &MemoryStore,
        actor: &Delegate,
        target: Option<&CountryId>,
    ) -> String {
        let Some(actor_country) = actor.country_id.as_ref() else {
            return format!(
                "{} must have a country assigned to perform jurisdiction-scoped tasks",
                actor.name
            );
        };
        let Some(target_country) = target else {
            return "the target record has no hosting country assigned".to_string();
        };

        let actor_name = country_name(store, actor_country);
        let target_name = country_name(store, target_country);
        format!(
            "{} from {} cannot manage records hosted in {}",
            actor.name, actor_name, target_name
        )
    }
}

fn country_name(store: &MemoryStore, id: &CountryId) -> String {
    store
        .country(id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| id.to_string())
}
