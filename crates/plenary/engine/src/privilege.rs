//! Delegation-head privilege derivation
//!
//! There is no stored "delegation head" privilege anywhere in the data
//! model. The authority to perform first-stage review is borrowed: a
//! delegate holds it iff they chair (or vice-chair) the one distinguished
//! subcommittee named "Head Of Delegation". Membership is mutable state
//! owned elsewhere, so the derivation runs against the store on every
//! check and is never cached on the delegate.

use plenary_store::MemoryStore;
use plenary_types::{Delegate, DelegateId, SubcommitteeId};
use tracing::{debug, warn};

/// Exact name of the distinguished subcommittee
pub const HEAD_OF_DELEGATION: &str = "Head Of Delegation";

/// Derives review authority from (role tag, group membership)
#[derive(Clone, Copy, Debug, Default)]
pub struct PrivilegeDeriver;

impl PrivilegeDeriver {
    pub fn new() -> Self {
        Self
    }

    /// True iff the delegate is Chair or Vice Chair of the subcommittee
    /// named "Head Of Delegation". Every other role tag derives nothing,
    /// including the legacy `DelegationHead` tag itself.
    pub fn has_review_privilege(&self, store: &MemoryStore, delegate: &Delegate) -> bool {
        if !delegate.role.is_group_officer() {
            return false;
        }
        let Some(subcommittee_id) = delegate.subcommittee_id.as_ref() else {
            debug!(delegate = %delegate.id, "no subcommittee membership, no review privilege");
            return false;
        };
        let privileged = store
            .subcommittee(subcommittee_id)
            .is_some_and(|s| s.name == HEAD_OF_DELEGATION);
        if privileged {
            debug!(delegate = %delegate.id, "delegation-head privilege derived from membership");
        }
        privileged
    }

    /// Id-based variant for callers holding only an id. A missing
    /// delegate is a plain "no".
    pub fn has_review_privilege_by_id(&self, store: &MemoryStore, id: &DelegateId) -> bool {
        match store.delegate(id) {
            Some(delegate) => self.has_review_privilege(store, delegate),
            None => {
                warn!(delegate = %id, "privilege check against unknown delegate");
                false
            }
        }
    }

    /// Id of the distinguished subcommittee, if it exists
    pub fn delegation_group_id(&self, store: &MemoryStore) -> Option<SubcommitteeId> {
        let found = store.subcommittee_by_name(HEAD_OF_DELEGATION);
        if found.is_none() {
            warn!("the {:?} subcommittee does not exist", HEAD_OF_DELEGATION);
        }
        found.map(|s| s.id.clone())
    }

    /// Check whether a subcommittee is the distinguished one
    pub fn is_delegation_group(&self, store: &MemoryStore, id: &SubcommitteeId) -> bool {
        store
            .subcommittee(id)
            .is_some_and(|s| s.name == HEAD_OF_DELEGATION)
    }

    /// Effective role label for display: privileged delegates show as
    /// "Head of Delegation", everyone else shows their declared tag.
    pub fn display_role(&self, store: &MemoryStore, delegate: &Delegate) -> String {
        if self.has_review_privilege(store, delegate) {
            "Head of Delegation".to_string()
        } else {
            delegate.role.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plenary_types::{RoleTag, Subcommittee};

    fn setup() -> (MemoryStore, SubcommitteeId, SubcommitteeId) {
        let mut store = MemoryStore::new();
        let hod = store.insert_subcommittee(Subcommittee::new(HEAD_OF_DELEGATION));
        let customs = store.insert_subcommittee(Subcommittee::new("Customs"));
        (store, hod, customs)
    }

    #[test]
    fn test_chair_of_distinguished_group_is_privileged() {
        let (store, hod, _) = setup();
        let chair =
            Delegate::new("Amina", "amina@example.org", RoleTag::Chair).with_subcommittee(hod);
        assert!(PrivilegeDeriver::new().has_review_privilege(&store, &chair));
    }

    #[test]
    fn test_vice_chair_of_distinguished_group_is_privileged() {
        let (store, hod, _) = setup();
        let vice =
            Delegate::new("Ben", "ben@example.org", RoleTag::ViceChair).with_subcommittee(hod);
        assert!(PrivilegeDeriver::new().has_review_privilege(&store, &vice));
    }

    #[test]
    fn test_chair_of_other_group_is_not_privileged() {
        let (store, _, customs) = setup();
        let chair =
            Delegate::new("Joy", "joy@example.org", RoleTag::Chair).with_subcommittee(customs);
        assert!(!PrivilegeDeriver::new().has_review_privilege(&store, &chair));
    }

    #[test]
    fn test_plain_member_of_distinguished_group_is_not_privileged() {
        let (store, hod, _) = setup();
        let member = Delegate::new("Ken", "ken@example.org", RoleTag::SubcommitteeMember)
            .with_subcommittee(hod);
        assert!(!PrivilegeDeriver::new().has_review_privilege(&store, &member));
    }

    #[test]
    fn test_delegation_head_tag_alone_confers_nothing() {
        let (store, _, _) = setup();
        let tagged = Delegate::new("Rose", "rose@example.org", RoleTag::DelegationHead);
        assert!(!PrivilegeDeriver::new().has_review_privilege(&store, &tagged));
    }

    #[test]
    fn test_privilege_follows_membership_changes() {
        let (mut store, hod, customs) = setup();
        let deriver = PrivilegeDeriver::new();
        let chair = Delegate::new("Amina", "amina@example.org", RoleTag::Chair)
            .with_subcommittee(hod.clone());
        let id = store.insert_delegate(chair);
        assert!(deriver.has_review_privilege_by_id(&store, &id));

        // Reassign to another subcommittee: the next check must see it.
        let mut moved = store.delegate(&id).cloned().expect("delegate exists");
        moved.subcommittee_id = Some(customs);
        store.insert_delegate(moved);
        assert!(!deriver.has_review_privilege_by_id(&store, &id));
    }

    #[test]
    fn test_delegation_group_lookup() {
        let (store, hod, customs) = setup();
        let deriver = PrivilegeDeriver::new();
        assert_eq!(deriver.delegation_group_id(&store), Some(hod.clone()));
        assert!(deriver.is_delegation_group(&store, &hod));
        assert!(!deriver.is_delegation_group(&store, &customs));
    }

    #[test]
    fn test_display_role() {
        let (store, hod, customs) = setup();
        let deriver = PrivilegeDeriver::new();

        let privileged =
            Delegate::new("Amina", "amina@example.org", RoleTag::Chair).with_subcommittee(hod);
        assert_eq!(deriver.display_role(&store, &privileged), "Head of Delegation");

        let ordinary =
            Delegate::new("Joy", "joy@example.org", RoleTag::Chair).with_subcommittee(customs);
        assert_eq!(deriver.display_role(&store, &ordinary), "Chair");
    }
}
