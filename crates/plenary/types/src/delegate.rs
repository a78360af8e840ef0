//! Delegates: the actors of the tracker
//!
//! A delegate carries a declared role tag, an optional jurisdiction
//! (country) and an optional subcommittee membership. Review authority is
//! NOT a role tag: it is derived from (role, membership) at check time,
//! so nothing here stores a privilege flag.

use crate::{CountryId, DelegateId, SubcommitteeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Declared role of a delegate. A fixed enumeration; permissions beyond
/// the tag itself are derived elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleTag {
    /// System administrator
    Admin,
    /// General secretary (jurisdiction-scoped)
    Secretary,
    /// Chair of a subcommittee
    Chair,
    /// Vice chair of a subcommittee
    ViceChair,
    /// Legacy tag. Carries NO privileges by itself; delegation-head
    /// authority is derived from chairing the distinguished subcommittee.
    DelegationHead,
    /// Commissioner general (second review stage)
    CommissionerGeneral,
    /// Ordinary subcommittee member
    SubcommitteeMember,
    /// Delegation secretary (jurisdiction-scoped)
    DelegationSecretary,
    /// Committee secretary (jurisdiction-scoped)
    CommitteeSecretary,
    /// Ordinary committee member
    CommitteeMember,
}

impl RoleTag {
    /// The secretarial roles are jurisdiction-scoped: they may only act on
    /// records hosted by their own country.
    pub fn is_secretarial(&self) -> bool {
        matches!(
            self,
            Self::Secretary | Self::DelegationSecretary | Self::CommitteeSecretary
        )
    }

    /// Chair or vice chair of a subcommittee
    pub fn is_group_officer(&self) -> bool {
        matches!(self, Self::Chair | Self::ViceChair)
    }
}

impl std::fmt::Display for RoleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Admin => "Admin",
            Self::Secretary => "Secretary",
            Self::Chair => "Chair",
            Self::ViceChair => "Vice Chair",
            Self::DelegationHead => "Delegation Head",
            Self::CommissionerGeneral => "Commissioner General",
            Self::SubcommitteeMember => "Subcommittee Member",
            Self::DelegationSecretary => "Delegation Secretary",
            Self::CommitteeSecretary => "Committee Secretary",
            Self::CommitteeMember => "Committee Member",
        };
        write!(f, "{}", label)
    }
}

/// A delegate record
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Delegate {
    /// Unique identifier
    pub id: DelegateId,
    /// Display name
    pub name: String,
    /// Contact email, used by the mail dispatcher
    pub email: String,
    /// Declared role
    pub role: RoleTag,
    /// Jurisdiction, if the delegate is bound to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<CountryId>,
    /// Subcommittee membership, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcommittee_id: Option<SubcommitteeId>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Delegate {
    /// Create a new delegate with a fresh id
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: RoleTag) -> Self {
        Self {
            id: DelegateId::generate(),
            name: name.into(),
            email: email.into(),
            role,
            country_id: None,
            subcommittee_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_country(mut self, country_id: CountryId) -> Self {
        self.country_id = Some(country_id);
        self
    }

    pub fn with_subcommittee(mut self, subcommittee_id: SubcommitteeId) -> Self {
        self.subcommittee_id = Some(subcommittee_id);
        self
    }

    /// Check membership in a specific subcommittee
    pub fn belongs_to(&self, subcommittee_id: &SubcommitteeId) -> bool {
        self.subcommittee_id.as_ref() == Some(subcommittee_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secretarial_roles() {
        assert!(RoleTag::Secretary.is_secretarial());
        assert!(RoleTag::DelegationSecretary.is_secretarial());
        assert!(RoleTag::CommitteeSecretary.is_secretarial());
        assert!(!RoleTag::Chair.is_secretarial());
        assert!(!RoleTag::Admin.is_secretarial());
    }

    #[test]
    fn test_group_officer_roles() {
        assert!(RoleTag::Chair.is_group_officer());
        assert!(RoleTag::ViceChair.is_group_officer());
        assert!(!RoleTag::DelegationHead.is_group_officer());
        assert!(!RoleTag::SubcommitteeMember.is_group_officer());
    }

    #[test]
    fn test_belongs_to() {
        let sc = SubcommitteeId::new("sc-1");
        let delegate = Delegate::new("Amina", "amina@example.org", RoleTag::Chair)
            .with_subcommittee(sc.clone());
        assert!(delegate.belongs_to(&sc));
        assert!(!delegate.belongs_to(&SubcommitteeId::new("sc-2")));

        let unaffiliated = Delegate::new("Brian", "brian@example.org", RoleTag::Secretary);
        assert!(!unaffiliated.belongs_to(&sc));
    }
}
