//! Organizational plumbing records: countries, subcommittees, meetings
//!
//! These carry no workflow of their own. The core reads them to resolve
//! jurisdictions and group membership; their CRUD lives with the caller.

use crate::{CountryId, DelegateId, MeetingId, SubcommitteeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A member country (jurisdiction)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
}

impl Country {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CountryId::generate(),
            name: name.into(),
        }
    }
}

/// A subcommittee: the responsible group a resolution share is assigned to
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Subcommittee {
    pub id: SubcommitteeId,
    pub name: String,
}

impl Subcommittee {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SubcommitteeId::generate(),
            name: name.into(),
        }
    }
}

/// A meeting. Resolutions are produced by meetings, and the hosting
/// country is the jurisdiction the location scope guard checks against.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Meeting {
    /// Unique identifier
    pub id: MeetingId,
    /// Meeting title
    pub title: String,
    /// The country hosting the meeting
    pub hosting_country_id: CountryId,
    /// Who created the meeting
    pub created_by: DelegateId,
    /// When the meeting takes place
    pub scheduled_at: DateTime<Utc>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Meeting {
    pub fn new(
        title: impl Into<String>,
        hosting_country_id: CountryId,
        created_by: DelegateId,
        scheduled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MeetingId::generate(),
            title: title.into(),
            hosting_country_id,
            created_by,
            scheduled_at,
            created_at: Utc::now(),
        }
    }
}
