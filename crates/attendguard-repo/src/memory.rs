use crate::{CheckinRepository, RepoError};
use async_trait::async_trait;
use attendguard_domain::model::{
    AccessOverride, AssignmentTarget, AttendanceRecord, AttendanceScope, CohortMembership,
    Geofence, GroupMembership, OverrideScope, PersonUserLink, Session, SessionAssignment,
    SessionAssignments,
};
use attendguard_domain::policy::{Group, Policy, PolicyRecord, PolicyScope};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An attendance scope row attached to an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeRow {
    pub event_id: String,
    pub scope: AttendanceScope,
}

/// A point-in-time dump of every table the engine reads.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Snapshot {
    pub sessions: Vec<Session>,
    pub geofences: Vec<Geofence>,
    pub policies: Vec<PolicyRecord>,
    pub groups: Vec<Group>,
    pub scopes: Vec<ScopeRow>,
    pub assignments: Vec<SessionAssignment>,
    pub group_memberships: Vec<GroupMembership>,
    pub cohort_memberships: Vec<CohortMembership>,
    pub identity_links: Vec<PersonUserLink>,
    pub overrides: Vec<AccessOverride>,
    pub attendance: Vec<AttendanceRecord>,
}

impl Snapshot {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryRepository {
    snapshot: Snapshot,
}

impl InMemoryRepository {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

#[async_trait]
impl CheckinRepository for InMemoryRepository {
    async fn session(
        &self,
        organization_id: &str,
        session_id: &str,
    ) -> Result<Option<Session>, RepoError> {
        Ok(self
            .snapshot
            .sessions
            .iter()
            .find(|s| s.id == session_id && s.organization_id == organization_id)
            .cloned())
    }

    async fn geofence(&self, location_id: &str) -> Result<Option<Geofence>, RepoError> {
        Ok(self
            .snapshot
            .geofences
            .iter()
            .find(|g| g.location_id == location_id)
            .cloned())
    }

    async fn policy(
        &self,
        scope: PolicyScope,
        scope_id: &str,
    ) -> Result<Option<Policy>, RepoError> {
        Ok(self
            .snapshot
            .policies
            .iter()
            .find(|p| p.scope == scope && p.scope_id == scope_id)
            .map(|p| p.policy.clone()))
    }

    async fn group(&self, group_id: &str) -> Result<Option<Group>, RepoError> {
        Ok(self
            .snapshot
            .groups
            .iter()
            .find(|g| g.id == group_id)
            .cloned())
    }

    async fn attendance_scopes(&self, event_id: &str) -> Result<Vec<AttendanceScope>, RepoError> {
        Ok(self
            .snapshot
            .scopes
            .iter()
            .filter(|row| row.event_id == event_id)
            .map(|row| row.scope.clone())
            .collect())
    }

    async fn session_assignments(
        &self,
        session_id: &str,
    ) -> Result<SessionAssignments, RepoError> {
        let mut out = SessionAssignments::default();
        for assignment in self
            .snapshot
            .assignments
            .iter()
            .filter(|a| a.session_id == session_id)
        {
            match &assignment.target {
                AssignmentTarget::Person(id) => out.people.insert(id.clone()),
                AssignmentTarget::Group(id) => out.groups.insert(id.clone()),
            };
        }
        Ok(out)
    }

    async fn group_memberships(
        &self,
        person_id: &str,
        group_ids: &BTreeSet<String>,
    ) -> Result<BTreeSet<String>, RepoError> {
        Ok(self
            .snapshot
            .group_memberships
            .iter()
            .filter(|m| m.person_id == person_id && group_ids.contains(&m.group_id))
            .map(|m| m.group_id.clone())
            .collect())
    }

    async fn cohort_memberships(
        &self,
        person_id: &str,
        cohort_ids: &BTreeSet<String>,
    ) -> Result<BTreeSet<String>, RepoError> {
        Ok(self
            .snapshot
            .cohort_memberships
            .iter()
            .filter(|m| m.person_id == person_id && cohort_ids.contains(&m.cohort_id))
            .map(|m| m.cohort_id.clone())
            .collect())
    }

    async fn identity_link(
        &self,
        organization_id: &str,
        user_id: &str,
    ) -> Result<Option<PersonUserLink>, RepoError> {
        Ok(self
            .snapshot
            .identity_links
            .iter()
            .find(|l| l.user_id == user_id && l.organization_id == organization_id)
            .cloned())
    }

    async fn overrides(
        &self,
        person_id: &str,
        scopes: &[OverrideScope],
    ) -> Result<Vec<AccessOverride>, RepoError> {
        Ok(self
            .snapshot
            .overrides
            .iter()
            .filter(|o| o.person_id == person_id && scopes.contains(&o.scope))
            .cloned()
            .collect())
    }

    async fn attendance_record(
        &self,
        session_id: &str,
        person_id: &str,
    ) -> Result<Option<AttendanceRecord>, RepoError> {
        Ok(self
            .snapshot
            .attendance
            .iter()
            .find(|r| r.session_id == session_id && r.person_id == person_id)
            .cloned())
    }
}
