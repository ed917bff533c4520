use crate::RepoError;
use async_trait::async_trait;
use attendguard_domain::model::{
    AccessOverride, AttendanceRecord, AttendanceScope, Geofence, OverrideScope, PersonUserLink,
    Session, SessionAssignments,
};
use attendguard_domain::policy::{Group, Policy, PolicyScope};
use std::collections::BTreeSet;

/// Read-only lookups the engine's inputs are assembled from.
///
/// Implementations must not mutate state. Every lookup either answers or fails with a
/// [`RepoError`]; "not found" is `Ok(None)` or an empty collection, never an error.
#[async_trait]
pub trait CheckinRepository: Send + Sync {
    /// Session by id, restricted to `organization_id`.
    async fn session(
        &self,
        organization_id: &str,
        session_id: &str,
    ) -> Result<Option<Session>, RepoError>;

    async fn geofence(&self, location_id: &str) -> Result<Option<Geofence>, RepoError>;

    async fn policy(&self, scope: PolicyScope, scope_id: &str)
    -> Result<Option<Policy>, RepoError>;

    /// Group row, read for its legacy self check-in flags.
    async fn group(&self, group_id: &str) -> Result<Option<Group>, RepoError>;

    async fn attendance_scopes(&self, event_id: &str) -> Result<Vec<AttendanceScope>, RepoError>;

    async fn session_assignments(&self, session_id: &str)
    -> Result<SessionAssignments, RepoError>;

    /// The subset of `group_ids` that `person_id` belongs to.
    async fn group_memberships(
        &self,
        person_id: &str,
        group_ids: &BTreeSet<String>,
    ) -> Result<BTreeSet<String>, RepoError>;

    /// The subset of `cohort_ids` that `person_id` belongs to.
    async fn cohort_memberships(
        &self,
        person_id: &str,
        cohort_ids: &BTreeSet<String>,
    ) -> Result<BTreeSet<String>, RepoError>;

    async fn identity_link(
        &self,
        organization_id: &str,
        user_id: &str,
    ) -> Result<Option<PersonUserLink>, RepoError>;

    /// Overrides for `person_id` whose `(scope_type, scope_id)` pair is one of `scopes`.
    async fn overrides(
        &self,
        person_id: &str,
        scopes: &[OverrideScope],
    ) -> Result<Vec<AccessOverride>, RepoError>;

    async fn attendance_record(
        &self,
        session_id: &str,
        person_id: &str,
    ) -> Result<Option<AttendanceRecord>, RepoError>;
}
