use crate::policy::PolicySources;
use attendguard_types::{CheckinMethod, Coordinates};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Scheduled,
    Active,
    Completed,
    Cancelled,
}

/// Per-method allow-map. A method is allowed unless explicitly set to `false`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowedMethods(BTreeMap<CheckinMethod, bool>);

impl AllowedMethods {
    pub fn is_allowed(&self, method: CheckinMethod) -> bool {
        self.0.get(&method).copied().unwrap_or(true)
    }

    pub fn set(&mut self, method: CheckinMethod, allowed: bool) {
        self.0.insert(method, allowed);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Location {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub organization_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub public_code: Option<String>,
    #[serde(default)]
    pub qr_token: Option<String>,
    #[serde(default)]
    pub allowed_methods: AllowedMethods,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeofenceShape {
    #[default]
    Circle,
    /// Evaluated by its radius (bounding circle).
    Polygon,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geofence {
    pub location_id: String,
    pub radius_m: f64,
    #[serde(default)]
    pub shape: GeofenceShape,
}

impl Geofence {
    /// Configured radius, or `default_m` when the stored value is not a positive number.
    pub fn effective_radius(&self, default_m: f64) -> f64 {
        if self.radius_m.is_finite() && self.radius_m > 0.0 {
            self.radius_m
        } else {
            default_m
        }
    }
}

/// Declared eligibility boundary for an event. Any single match admits the person.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum AttendanceScope {
    Org,
    Group(String),
    Cohort(String),
    Person(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum AssignmentTarget {
    Person(String),
    Group(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAssignment {
    pub session_id: String,
    pub target: AssignmentTarget,
}

/// Explicit assignments for one session, split by target kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionAssignments {
    pub people: BTreeSet<String>,
    pub groups: BTreeSet<String>,
}

impl SessionAssignments {
    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.groups.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMembership {
    pub person_id: String,
    pub group_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortMembership {
    pub person_id: String,
    pub cohort_id: String,
}

/// Links an authenticated caller to exactly one person within an organization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonUserLink {
    pub user_id: String,
    pub person_id: String,
    pub organization_id: String,
}

/// The `(scope_type, scope_id)` pair an override is attached to.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum OverrideScope {
    Session(String),
    Group(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideEffect {
    Allow,
    Deny,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessOverride {
    pub person_id: String,
    pub scope: OverrideScope,
    pub effect: OverrideEffect,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub session_id: String,
    pub person_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub checked_in_at: OffsetDateTime,
}

/// Everything the engine reads for one evaluation.
///
/// The loader may stop early and hand over a partial context; evaluation then terminates at the
/// same stage the loader stopped at, because later stages are never reached.
#[derive(Clone, Debug, Default)]
pub struct EvaluationContext {
    pub session: Option<Session>,
    pub geofence: Option<Geofence>,
    pub policies: PolicySources,
    pub identity_link: Option<PersonUserLink>,

    /// Scopes declared for the event. Empty = unrestricted by scope.
    pub scopes: Vec<AttendanceScope>,
    pub assignments: SessionAssignments,

    /// The resolved person's memberships among the groups and cohorts the session references.
    pub person_groups: BTreeSet<String>,
    pub person_cohorts: BTreeSet<String>,

    pub overrides: Vec<AccessOverride>,
    pub existing_attendance: Option<AttendanceRecord>,
}
