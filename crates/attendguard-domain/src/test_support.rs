use crate::geo::EARTH_RADIUS_M;
use crate::model::{
    AccessOverride, AttendanceRecord, EvaluationContext, Location, OverrideEffect, OverrideScope,
    Session, SessionStatus,
};
use crate::policy::{EligibleSet, Policy, PolicySources};
use attendguard_types::{CheckinMethod, Coordinates, EligibilityRequest, PolicyMode};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

pub const ORG: &str = "org-1";
pub const SESSION: &str = "s-1";
pub const PERSON: &str = "p-1";
pub const EVENT_CODE: &str = "ABC123";
pub const QR_TOKEN: &str = "tok-7f3a";

pub fn site() -> Coordinates {
    Coordinates::new(40.7128, -74.0060)
}

/// Session start used by every fixture.
pub fn at_start() -> OffsetDateTime {
    datetime!(2026-03-02 09:00 UTC)
}

pub fn session() -> Session {
    let starts_at = at_start();
    Session {
        id: SESSION.to_string(),
        organization_id: ORG.to_string(),
        starts_at,
        ends_at: starts_at + Duration::hours(1),
        status: SessionStatus::Scheduled,
        location: Some(Location {
            id: "loc-1".to_string(),
            latitude: Some(site().latitude),
            longitude: Some(site().longitude),
        }),
        group_id: None,
        public_code: Some(EVENT_CODE.to_string()),
        qr_token: Some(QR_TOKEN.to_string()),
        allowed_methods: Default::default(),
    }
}

pub fn policy(mode: PolicyMode, require_geofence: bool, require_event_code: bool) -> Policy {
    Policy {
        mode,
        eligible_set: EligibleSet::AllMembers,
        require_linked_user: mode == PolicyMode::Authenticated,
        require_geofence,
        require_event_code,
    }
}

/// A context in which a kiosk check-in by [`PERSON`] passes every gate.
pub fn open_context() -> EvaluationContext {
    EvaluationContext {
        session: Some(session()),
        policies: PolicySources {
            session: Some(policy(PolicyMode::PublicWithCode, false, false)),
            ..PolicySources::default()
        },
        ..EvaluationContext::default()
    }
}

pub fn request(method: CheckinMethod) -> EligibilityRequest {
    let mut req = EligibilityRequest::new(ORG, SESSION, method);
    req.person_id = Some(PERSON.to_string());
    req
}

/// Point `meters` due north of `from`, along the meridian.
pub fn offset_north(from: Coordinates, meters: f64) -> Coordinates {
    let d_lat = (meters / EARTH_RADIUS_M).to_degrees();
    Coordinates::new(from.latitude + d_lat, from.longitude)
}

pub fn with_position(mut req: EligibilityRequest, at: Coordinates) -> EligibilityRequest {
    req.latitude = Some(at.latitude);
    req.longitude = Some(at.longitude);
    req
}

pub fn override_for(
    person_id: &str,
    scope: OverrideScope,
    effect: OverrideEffect,
    reason: Option<&str>,
) -> AccessOverride {
    AccessOverride {
        person_id: person_id.to_string(),
        scope,
        effect,
        reason: reason.map(str::to_string),
    }
}

pub fn attendance(person_id: &str) -> AttendanceRecord {
    AttendanceRecord {
        session_id: SESSION.to_string(),
        person_id: person_id.to_string(),
        checked_in_at: at_start(),
    }
}
