use crate::checks::geofence::GeofenceReading;
use crate::policy::EffectivePolicy;
use crate::Denial;
use attendguard_types::EligibilityResult;

/// Pipeline states, in evaluation order. Transitions only ever move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    SessionLookup,
    MethodGate,
    StatusGate,
    TimeWindowGate,
    PolicyResolve,
    PolicyDisabledGate,
    GeofenceGate,
    CodeGate,
    IdentityResolve,
    ScopeMatch,
    AssignmentMatch,
    GroupMembershipGate,
    OverrideGate,
    DuplicateGate,
    Allowed,
}

impl Stage {
    pub const PIPELINE: [Stage; 15] = [
        Stage::SessionLookup,
        Stage::MethodGate,
        Stage::StatusGate,
        Stage::TimeWindowGate,
        Stage::PolicyResolve,
        Stage::PolicyDisabledGate,
        Stage::GeofenceGate,
        Stage::CodeGate,
        Stage::IdentityResolve,
        Stage::ScopeMatch,
        Stage::AssignmentMatch,
        Stage::GroupMembershipGate,
        Stage::OverrideGate,
        Stage::DuplicateGate,
        Stage::Allowed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::SessionLookup => "session_lookup",
            Stage::MethodGate => "method_gate",
            Stage::StatusGate => "status_gate",
            Stage::TimeWindowGate => "time_window_gate",
            Stage::PolicyResolve => "policy_resolve",
            Stage::PolicyDisabledGate => "policy_disabled_gate",
            Stage::GeofenceGate => "geofence_gate",
            Stage::CodeGate => "code_gate",
            Stage::IdentityResolve => "identity_resolve",
            Stage::ScopeMatch => "scope_match",
            Stage::AssignmentMatch => "assignment_match",
            Stage::GroupMembershipGate => "group_membership_gate",
            Stage::OverrideGate => "override_gate",
            Stage::DuplicateGate => "duplicate_gate",
            Stage::Allowed => "allowed",
        }
    }

    pub fn next(self) -> Option<Stage> {
        let idx = Stage::PIPELINE.iter().position(|s| *s == self)?;
        Stage::PIPELINE.get(idx + 1).copied()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Decision {
    Allowed { person_id: String },
    Denied { stage: Stage, denial: Denial },
}

/// Result of one evaluation plus everything learned on the way.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub decision: Decision,
    /// Set once policy resolution ran.
    pub policy: Option<EffectivePolicy>,
    /// Set once the geofence gate measured a distance.
    pub geofence: Option<GeofenceReading>,
    /// Set once identity resolution succeeded, even if a later gate denied.
    pub person_id: Option<String>,
}

impl Evaluation {
    pub fn is_allowed(&self) -> bool {
        matches!(self.decision, Decision::Allowed { .. })
    }

    /// Terminal state reached.
    pub fn stage(&self) -> Stage {
        match &self.decision {
            Decision::Allowed { .. } => Stage::Allowed,
            Decision::Denied { stage, .. } => *stage,
        }
    }

    pub fn denial(&self) -> Option<&Denial> {
        match &self.decision {
            Decision::Allowed { .. } => None,
            Decision::Denied { denial, .. } => Some(denial),
        }
    }

    pub fn code(&self) -> &'static str {
        match &self.decision {
            Decision::Allowed { .. } => attendguard_types::ids::CODE_ELIGIBLE,
            Decision::Denied { denial, .. } => denial.code(),
        }
    }

    /// Project into the wire result handed back to callers.
    pub fn to_result(&self) -> EligibilityResult {
        let mut result = match &self.decision {
            Decision::Allowed { person_id } => {
                EligibilityResult::allowed(person_id.clone(), "Eligible for check-in")
            }
            Decision::Denied { denial, .. } => {
                EligibilityResult::denied(denial.code(), denial.to_string())
            }
        };

        result.policy_snapshot = self.policy.as_ref().map(|p| p.policy.snapshot());

        match self.denial() {
            Some(Denial::LoginRequired) => result.requires_login = Some(true),
            Some(Denial::InviteRequired) => result.requires_invite = Some(true),
            Some(Denial::OutOfRange {
                distance_meters,
                radius_meters,
            }) => {
                result.distance_meters = Some(*distance_meters);
                result.geofence_radius = Some(*radius_meters);
            }
            _ => {
                if let Some(reading) = &self.geofence {
                    result.distance_meters = Some(reading.rounded_distance());
                    result.geofence_radius = Some(reading.rounded_radius());
                }
            }
        }

        result
    }
}
