use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids;

/// Self check-in mode of an effective policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PolicyMode {
    Disabled,
    PublicWithCode,
    Authenticated,
}

impl PolicyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyMode::Disabled => "disabled",
            PolicyMode::PublicWithCode => "public_with_code",
            PolicyMode::Authenticated => "authenticated",
        }
    }
}

/// The effective policy as echoed back to callers for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicySnapshot {
    pub mode: PolicyMode,
    pub require_geofence: bool,
    pub require_event_code: bool,
    pub require_linked_user: bool,
}

/// Outcome of one eligibility evaluation.
///
/// `reason` is always populated. The optional fields are only present when the stage that
/// produced the outcome has something to say about them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub allowed: bool,
    /// Stable machine-readable reason code (see [`crate::ids`]).
    pub code: String,
    pub reason: String,

    /// The person to record attendance for. Present when allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_snapshot: Option<PolicySnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_invite: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_login: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geofence_radius: Option<i64>,
}

impl EligibilityResult {
    pub fn denied(code: &str, reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            code: code.to_string(),
            reason: reason.into(),
            person_id: None,
            policy_snapshot: None,
            requires_invite: None,
            requires_login: None,
            distance_meters: None,
            geofence_radius: None,
        }
    }

    pub fn allowed(person_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            code: ids::CODE_ELIGIBLE.to_string(),
            reason: reason.into(),
            person_id: Some(person_id.into()),
            policy_snapshot: None,
            requires_invite: None,
            requires_login: None,
            distance_meters: None,
            geofence_radius: None,
        }
    }
}
