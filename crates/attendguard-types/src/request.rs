use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the caller is attempting to check in.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CheckinMethod {
    Qr,
    Geo,
    EventCode,
    Kiosk,
    Manual,
}

impl CheckinMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckinMethod::Qr => "qr",
            CheckinMethod::Geo => "geo",
            CheckinMethod::EventCode => "event_code",
            CheckinMethod::Kiosk => "kiosk",
            CheckinMethod::Manual => "manual",
        }
    }
}

impl fmt::Display for CheckinMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A WGS84 coordinate in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One self check-in attempt, as submitted by the kiosk, portal, or dashboard endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRequest {
    pub organization_id: String,
    pub session_id: String,

    /// Caller-supplied person identifier (anonymous and code-based flows).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,

    /// Identity of the authenticated caller, as produced by the auth handshake.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_user_id: Option<String>,

    pub method: CheckinMethod,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Reported GPS accuracy in meters. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_token: Option<String>,
}

impl EligibilityRequest {
    pub fn new(
        organization_id: impl Into<String>,
        session_id: impl Into<String>,
        method: CheckinMethod,
    ) -> Self {
        Self {
            organization_id: organization_id.into(),
            session_id: session_id.into(),
            person_id: None,
            auth_user_id: None,
            method,
            latitude: None,
            longitude: None,
            accuracy: None,
            event_code: None,
            qr_token: None,
        }
    }

    /// Caller position, only when both latitude and longitude were supplied.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }
}
