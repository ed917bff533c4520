//! Event code / QR token validation for `public_with_code` policies.

use crate::model::Session;
use crate::policy::Policy;
use crate::Denial;
use attendguard_types::{CheckinMethod, EligibilityRequest, PolicyMode};

pub fn is_required(policy: &Policy, method: CheckinMethod) -> bool {
    method != CheckinMethod::Kiosk
        && policy.require_event_code
        && policy.mode == PolicyMode::PublicWithCode
}

pub fn check(session: &Session, policy: &Policy, req: &EligibilityRequest) -> Result<(), Denial> {
    if !is_required(policy, req.method) {
        return Ok(());
    }

    let code = supplied(req.event_code.as_deref());
    let token = req.qr_token.as_deref().filter(|t| !t.is_empty());

    match req.method {
        // Being inside the geofence stands in for knowing the code.
        CheckinMethod::Geo | CheckinMethod::Kiosk => Ok(()),
        CheckinMethod::EventCode => match code {
            Some(code) => verify_event_code(session, code),
            None => Err(Denial::CodeRequired),
        },
        CheckinMethod::Qr => match token {
            Some(token) => verify_qr_token(session, token),
            None => Err(Denial::CodeRequired),
        },
        CheckinMethod::Manual => match (code, token) {
            (Some(code), _) => verify_event_code(session, code),
            (None, Some(token)) => verify_qr_token(session, token),
            (None, None) => Err(Denial::CodeRequired),
        },
    }
}

/// Event codes are typed by hand: surrounding whitespace is ignored.
fn supplied(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn verify_event_code(session: &Session, code: &str) -> Result<(), Denial> {
    match supplied(session.public_code.as_deref()) {
        Some(expected) if expected.to_lowercase() == code.to_lowercase() => Ok(()),
        _ => Err(Denial::InvalidEventCode),
    }
}

/// Tokens are machine-scanned and compared byte for byte.
fn verify_qr_token(session: &Session, token: &str) -> Result<(), Denial> {
    match session.qr_token.as_deref() {
        Some(expected) if !expected.is_empty() && expected == token => Ok(()),
        _ => Err(Denial::InvalidQrToken),
    }
}
