use attendguard_types::{CheckinMethod, ids};
use std::fmt;
use time::OffsetDateTime;

/// A business denial. Expected, final for the attempt, and never an error.
#[derive(Clone, Debug, PartialEq)]
pub enum Denial {
    SessionNotFound,
    MethodDisabled {
        method: CheckinMethod,
    },
    SessionCancelled,
    NotYetOpen {
        opens_at: OffsetDateTime,
    },
    WindowClosed {
        closed_at: OffsetDateTime,
    },
    PolicyDisabled,
    LocationRequired,
    LocationNotConfigured,
    OutOfRange {
        distance_meters: i64,
        radius_meters: i64,
    },
    InvalidEventCode,
    InvalidQrToken,
    CodeRequired,
    LoginRequired,
    InviteRequired,
    IdentityUnresolved,
    NotInEventScope,
    NotAssignedToSession,
    NotGroupMember,
    DeniedByOverride {
        reason: Option<String>,
    },
    AlreadyCheckedIn,
}

impl Denial {
    pub fn code(&self) -> &'static str {
        match self {
            Denial::SessionNotFound => ids::CODE_SESSION_NOT_FOUND,
            Denial::MethodDisabled { .. } => ids::CODE_METHOD_DISABLED,
            Denial::SessionCancelled => ids::CODE_SESSION_CANCELLED,
            Denial::NotYetOpen { .. } => ids::CODE_NOT_YET_OPEN,
            Denial::WindowClosed { .. } => ids::CODE_WINDOW_CLOSED,
            Denial::PolicyDisabled => ids::CODE_POLICY_DISABLED,
            Denial::LocationRequired => ids::CODE_LOCATION_REQUIRED,
            Denial::LocationNotConfigured => ids::CODE_LOCATION_NOT_CONFIGURED,
            Denial::OutOfRange { .. } => ids::CODE_OUT_OF_RANGE,
            Denial::InvalidEventCode => ids::CODE_INVALID_EVENT_CODE,
            Denial::InvalidQrToken => ids::CODE_INVALID_QR_TOKEN,
            Denial::CodeRequired => ids::CODE_CODE_REQUIRED,
            Denial::LoginRequired => ids::CODE_LOGIN_REQUIRED,
            Denial::InviteRequired => ids::CODE_INVITE_REQUIRED,
            Denial::IdentityUnresolved => ids::CODE_IDENTITY_UNRESOLVED,
            Denial::NotInEventScope => ids::CODE_NOT_IN_EVENT_SCOPE,
            Denial::NotAssignedToSession => ids::CODE_NOT_ASSIGNED_TO_SESSION,
            Denial::NotGroupMember => ids::CODE_NOT_GROUP_MEMBER,
            Denial::DeniedByOverride { .. } => ids::CODE_ACCESS_DENIED_BY_OVERRIDE,
            Denial::AlreadyCheckedIn => ids::CODE_ALREADY_CHECKED_IN,
        }
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::SessionNotFound => f.write_str("Session not found"),
            Denial::MethodDisabled { method } => {
                write!(f, "Check-in method '{method}' is disabled for this session")
            }
            Denial::SessionCancelled => f.write_str("This session has been cancelled"),
            Denial::NotYetOpen { .. } => f.write_str("Check-in is not yet open for this session"),
            Denial::WindowClosed { .. } => f.write_str("Check-in window closed for this session"),
            Denial::PolicyDisabled => f.write_str("Self check-in not enabled for this session"),
            Denial::LocationRequired => f.write_str("Location required to check in"),
            Denial::LocationNotConfigured => {
                f.write_str("Location not configured for geofence check-in")
            }
            Denial::OutOfRange {
                distance_meters,
                radius_meters,
            } => write!(
                f,
                "You are {distance_meters} m from the session location; check-in is allowed within {radius_meters} m"
            ),
            Denial::InvalidEventCode => f.write_str("Invalid event code"),
            Denial::InvalidQrToken => f.write_str("Invalid QR code"),
            Denial::CodeRequired => f.write_str("Event code or QR scan required"),
            Denial::LoginRequired => f.write_str("Login required to check in"),
            Denial::InviteRequired => {
                f.write_str("Your account is not linked to this organization; an invite is required")
            }
            Denial::IdentityUnresolved => f.write_str("Could not identify who is checking in"),
            Denial::NotInEventScope => f.write_str("Not assigned to this event"),
            Denial::NotAssignedToSession => f.write_str("Not assigned to this session"),
            Denial::NotGroupMember => f.write_str("Not a member of this session's group"),
            Denial::DeniedByOverride { reason } => match reason.as_deref() {
                Some(reason) if !reason.trim().is_empty() => f.write_str(reason),
                _ => f.write_str("Access restricted"),
            },
            Denial::AlreadyCheckedIn => f.write_str("Already checked in"),
        }
    }
}
