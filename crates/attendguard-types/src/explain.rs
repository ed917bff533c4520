//! Explain registry for reason codes.
//!
//! Maps reason codes to operator-facing explanations: what the gate checks and how an
//! administrator can unblock a person who is being turned away.

use crate::ids;

/// Explanation entry for a reason code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the outcome.
    pub title: &'static str,
    /// Which gate produces it and under what conditions.
    pub description: &'static str,
    /// What an operator can change to let the person through.
    pub remediation: &'static str,
}

/// Look up an explanation by reason code.
///
/// Returns `None` if the code is not recognized.
pub fn lookup_explanation(code: &str) -> Option<Explanation> {
    let exp = match code {
        ids::CODE_ELIGIBLE => Explanation {
            title: "Eligible",
            description: "Every gate passed. The caller may record attendance for the returned person.",
            remediation: "Nothing to do.",
        },
        ids::CODE_SESSION_NOT_FOUND => Explanation {
            title: "Session Not Found",
            description: "\
The session id does not exist, or it belongs to a different organization than the one in the
request.",
            remediation: "Check that the kiosk or QR badge points at a current session of this organization.",
        },
        ids::CODE_METHOD_DISABLED => Explanation {
            title: "Check-in Method Disabled",
            description: "The session's allowed-methods map sets the requested method to false.",
            remediation: "Enable the method on the session, or ask attendees to use another method.",
        },
        ids::CODE_SESSION_CANCELLED => Explanation {
            title: "Session Cancelled",
            description: "Cancelled sessions never accept check-ins, regardless of any other setting.",
            remediation: "Restore the session status if it was cancelled by mistake.",
        },
        ids::CODE_NOT_YET_OPEN => Explanation {
            title: "Check-in Not Open Yet",
            description: "\
Check-in opens a fixed number of minutes before the session start (15 by default, see
`[window] early_open_minutes`).",
            remediation: "Wait until the window opens, or adjust the session start time.",
        },
        ids::CODE_WINDOW_CLOSED => Explanation {
            title: "Check-in Window Closed",
            description: "\
Check-in closes a fixed number of minutes after the session end (30 by default, see
`[window] late_close_minutes`).",
            remediation: "Record attendance manually from the dashboard.",
        },
        ids::CODE_POLICY_DISABLED => Explanation {
            title: "Self Check-in Not Enabled",
            description: "\
The effective policy (session, then group, then group legacy flags, then organization, then the
built-in default) has mode `disabled`. The built-in default is disabled.",
            remediation: "Create a session, group, or organization policy with a non-disabled mode.",
        },
        ids::CODE_LOCATION_REQUIRED => Explanation {
            title: "Location Required",
            description: "The policy requires a geofence and the caller did not send coordinates.",
            remediation: "Ask the attendee to allow location access, or turn off `requireGeofence`.",
        },
        ids::CODE_LOCATION_NOT_CONFIGURED => Explanation {
            title: "Location Not Configured",
            description: "\
The policy requires a geofence but the session has no location, or its location has no
coordinates.",
            remediation: "Attach a location with latitude and longitude to the session.",
        },
        ids::CODE_OUT_OF_RANGE => Explanation {
            title: "Outside Geofence",
            description: "\
The great-circle distance between the caller and the session location exceeds the geofence
radius (100 m when no geofence is configured for the location).",
            remediation: "Move closer, or widen the geofence radius for the location.",
        },
        ids::CODE_INVALID_EVENT_CODE => Explanation {
            title: "Invalid Event Code",
            description: "The supplied event code does not match the session code (case-insensitive).",
            remediation: "Share the current session code with attendees.",
        },
        ids::CODE_INVALID_QR_TOKEN => Explanation {
            title: "Invalid QR Code",
            description: "The scanned QR token does not exactly match the session token.",
            remediation: "Display the current QR code for this session; old printouts may be stale.",
        },
        ids::CODE_CODE_REQUIRED => Explanation {
            title: "Event Code Or QR Scan Required",
            description: "\
The policy is `public_with_code` with `requireEventCode`, and the method carries no code or
token. Kiosk and geo check-ins are exempt.",
            remediation: "Use the event code or QR method, or turn off `requireEventCode`.",
        },
        ids::CODE_LOGIN_REQUIRED => Explanation {
            title: "Login Required",
            description: "The policy mode is `authenticated` and the request has no authenticated caller.",
            remediation: "Sign in to the attendee portal before checking in.",
        },
        ids::CODE_INVITE_REQUIRED => Explanation {
            title: "Invite Required",
            description: "\
The caller is signed in, but their account is not linked to a person record in this
organization.",
            remediation: "Send the person an invite so their account gets linked.",
        },
        ids::CODE_IDENTITY_UNRESOLVED => Explanation {
            title: "Person Not Identified",
            description: "The request carried no person identifier and none could be derived.",
            remediation: "Include a person id, or switch the policy to `authenticated`.",
        },
        ids::CODE_NOT_IN_EVENT_SCOPE => Explanation {
            title: "Not Assigned To This Event",
            description: "\
The event declares attendance scopes and none of them covers the person (organization-wide,
their own person id, or a group or cohort they belong to).",
            remediation: "Add a scope covering the person, or add them to a scoped group or cohort.",
        },
        ids::CODE_NOT_ASSIGNED_TO_SESSION => Explanation {
            title: "Not Assigned To This Session",
            description: "\
The session has explicit assignments and the person is neither assigned directly nor a member of
an assigned group.",
            remediation: "Assign the person, or one of their groups, to the session.",
        },
        ids::CODE_NOT_GROUP_MEMBER => Explanation {
            title: "Not A Group Member",
            description: "\
The session belongs to a group, the policy's eligible set is `all_members`, and the person is not
a member of that group.",
            remediation: "Add the person to the group, or create an `allow` override at the group scope.",
        },
        ids::CODE_ACCESS_DENIED_BY_OVERRIDE => Explanation {
            title: "Access Restricted",
            description: "\
A `deny` override exists for the person at this session's scope or its group's scope. Deny
overrides are always final.",
            remediation: "Remove the override if the restriction no longer applies.",
        },
        ids::CODE_ALREADY_CHECKED_IN => Explanation {
            title: "Already Checked In",
            description: "An attendance record already exists for this person and session.",
            remediation: "Nothing to do. Attendance was already recorded.",
        },
        _ => return None,
    };
    Some(exp)
}

/// List all known reason codes, in pipeline order.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_ELIGIBLE,
        ids::CODE_SESSION_NOT_FOUND,
        ids::CODE_METHOD_DISABLED,
        ids::CODE_SESSION_CANCELLED,
        ids::CODE_NOT_YET_OPEN,
        ids::CODE_WINDOW_CLOSED,
        ids::CODE_POLICY_DISABLED,
        ids::CODE_LOCATION_REQUIRED,
        ids::CODE_LOCATION_NOT_CONFIGURED,
        ids::CODE_OUT_OF_RANGE,
        ids::CODE_INVALID_EVENT_CODE,
        ids::CODE_INVALID_QR_TOKEN,
        ids::CODE_CODE_REQUIRED,
        ids::CODE_LOGIN_REQUIRED,
        ids::CODE_INVITE_REQUIRED,
        ids::CODE_IDENTITY_UNRESOLVED,
        ids::CODE_NOT_IN_EVENT_SCOPE,
        ids::CODE_NOT_ASSIGNED_TO_SESSION,
        ids::CODE_NOT_GROUP_MEMBER,
        ids::CODE_ACCESS_DENIED_BY_OVERRIDE,
        ids::CODE_ALREADY_CHECKED_IN,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_code_has_an_explanation() {
        for code in all_codes() {
            assert!(
                lookup_explanation(code).is_some(),
                "missing explanation for {code}"
            );
        }
    }

    #[test]
    fn unknown_code_has_no_explanation() {
        assert!(lookup_explanation("not_a_code").is_none());
    }

    #[test]
    fn codes_are_unique() {
        let mut codes = all_codes().to_vec();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all_codes().len());
    }
}
