//! Stable reason codes for eligibility decisions.
//!
//! Codes are short snake_case discriminators. They are part of the wire contract: callers map
//! them to localized copy, so never rename one.

// Allowed
pub const CODE_ELIGIBLE: &str = "eligible";

// Session / time & method gate
pub const CODE_SESSION_NOT_FOUND: &str = "session_not_found";
pub const CODE_METHOD_DISABLED: &str = "method_disabled";
pub const CODE_SESSION_CANCELLED: &str = "session_cancelled";
pub const CODE_NOT_YET_OPEN: &str = "not_yet_open";
pub const CODE_WINDOW_CLOSED: &str = "window_closed";

// Policy
pub const CODE_POLICY_DISABLED: &str = "policy_disabled";

// Geofence
pub const CODE_LOCATION_REQUIRED: &str = "location_required";
pub const CODE_LOCATION_NOT_CONFIGURED: &str = "location_not_configured";
pub const CODE_OUT_OF_RANGE: &str = "out_of_range";

// Code / token
pub const CODE_INVALID_EVENT_CODE: &str = "invalid_event_code";
pub const CODE_INVALID_QR_TOKEN: &str = "invalid_qr_token";
pub const CODE_CODE_REQUIRED: &str = "code_required";

// Identity
pub const CODE_LOGIN_REQUIRED: &str = "login_required";
pub const CODE_INVITE_REQUIRED: &str = "invite_required";
pub const CODE_IDENTITY_UNRESOLVED: &str = "identity_unresolved";

// Scope & assignment
pub const CODE_NOT_IN_EVENT_SCOPE: &str = "not_in_event_scope";
pub const CODE_NOT_ASSIGNED_TO_SESSION: &str = "not_assigned_to_session";
pub const CODE_NOT_GROUP_MEMBER: &str = "not_group_member";

// Override & duplicate
pub const CODE_ACCESS_DENIED_BY_OVERRIDE: &str = "access_denied_by_override";
pub const CODE_ALREADY_CHECKED_IN: &str = "already_checked_in";
