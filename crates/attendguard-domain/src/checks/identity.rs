//! Maps the caller to a person record.

use crate::model::PersonUserLink;
use crate::policy::Policy;
use crate::Denial;
use attendguard_types::{EligibilityRequest, PolicyMode};

/// Resolve the person to check in.
///
/// Authenticated policies go through the caller's identity link within `organization_id`;
/// every other mode trusts the caller-supplied person id.
pub fn resolve_person(
    policy: &Policy,
    req: &EligibilityRequest,
    link: Option<&PersonUserLink>,
    organization_id: &str,
) -> Result<String, Denial> {
    let person = if policy.mode == PolicyMode::Authenticated {
        let Some(user_id) = non_empty(req.auth_user_id.as_deref()) else {
            return Err(Denial::LoginRequired);
        };
        let Some(link) =
            link.filter(|l| l.user_id == user_id && l.organization_id == organization_id)
        else {
            return Err(Denial::InviteRequired);
        };
        non_empty(Some(&link.person_id))
    } else {
        non_empty(req.person_id.as_deref())
    };

    person
        .map(str::to_string)
        .ok_or(Denial::IdentityUnresolved)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
