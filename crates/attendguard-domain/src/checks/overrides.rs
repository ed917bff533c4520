//! Per-person overrides and duplicate suppression.
//!
//! Overrides are matched on the `(scope_type, scope_id)` pair as a unit: a group override only
//! applies when its scope is `group` and its id is the session's group, never on either half
//! alone.

use crate::model::{AccessOverride, AttendanceRecord, OverrideEffect, OverrideScope, Session};
use crate::Denial;

/// The scope pairs whose overrides apply to `session`.
pub fn override_targets(session: &Session) -> Vec<OverrideScope> {
    let mut targets = vec![OverrideScope::Session(session.id.clone())];
    if let Some(group_id) = &session.group_id {
        targets.push(OverrideScope::Group(group_id.clone()));
    }
    targets
}

pub fn check_deny_overrides(
    session: &Session,
    person_id: &str,
    overrides: &[AccessOverride],
) -> Result<(), Denial> {
    let targets = override_targets(session);
    let deny = overrides.iter().find(|o| {
        o.effect == OverrideEffect::Deny && o.person_id == person_id && targets.contains(&o.scope)
    });

    match deny {
        Some(o) => Err(Denial::DeniedByOverride {
            reason: o.reason.clone(),
        }),
        None => Ok(()),
    }
}

pub fn has_allow_override(overrides: &[AccessOverride], person_id: &str, group_id: &str) -> bool {
    overrides.iter().any(|o| {
        o.effect == OverrideEffect::Allow
            && o.person_id == person_id
            && matches!(&o.scope, OverrideScope::Group(id) if id == group_id)
    })
}

pub fn check_duplicate(
    session: &Session,
    person_id: &str,
    existing: Option<&AttendanceRecord>,
) -> Result<(), Denial> {
    match existing {
        Some(r) if r.session_id == session.id && r.person_id == person_id => {
            Err(Denial::AlreadyCheckedIn)
        }
        _ => Ok(()),
    }
}
