//! Event scopes, session assignments, and group membership.
//!
//! The three filters are independent and all must pass. Scopes and assignments are vacuously
//! satisfied when none are declared.

use crate::checks::overrides::has_allow_override;
use crate::model::{AccessOverride, AttendanceScope, Session, SessionAssignments};
use crate::policy::{EligibleSet, Policy};
use crate::Denial;
use std::collections::BTreeSet;

pub fn check_event_scope(
    scopes: &[AttendanceScope],
    person_id: &str,
    person_groups: &BTreeSet<String>,
    person_cohorts: &BTreeSet<String>,
) -> Result<(), Denial> {
    if scopes.is_empty() {
        return Ok(());
    }

    let matched = scopes.iter().any(|scope| match scope {
        AttendanceScope::Org => true,
        AttendanceScope::Person(id) => id == person_id,
        AttendanceScope::Group(id) => person_groups.contains(id),
        AttendanceScope::Cohort(id) => person_cohorts.contains(id),
    });

    if matched {
        Ok(())
    } else {
        Err(Denial::NotInEventScope)
    }
}

pub fn check_assignment(
    assignments: &SessionAssignments,
    person_id: &str,
    person_groups: &BTreeSet<String>,
) -> Result<(), Denial> {
    if assignments.is_empty() {
        return Ok(());
    }

    if assignments.people.contains(person_id)
        || assignments.groups.iter().any(|g| person_groups.contains(g))
    {
        Ok(())
    } else {
        Err(Denial::NotAssignedToSession)
    }
}

/// Only applies to grouped sessions under an `all_members` policy.
pub fn check_group_membership(
    session: &Session,
    policy: &Policy,
    person_id: &str,
    person_groups: &BTreeSet<String>,
    overrides: &[AccessOverride],
) -> Result<(), Denial> {
    let Some(group_id) = session.group_id.as_deref() else {
        return Ok(());
    };
    if policy.eligible_set != EligibleSet::AllMembers {
        return Ok(());
    }

    if person_groups.contains(group_id) || has_allow_override(overrides, person_id, group_id) {
        Ok(())
    } else {
        Err(Denial::NotGroupMember)
    }
}

/// Every group whose membership the evaluation may ask about.
pub fn referenced_groups(
    session: &Session,
    scopes: &[AttendanceScope],
    assignments: &SessionAssignments,
) -> BTreeSet<String> {
    let mut groups: BTreeSet<String> = scopes
        .iter()
        .filter_map(|s| match s {
            AttendanceScope::Group(id) => Some(id.clone()),
            _ => None,
        })
        .collect();
    groups.extend(assignments.groups.iter().cloned());
    groups.extend(session.group_id.iter().cloned());
    groups
}

/// Every cohort whose membership the evaluation may ask about.
pub fn referenced_cohorts(scopes: &[AttendanceScope]) -> BTreeSet<String> {
    scopes
        .iter()
        .filter_map(|s| match s {
            AttendanceScope::Cohort(id) => Some(id.clone()),
            _ => None,
        })
        .collect()
}
