//! Staged context loading.
//!
//! Reads happen in four phases. After each phase the partial context is evaluated; if the
//! evaluation already ends in a denial at a stage the phase fully covers, loading stops there.
//! The engine then reaches the same terminal stage on the partial context, because the gates it
//! never got to are the ones whose inputs were never read.

use crate::{CheckinRepository, RepoError};
use attendguard_domain::checks::{overrides, scope};
use attendguard_domain::model::EvaluationContext;
use attendguard_domain::policy::{PolicyScope, PolicySources};
use attendguard_domain::{EngineConfig, Evaluation, Stage, evaluate, precheck};
use attendguard_types::{EligibilityRequest, PolicyMode};
use futures::try_join;
use std::collections::BTreeSet;
use time::OffsetDateTime;
use tracing::debug;

fn settled(eval: &Evaluation, covered: Stage) -> bool {
    !eval.is_allowed() && eval.stage() <= covered
}

/// Load everything [`attendguard_domain::evaluate`] needs for `req`, and nothing it cannot use.
pub async fn load_context<R>(
    repo: &R,
    req: &EligibilityRequest,
    now: OffsetDateTime,
    cfg: &EngineConfig,
) -> Result<EvaluationContext, RepoError>
where
    R: CheckinRepository + ?Sized,
{
    let mut ctx = EvaluationContext::default();

    // Phase 1: session.
    let session = repo
        .session(&req.organization_id, &req.session_id)
        .await?
        .filter(|s| s.organization_id == req.organization_id);
    let Some(session) = session else {
        debug!(session_id = %req.session_id, "session not found, stopping");
        return Ok(ctx);
    };
    if let Err((stage, denial)) = precheck(&session, req, now, cfg) {
        debug!(
            session_id = %req.session_id,
            stage = stage.as_str(),
            code = denial.code(),
            "session gates denied, stopping"
        );
        ctx.session = Some(session);
        return Ok(ctx);
    }

    // Phase 2: policy cascade and geofence.
    let group_id = session.group_id.as_deref();
    let location_id = session.location.as_ref().map(|l| l.id.as_str());
    let (session_policy, group_policy, group, org_policy, geofence) = try_join!(
        repo.policy(PolicyScope::Session, &session.id),
        async {
            match group_id {
                Some(id) => repo.policy(PolicyScope::Group, id).await,
                None => Ok(None),
            }
        },
        async {
            match group_id {
                Some(id) => repo.group(id).await,
                None => Ok(None),
            }
        },
        repo.policy(PolicyScope::Org, &session.organization_id),
        async {
            match location_id {
                Some(id) => repo.geofence(id).await,
                None => Ok(None),
            }
        },
    )?;
    ctx.policies = PolicySources {
        session: session_policy,
        group: group_policy,
        group_legacy: group.and_then(|g| g.legacy_policy()),
        org: org_policy,
    };
    ctx.geofence = geofence;
    ctx.session = Some(session);

    let eval = evaluate(&ctx, req, now, cfg);
    debug!(
        session_id = %req.session_id,
        source = eval.policy.as_ref().map(|p| p.source.as_str()),
        "policy loaded"
    );
    if settled(&eval, Stage::CodeGate) {
        debug!(stage = eval.stage().as_str(), code = eval.code(), "policy gates denied, stopping");
        return Ok(ctx);
    }

    // Phase 3: identity link, only for authenticated policies with a caller.
    let authenticated = eval
        .policy
        .as_ref()
        .is_some_and(|p| p.policy.mode == PolicyMode::Authenticated);
    let caller = req
        .auth_user_id
        .as_deref()
        .filter(|id| !id.trim().is_empty());
    if let (true, Some(user_id)) = (authenticated, caller) {
        ctx.identity_link = repo.identity_link(&req.organization_id, user_id).await?;
    }

    let eval = evaluate(&ctx, req, now, cfg);
    if settled(&eval, Stage::IdentityResolve) {
        debug!(stage = eval.stage().as_str(), code = eval.code(), "identity unresolved, stopping");
        return Ok(ctx);
    }
    let Some(person_id) = eval.person_id else {
        return Ok(ctx);
    };

    // Phase 4: eligibility filters for the resolved person.
    let Some(session) = ctx.session.as_ref() else {
        return Ok(ctx);
    };
    let override_scopes = overrides::override_targets(session);
    let (scopes, assignments, person_overrides, existing) = try_join!(
        repo.attendance_scopes(&session.id),
        repo.session_assignments(&session.id),
        repo.overrides(&person_id, &override_scopes),
        repo.attendance_record(&session.id, &person_id),
    )?;

    let groups = scope::referenced_groups(session, &scopes, &assignments);
    let cohorts = scope::referenced_cohorts(&scopes);
    let (person_groups, person_cohorts) = try_join!(
        async {
            if groups.is_empty() {
                Ok(BTreeSet::new())
            } else {
                repo.group_memberships(&person_id, &groups).await
            }
        },
        async {
            if cohorts.is_empty() {
                Ok(BTreeSet::new())
            } else {
                repo.cohort_memberships(&person_id, &cohorts).await
            }
        },
    )?;

    debug!(
        session_id = %req.session_id,
        person_id = %person_id,
        scopes = scopes.len(),
        overrides = person_overrides.len(),
        "eligibility inputs loaded"
    );

    ctx.scopes = scopes;
    ctx.assignments = assignments;
    ctx.overrides = person_overrides;
    ctx.existing_attendance = existing;
    ctx.person_groups = person_groups;
    ctx.person_cohorts = person_cohorts;
    Ok(ctx)
}
