use crate::checks::{code, geofence, identity, overrides, scope, window};
use crate::config::EngineConfig;
use crate::model::{EvaluationContext, Session};
use crate::policy::resolve_policy;
use crate::report::{Decision, Evaluation, Stage};
use crate::Denial;
use attendguard_types::{EligibilityRequest, PolicyMode};
use time::OffsetDateTime;

type Terminal = (Stage, Denial);

fn at(stage: Stage) -> impl FnOnce(Denial) -> Terminal {
    move |denial| (stage, denial)
}

/// The session-only gates (method, status, time window).
///
/// Callers loading a context use this to stop reading as soon as the session alone rules the
/// attempt out. [`evaluate`] runs the same checks.
pub fn precheck(
    session: &Session,
    req: &EligibilityRequest,
    now: OffsetDateTime,
    cfg: &EngineConfig,
) -> Result<(), (Stage, Denial)> {
    window::check_method(session, req.method).map_err(at(Stage::MethodGate))?;
    window::check_status(session).map_err(at(Stage::StatusGate))?;
    window::check_time_window(session, now, cfg).map_err(at(Stage::TimeWindowGate))?;
    Ok(())
}

/// Run the full pipeline over a loaded context. Pure: same inputs, same evaluation.
pub fn evaluate(
    ctx: &EvaluationContext,
    req: &EligibilityRequest,
    now: OffsetDateTime,
    cfg: &EngineConfig,
) -> Evaluation {
    let mut eval = Evaluation {
        decision: Decision::Allowed {
            person_id: String::new(),
        },
        policy: None,
        geofence: None,
        person_id: None,
    };

    eval.decision = match run(ctx, req, now, cfg, &mut eval) {
        Ok(person_id) => Decision::Allowed { person_id },
        Err((stage, denial)) => Decision::Denied { stage, denial },
    };
    eval
}

fn run(
    ctx: &EvaluationContext,
    req: &EligibilityRequest,
    now: OffsetDateTime,
    cfg: &EngineConfig,
    eval: &mut Evaluation,
) -> Result<String, Terminal> {
    let session = ctx
        .session
        .as_ref()
        .filter(|s| s.id == req.session_id && s.organization_id == req.organization_id)
        .ok_or((Stage::SessionLookup, Denial::SessionNotFound))?;

    precheck(session, req, now, cfg)?;

    let effective = resolve_policy(&ctx.policies);
    let policy = effective.policy.clone();
    eval.policy = Some(effective);

    if policy.mode == PolicyMode::Disabled {
        return Err((Stage::PolicyDisabledGate, Denial::PolicyDisabled));
    }

    eval.geofence = geofence::check(
        session,
        ctx.geofence.as_ref(),
        &policy,
        req.coordinates(),
        cfg,
    )
    .map_err(at(Stage::GeofenceGate))?;

    code::check(session, &policy, req).map_err(at(Stage::CodeGate))?;

    let person_id = identity::resolve_person(
        &policy,
        req,
        ctx.identity_link.as_ref(),
        &session.organization_id,
    )
    .map_err(at(Stage::IdentityResolve))?;
    eval.person_id = Some(person_id.clone());

    scope::check_event_scope(
        &ctx.scopes,
        &person_id,
        &ctx.person_groups,
        &ctx.person_cohorts,
    )
    .map_err(at(Stage::ScopeMatch))?;

    scope::check_assignment(&ctx.assignments, &person_id, &ctx.person_groups)
        .map_err(at(Stage::AssignmentMatch))?;

    scope::check_group_membership(
        session,
        &policy,
        &person_id,
        &ctx.person_groups,
        &ctx.overrides,
    )
    .map_err(at(Stage::GroupMembershipGate))?;

    overrides::check_deny_overrides(session, &person_id, &ctx.overrides)
        .map_err(at(Stage::OverrideGate))?;

    overrides::check_duplicate(session, &person_id, ctx.existing_attendance.as_ref())
        .map_err(at(Stage::DuplicateGate))?;

    Ok(person_id)
}
