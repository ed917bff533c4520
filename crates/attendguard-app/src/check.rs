//! The `check` use case: load a context under the read timeout, then decide.

use crate::EvaluateError;
use attendguard_domain::{Evaluation, evaluate};
use attendguard_repo::{CheckinRepository, load_context};
use attendguard_settings::ResolvedConfig;
use attendguard_types::{EligibilityRequest, EligibilityResult};
use time::OffsetDateTime;
use tracing::{info, warn};

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    pub request: &'a EligibilityRequest,
    /// Clock reading used for the time window. Callers pass the current time.
    pub now: OffsetDateTime,
    pub config: &'a ResolvedConfig,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// Wire result for the caller.
    pub result: EligibilityResult,
    /// Full evaluation, including the terminal stage and policy source.
    pub evaluation: Evaluation,
}

/// Answer one eligibility question.
///
/// Read failures and timeouts come back as [`EvaluateError`], never as a denial.
pub async fn run_check<R>(repo: &R, input: CheckInput<'_>) -> Result<CheckOutput, EvaluateError>
where
    R: CheckinRepository + ?Sized,
{
    let req = input.request;
    let budget = input.config.read_timeout;
    let load = load_context(repo, req, input.now, &input.config.engine);

    let ctx = match tokio::time::timeout(budget, load).await {
        Ok(Ok(ctx)) => ctx,
        Ok(Err(err)) => {
            warn!(session_id = %req.session_id, error = %err, "repository read failed");
            return Err(err.into());
        }
        Err(_) => {
            warn!(
                session_id = %req.session_id,
                timeout_ms = budget.as_millis() as u64,
                "repository reads timed out"
            );
            return Err(EvaluateError::Timeout(budget));
        }
    };

    let evaluation = evaluate(&ctx, req, input.now, &input.config.engine);
    info!(
        session_id = %req.session_id,
        method = req.method.as_str(),
        code = evaluation.code(),
        allowed = evaluation.is_allowed(),
        stage = evaluation.stage().as_str(),
        "eligibility decided"
    );

    Ok(CheckOutput {
        result: evaluation.to_result(),
        evaluation,
    })
}

pub fn decision_exit_code(result: &EligibilityResult) -> i32 {
    if result.allowed { 0 } else { 2 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use attendguard_domain::model::{
        AccessOverride, AttendanceRecord, AttendanceScope, Geofence, OverrideScope,
        PersonUserLink, Session, SessionAssignments,
    };
    use attendguard_domain::policy::{Group, Policy, PolicyScope, PolicySource};
    use attendguard_domain::Stage;
    use attendguard_repo::{InMemoryRepository, RepoError, Snapshot};
    use attendguard_types::{CheckinMethod, PolicyMode, ids};
    use std::collections::BTreeSet;
    use std::time::Duration;
    use time::macros::datetime;

    const SNAPSHOT: &str = r#"{
        "sessions": [{
            "id": "s-1",
            "organization_id": "org-1",
            "starts_at": "2026-03-02T09:00:00Z",
            "ends_at": "2026-03-02T10:00:00Z",
            "public_code": "ABC123",
            "location": {"id": "loc-1", "latitude": 40.7128, "longitude": -74.006}
        }],
        "geofences": [{"location_id": "loc-1", "radius_m": 150.0}],
        "policies": [{"scope": "session", "scope_id": "s-1", "mode": "public_with_code"}],
        "attendance": [{"session_id": "s-1", "person_id": "p-2", "checked_in_at": "2026-03-02T09:01:00Z"}]
    }"#;

    fn repo() -> InMemoryRepository {
        InMemoryRepository::new(Snapshot::from_json(SNAPSHOT).expect("snapshot"))
    }

    fn geo_request(person_id: &str, latitude: f64) -> EligibilityRequest {
        let mut req = EligibilityRequest::new("org-1", "s-1", CheckinMethod::Geo);
        req.person_id = Some(person_id.to_string());
        req.latitude = Some(latitude);
        req.longitude = Some(-74.006);
        req
    }

    async fn check(repo: &dyn CheckinRepository, req: &EligibilityRequest) -> CheckOutput {
        let config = ResolvedConfig::default();
        run_check(
            repo,
            CheckInput {
                request: req,
                now: datetime!(2026-03-02 09:10 UTC),
                config: &config,
            },
        )
        .await
        .expect("check")
    }

    #[tokio::test]
    async fn nearby_geo_checkin_is_allowed() {
        let out = check(&repo(), &geo_request("p-1", 40.7129)).await;

        assert!(out.result.allowed);
        assert_eq!(out.result.code, ids::CODE_ELIGIBLE);
        assert_eq!(out.result.person_id.as_deref(), Some("p-1"));
        assert_eq!(out.result.geofence_radius, Some(150));
        assert_eq!(decision_exit_code(&out.result), 0);

        let policy = out.evaluation.policy.expect("policy");
        assert_eq!(policy.source, PolicySource::Session);
        assert_eq!(policy.policy.mode, PolicyMode::PublicWithCode);
    }

    #[tokio::test]
    async fn distant_geo_checkin_reports_distance() {
        // ~0.01 degrees of latitude is roughly 1.1 km.
        let out = check(&repo(), &geo_request("p-1", 40.7228)).await;

        assert!(!out.result.allowed);
        assert_eq!(out.result.code, ids::CODE_OUT_OF_RANGE);
        assert_eq!(out.result.geofence_radius, Some(150));
        let distance = out.result.distance_meters.expect("distance");
        assert!((1_100..1_120).contains(&distance), "{distance}");
        assert_eq!(decision_exit_code(&out.result), 2);
    }

    #[tokio::test]
    async fn repeated_checkin_is_denied() {
        let out = check(&repo(), &geo_request("p-2", 40.7128)).await;
        assert_eq!(out.result.code, ids::CODE_ALREADY_CHECKED_IN);
        assert_eq!(out.evaluation.stage(), Stage::DuplicateGate);
    }

    /// Answers nothing in time, or fails every read.
    enum Broken {
        Slow,
        Failing,
    }

    impl Broken {
        async fn stall<T: Send>(&self, lookup: &'static str) -> Result<T, RepoError> {
            match self {
                Broken::Slow => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Err(RepoError::read(lookup, "too late"))
                }
                Broken::Failing => Err(RepoError::read(lookup, "connection refused")),
            }
        }
    }

    #[async_trait]
    impl CheckinRepository for Broken {
        async fn session(&self, _: &str, _: &str) -> Result<Option<Session>, RepoError> {
            self.stall("session").await
        }
        async fn geofence(&self, _: &str) -> Result<Option<Geofence>, RepoError> {
            self.stall("geofence").await
        }
        async fn policy(&self, _: PolicyScope, _: &str) -> Result<Option<Policy>, RepoError> {
            self.stall("policy").await
        }
        async fn group(&self, _: &str) -> Result<Option<Group>, RepoError> {
            self.stall("group").await
        }
        async fn attendance_scopes(&self, _: &str) -> Result<Vec<AttendanceScope>, RepoError> {
            self.stall("attendance_scopes").await
        }
        async fn session_assignments(&self, _: &str) -> Result<SessionAssignments, RepoError> {
            self.stall("session_assignments").await
        }
        async fn group_memberships(
            &self,
            _: &str,
            _: &BTreeSet<String>,
        ) -> Result<BTreeSet<String>, RepoError> {
            self.stall("group_memberships").await
        }
        async fn cohort_memberships(
            &self,
            _: &str,
            _: &BTreeSet<String>,
        ) -> Result<BTreeSet<String>, RepoError> {
            self.stall("cohort_memberships").await
        }
        async fn identity_link(&self, _: &str, _: &str) -> Result<Option<PersonUserLink>, RepoError> {
            self.stall("identity_link").await
        }
        async fn overrides(
            &self,
            _: &str,
            _: &[OverrideScope],
        ) -> Result<Vec<AccessOverride>, RepoError> {
            self.stall("overrides").await
        }
        async fn attendance_record(
            &self,
            _: &str,
            _: &str,
        ) -> Result<Option<AttendanceRecord>, RepoError> {
            self.stall("attendance_record").await
        }
    }

    #[tokio::test]
    async fn slow_repository_times_out() {
        let config = ResolvedConfig {
            read_timeout: Duration::from_millis(20),
            ..ResolvedConfig::default()
        };
        let req = geo_request("p-1", 40.7128);
        let err = run_check(
            &Broken::Slow,
            CheckInput {
                request: &req,
                now: datetime!(2026-03-02 09:10 UTC),
                config: &config,
            },
        )
        .await
        .expect_err("should time out");

        assert_eq!(err, EvaluateError::Timeout(Duration::from_millis(20)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn failing_repository_is_an_error_not_a_denial() {
        let config = ResolvedConfig::default();
        let req = geo_request("p-1", 40.7128);
        let err = run_check(
            &Broken::Failing,
            CheckInput {
                request: &req,
                now: datetime!(2026-03-02 09:10 UTC),
                config: &config,
            },
        )
        .await
        .expect_err("should fail");

        assert_eq!(
            err,
            EvaluateError::Repository(RepoError::read("session", "connection refused"))
        );
    }
}
