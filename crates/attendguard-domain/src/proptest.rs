//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Great-circle distance (identity, symmetry, monotonicity)
//! - Short-circuit ordering of the session-only gates
//! - Duplicate suppression and geofence boundaries

use crate::config::EngineConfig;
use crate::engine::evaluate;
use crate::geo::distance_meters;
use crate::model::SessionStatus;
use crate::report::Stage;
use crate::test_support::{
    PERSON, at_start, attendance, offset_north, open_context, policy, request, site,
    with_position,
};
use crate::Denial;
use attendguard_types::{CheckinMethod, Coordinates, PolicyMode};
use proptest::prelude::*;
use time::Duration;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_coordinates() -> impl Strategy<Value = Coordinates> {
    (-89.0f64..89.0, -179.0f64..179.0).prop_map(|(lat, lng)| Coordinates::new(lat, lng))
}

fn arb_method() -> impl Strategy<Value = CheckinMethod> {
    prop_oneof![
        Just(CheckinMethod::Qr),
        Just(CheckinMethod::Geo),
        Just(CheckinMethod::EventCode),
        Just(CheckinMethod::Kiosk),
        Just(CheckinMethod::Manual),
    ]
}

fn arb_mode() -> impl Strategy<Value = PolicyMode> {
    prop_oneof![
        Just(PolicyMode::Disabled),
        Just(PolicyMode::PublicWithCode),
        Just(PolicyMode::Authenticated),
    ]
}

/// Minutes relative to session start, well beyond both ends of the window.
fn arb_offset_minutes() -> impl Strategy<Value = i64> {
    -600i64..600
}

// ============================================================================
// Distance
// ============================================================================

proptest! {
    #[test]
    fn distance_to_self_is_zero(p in arb_coordinates()) {
        prop_assert_eq!(distance_meters(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric(a in arb_coordinates(), b in arb_coordinates()) {
        let ab = distance_meters(a, b);
        let ba = distance_meters(b, a);
        prop_assert!((ab - ba).abs() < 1e-6, "ab={} ba={}", ab, ba);
    }

    #[test]
    fn distance_is_non_negative(a in arb_coordinates(), b in arb_coordinates()) {
        prop_assert!(distance_meters(a, b) >= 0.0);
    }

    #[test]
    fn distance_grows_with_separation(
        origin in (-60.0f64..60.0, -179.0f64..179.0),
        near in 0.0f64..50_000.0,
        extra in 1.0f64..50_000.0,
    ) {
        let origin = Coordinates::new(origin.0, origin.1);
        let d_near = distance_meters(origin, offset_north(origin, near));
        let d_far = distance_meters(origin, offset_north(origin, near + extra));
        prop_assert!(d_far > d_near, "near={} far={}", d_near, d_far);
    }
}

// ============================================================================
// Pipeline ordering
// ============================================================================

proptest! {
    #[test]
    fn cancelled_sessions_always_deny_with_cancellation(
        method in arb_method(),
        mode in arb_mode(),
        offset in -14i64..89,
    ) {
        let mut ctx = open_context();
        ctx.policies.session = Some(policy(mode, true, true));
        if let Some(s) = ctx.session.as_mut() {
            s.status = SessionStatus::Cancelled;
        }

        let eval = evaluate(
            &ctx,
            &request(method),
            at_start() + Duration::minutes(offset),
            &EngineConfig::default(),
        );
        prop_assert_eq!(eval.denial(), Some(&Denial::SessionCancelled));
    }

    #[test]
    fn disabled_method_denies_before_any_other_gate(
        method in arb_method(),
        cancelled in any::<bool>(),
        offset in arb_offset_minutes(),
    ) {
        let mut ctx = open_context();
        ctx.policies = Default::default();
        if let Some(s) = ctx.session.as_mut() {
            s.allowed_methods.set(method, false);
            if cancelled {
                s.status = SessionStatus::Cancelled;
            }
        }

        let eval = evaluate(
            &ctx,
            &request(method),
            at_start() + Duration::minutes(offset),
            &EngineConfig::default(),
        );
        prop_assert_eq!(eval.stage(), Stage::MethodGate);
        prop_assert!(eval.policy.is_none());
    }

    #[test]
    fn time_window_decision_matches_bounds(offset in arb_offset_minutes()) {
        let ctx = open_context();
        let eval = evaluate(
            &ctx,
            &request(CheckinMethod::Kiosk),
            at_start() + Duration::minutes(offset),
            &EngineConfig::default(),
        );

        // One-hour session: open from -15 to +90 minutes, inclusive.
        if offset < -15 {
            let is_not_yet_open = matches!(eval.denial(), Some(Denial::NotYetOpen { .. }));
            prop_assert!(is_not_yet_open);
        } else if offset > 90 {
            let is_window_closed = matches!(eval.denial(), Some(Denial::WindowClosed { .. }));
            prop_assert!(is_window_closed);
        } else {
            prop_assert!(eval.is_allowed());
        }
    }

    #[test]
    fn existing_attendance_always_denies(method in arb_method()) {
        let mut ctx = open_context();
        ctx.existing_attendance = Some(attendance(PERSON));

        let eval = evaluate(&ctx, &request(method), at_start(), &EngineConfig::default());
        prop_assert_eq!(eval.denial(), Some(&Denial::AlreadyCheckedIn));
    }

    #[test]
    fn geofence_decision_matches_radius(meters in 0.0f64..300.0) {
        prop_assume!((meters - 100.0).abs() > 0.01);

        let mut ctx = open_context();
        ctx.policies.session = Some(policy(PolicyMode::PublicWithCode, true, false));
        let req = with_position(request(CheckinMethod::Geo), offset_north(site(), meters));

        let eval = evaluate(&ctx, &req, at_start(), &EngineConfig::default());
        if meters < 100.0 {
            prop_assert!(eval.is_allowed());
        } else {
            let is_out_of_range = matches!(
                eval.denial(),
                Some(Denial::OutOfRange { radius_meters: 100, .. })
            );
            prop_assert!(is_out_of_range);
        }
    }
}
