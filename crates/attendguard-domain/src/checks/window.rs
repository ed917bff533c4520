//! Time & method gate: the cheapest rejections, evaluated on the session alone.

use crate::config::EngineConfig;
use crate::model::{Session, SessionStatus};
use crate::Denial;
use attendguard_types::CheckinMethod;
use time::OffsetDateTime;

pub fn check_method(session: &Session, method: CheckinMethod) -> Result<(), Denial> {
    if session.allowed_methods.is_allowed(method) {
        Ok(())
    } else {
        Err(Denial::MethodDisabled { method })
    }
}

pub fn check_status(session: &Session) -> Result<(), Denial> {
    match session.status {
        SessionStatus::Cancelled => Err(Denial::SessionCancelled),
        SessionStatus::Scheduled | SessionStatus::Active | SessionStatus::Completed => Ok(()),
    }
}

/// Open from `starts_at - early_open` to `ends_at + late_close`, both bounds inclusive.
///
/// A bound that falls outside the representable date range does not apply: the window is open
/// since the beginning of time, or never closes.
pub fn check_time_window(
    session: &Session,
    now: OffsetDateTime,
    cfg: &EngineConfig,
) -> Result<(), Denial> {
    if let Some(opens_at) = session.starts_at.checked_sub(cfg.early_open) {
        if now < opens_at {
            return Err(Denial::NotYetOpen { opens_at });
        }
    }

    if let Some(closed_at) = session.ends_at.checked_add(cfg.late_close) {
        if now > closed_at {
            return Err(Denial::WindowClosed { closed_at });
        }
    }

    Ok(())
}
