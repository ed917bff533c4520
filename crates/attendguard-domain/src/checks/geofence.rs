//! Proximity check against the session location's geofence.

use crate::config::EngineConfig;
use crate::geo::distance_meters;
use crate::model::{Geofence, Session};
use crate::policy::Policy;
use crate::Denial;
use attendguard_types::Coordinates;

/// Distance measured during a geofence check, kept for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeofenceReading {
    pub distance_meters: f64,
    pub radius_meters: f64,
}

impl GeofenceReading {
    pub fn rounded_distance(&self) -> i64 {
        self.distance_meters.round() as i64
    }

    pub fn rounded_radius(&self) -> i64 {
        self.radius_meters.round() as i64
    }

    pub fn within(&self) -> bool {
        self.distance_meters <= self.radius_meters
    }
}

/// Returns `Ok(None)` when the policy does not require a geofence.
///
/// `geofence` is only honored when it belongs to the session's location.
pub fn check(
    session: &Session,
    geofence: Option<&Geofence>,
    policy: &Policy,
    caller: Option<Coordinates>,
    cfg: &EngineConfig,
) -> Result<Option<GeofenceReading>, Denial> {
    if !policy.require_geofence {
        return Ok(None);
    }

    let Some(caller) = caller else {
        return Err(Denial::LocationRequired);
    };

    let Some((location, site)) = session
        .location
        .as_ref()
        .and_then(|loc| loc.coordinates().map(|c| (loc, c)))
    else {
        return Err(Denial::LocationNotConfigured);
    };

    let radius_meters = geofence
        .filter(|g| g.location_id == location.id)
        .map(|g| g.effective_radius(cfg.default_geofence_radius_m))
        .unwrap_or(cfg.default_geofence_radius_m);

    let reading = GeofenceReading {
        distance_meters: distance_meters(caller, site),
        radius_meters,
    };

    if reading.within() {
        Ok(Some(reading))
    } else {
        Err(Denial::OutOfRange {
            distance_meters: reading.rounded_distance(),
            radius_meters: reading.rounded_radius(),
        })
    }
}
