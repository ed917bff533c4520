use time::Duration;

pub const DEFAULT_EARLY_OPEN_MINUTES: u32 = 15;
pub const DEFAULT_LATE_CLOSE_MINUTES: u32 = 30;
pub const DEFAULT_GEOFENCE_RADIUS_M: f64 = 100.0;

/// Engine tunables. Resolved from `attendguard.toml` by the settings crate.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// How long before the session start check-in opens.
    pub early_open: Duration,
    /// How long after the session end check-in stays open.
    pub late_close: Duration,
    /// Radius used when a location has no geofence row. Always positive.
    pub default_geofence_radius_m: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            early_open: Duration::minutes(i64::from(DEFAULT_EARLY_OPEN_MINUTES)),
            late_close: Duration::minutes(i64::from(DEFAULT_LATE_CLOSE_MINUTES)),
            default_geofence_radius_m: DEFAULT_GEOFENCE_RADIUS_M,
        }
    }
}
