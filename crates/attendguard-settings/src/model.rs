use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `attendguard.toml` schema v1.
///
/// Every key is optional; omitted keys take the engine defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AttendguardConfigV1 {
    /// Optional schema string for tooling (`attendguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub geofence: GeofenceConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct WindowConfig {
    /// Minutes before the session start at which check-in opens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_open_minutes: Option<u32>,

    /// Minutes after the session end at which check-in closes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_close_minutes: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GeofenceConfig {
    /// Radius applied to locations without a geofence row. Must be positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_radius_m: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Upper bound for all repository reads of one evaluation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_timeout_ms: Option<u64>,
}
