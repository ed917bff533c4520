use crate::model::AttendguardConfigV1;
use anyhow::Context;
use attendguard_domain::EngineConfig;
use std::time::Duration as StdDuration;
use time::Duration;

pub const DEFAULT_READ_TIMEOUT_MS: u64 = 5_000;

/// Command-line overrides. They win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub read_timeout_ms: Option<u64>,
    pub default_radius_m: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub engine: EngineConfig,
    pub read_timeout: StdDuration,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            read_timeout: StdDuration::from_millis(DEFAULT_READ_TIMEOUT_MS),
        }
    }
}

pub fn resolve_config(
    cfg: AttendguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let mut resolved = ResolvedConfig::default();

    if let Some(minutes) = cfg.window.early_open_minutes {
        resolved.engine.early_open = Duration::minutes(i64::from(minutes));
    }
    if let Some(minutes) = cfg.window.late_close_minutes {
        resolved.engine.late_close = Duration::minutes(i64::from(minutes));
    }

    if let Some(radius) = overrides.default_radius_m.or(cfg.geofence.default_radius_m) {
        resolved.engine.default_geofence_radius_m =
            validate_radius(radius).context("invalid geofence.default_radius_m")?;
    }

    if let Some(ms) = overrides.read_timeout_ms.or(cfg.repository.read_timeout_ms) {
        if ms == 0 {
            anyhow::bail!("invalid repository.read_timeout_ms: must be greater than zero");
        }
        resolved.read_timeout = StdDuration::from_millis(ms);
    }

    Ok(resolved)
}

fn validate_radius(radius: f64) -> anyhow::Result<f64> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        anyhow::bail!("radius must be a positive number of meters, got {radius}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;

    #[test]
    fn empty_config_uses_engine_defaults() {
        let resolved = resolve_config(AttendguardConfigV1::default(), Overrides::default())
            .expect("resolve");
        assert_eq!(resolved.engine, EngineConfig::default());
        assert_eq!(resolved.read_timeout, StdDuration::from_millis(5_000));
    }

    #[test]
    fn file_values_are_applied() {
        let cfg = parse_config_toml(
            r#"
schema = "attendguard.config.v1"

[window]
early_open_minutes = 5
late_close_minutes = 60

[geofence]
default_radius_m = 75.0

[repository]
read_timeout_ms = 250
"#,
        )
        .expect("parse");

        let resolved = resolve_config(cfg, Overrides::default()).expect("resolve");
        assert_eq!(resolved.engine.early_open, Duration::minutes(5));
        assert_eq!(resolved.engine.late_close, Duration::minutes(60));
        assert_eq!(resolved.engine.default_geofence_radius_m, 75.0);
        assert_eq!(resolved.read_timeout, StdDuration::from_millis(250));
    }

    #[test]
    fn overrides_win_over_file() {
        let cfg = parse_config_toml("[repository]\nread_timeout_ms = 250\n").expect("parse");
        let overrides = Overrides {
            read_timeout_ms: Some(1_000),
            default_radius_m: Some(40.0),
        };
        let resolved = resolve_config(cfg, overrides).expect("resolve");
        assert_eq!(resolved.read_timeout, StdDuration::from_millis(1_000));
        assert_eq!(resolved.engine.default_geofence_radius_m, 40.0);
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let cfg = parse_config_toml("[geofence]\ndefault_radius_m = 0.0\n").expect("parse");
        let err = resolve_config(cfg, Overrides::default()).expect_err("should fail");
        assert!(format!("{err:#}").contains("default_radius_m"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = parse_config_toml("[repository]\nread_timeout_ms = 0\n").expect("parse");
        assert!(resolve_config(cfg, Overrides::default()).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config_toml("[window]\nearly_open_minuets = 5\n").is_err());
        assert!(parse_config_toml("profile = \"strict\"\n").is_err());
    }
}
