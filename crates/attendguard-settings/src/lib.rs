//! Config parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{AttendguardConfigV1, GeofenceConfig, RepositoryConfig, WindowConfig};
pub use resolve::{DEFAULT_READ_TIMEOUT_MS, Overrides, ResolvedConfig};

/// Parse `attendguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<AttendguardConfigV1> {
    let cfg: AttendguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the settings used by the engine and loader (defaults + file + overrides).
pub fn resolve_config(
    cfg: AttendguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
