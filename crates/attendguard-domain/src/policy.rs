//! Self check-in policy and the session → group → legacy → org → default cascade.

use attendguard_types::{PolicyMode, PolicySnapshot};
use serde::{Deserialize, Serialize};

/// Who counts as eligible when a session belongs to a group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibleSet {
    /// Only members of the session's group (or people with an `allow` override).
    #[default]
    AllMembers,
    /// No group-membership requirement. Scopes and assignments still apply.
    Anyone,
}

fn yes() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub mode: PolicyMode,
    #[serde(default)]
    pub eligible_set: EligibleSet,
    #[serde(default)]
    pub require_linked_user: bool,
    #[serde(default = "yes")]
    pub require_geofence: bool,
    #[serde(default = "yes")]
    pub require_event_code: bool,
}

impl Policy {
    /// Used when no scope supplies a policy: disabled, with geofence and event code required.
    pub fn builtin_default() -> Self {
        Self {
            mode: PolicyMode::Disabled,
            eligible_set: EligibleSet::AllMembers,
            require_linked_user: false,
            require_geofence: true,
            require_event_code: true,
        }
    }

    pub fn with_mode(mode: PolicyMode) -> Self {
        Self {
            mode,
            ..Self::builtin_default()
        }
    }

    pub fn snapshot(&self) -> PolicySnapshot {
        PolicySnapshot {
            mode: self.mode,
            require_geofence: self.require_geofence,
            require_event_code: self.require_event_code,
            require_linked_user: self.require_linked_user,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyScope {
    Session,
    Group,
    Org,
}

/// A stored policy row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub scope: PolicyScope,
    pub scope_id: String,
    #[serde(flatten)]
    pub policy: Policy,
}

/// Group row carrying the pre-policy-table self check-in flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub organization_id: String,
    #[serde(default)]
    pub self_checkin_enabled: Option<bool>,
    #[serde(default)]
    pub self_checkin_mode: Option<PolicyMode>,
}

impl Group {
    /// Policy implied by the legacy flags. `None` when the enabled flag was never set.
    ///
    /// Disabled groups resolve to a disabled policy. Enabled groups use the stored mode,
    /// defaulting to `public_with_code`.
    pub fn legacy_policy(&self) -> Option<Policy> {
        let enabled = self.self_checkin_enabled?;
        let mode = if enabled {
            self.self_checkin_mode.unwrap_or(PolicyMode::PublicWithCode)
        } else {
            PolicyMode::Disabled
        };
        Some(Policy {
            require_linked_user: mode == PolicyMode::Authenticated,
            ..Policy::with_mode(mode)
        })
    }
}

/// Where the effective policy came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicySource {
    Session,
    Group,
    GroupLegacy,
    Org,
    Default,
}

impl PolicySource {
    /// Cascade order, highest precedence first. `Default` is the terminal fallback.
    pub const CASCADE: [PolicySource; 4] = [
        PolicySource::Session,
        PolicySource::Group,
        PolicySource::GroupLegacy,
        PolicySource::Org,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PolicySource::Session => "session",
            PolicySource::Group => "group",
            PolicySource::GroupLegacy => "group_legacy",
            PolicySource::Org => "org",
            PolicySource::Default => "default",
        }
    }
}

/// Candidate policies for one session, one slot per cascade level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicySources {
    pub session: Option<Policy>,
    pub group: Option<Policy>,
    pub group_legacy: Option<Policy>,
    pub org: Option<Policy>,
}

impl PolicySources {
    pub fn get(&self, source: PolicySource) -> Option<&Policy> {
        match source {
            PolicySource::Session => self.session.as_ref(),
            PolicySource::Group => self.group.as_ref(),
            PolicySource::GroupLegacy => self.group_legacy.as_ref(),
            PolicySource::Org => self.org.as_ref(),
            PolicySource::Default => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectivePolicy {
    pub policy: Policy,
    pub source: PolicySource,
}

/// Resolve exactly one effective policy. Never fails.
pub fn resolve_policy(sources: &PolicySources) -> EffectivePolicy {
    PolicySource::CASCADE
        .iter()
        .find_map(|&source| {
            sources.get(source).map(|policy| EffectivePolicy {
                policy: policy.clone(),
                source,
            })
        })
        .unwrap_or_else(|| EffectivePolicy {
            policy: Policy::builtin_default(),
            source: PolicySource::Default,
        })
}
