//! Runtime settings
//!
//! Read once from the environment at startup:
//! - `BMICAL_UNIT_SYSTEM`: unit system used when a request does not name one
//!   (`metric` or `imperial`, default `metric`)
//! - `BMICAL_STRICT_ACTIVITY`: reject unknown activity levels instead of
//!   falling back to Sedentary (`1`, `true`, `yes`)

use serde::Serialize;

use crate::units::UnitSystem;

pub const UNIT_SYSTEM_VAR: &str = "BMICAL_UNIT_SYSTEM";
pub const STRICT_ACTIVITY_VAR: &str = "BMICAL_STRICT_ACTIVITY";

/// Calculator settings shared by the tool surfaces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub default_unit_system: UnitSystem,
    pub strict_activity: bool,
}

impl Settings {
    /// Load settings from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_unit_system = match lookup(UNIT_SYSTEM_VAR) {
            Some(raw) => UnitSystem::from_str(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    "Ignoring {}='{}'; using {}",
                    UNIT_SYSTEM_VAR,
                    raw,
                    UnitSystem::Metric.as_str()
                );
                UnitSystem::Metric
            }),
            None => UnitSystem::Metric,
        };

        let strict_activity = lookup(STRICT_ACTIVITY_VAR)
            .map(|raw| parse_flag(&raw))
            .unwrap_or(false);

        Self {
            default_unit_system,
            strict_activity,
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
