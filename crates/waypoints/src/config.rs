use std::str::FromStr;
use std::time::Duration;

/// How long a mode-change notification stays visible.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);
/// Decimal places in the coordinate listing.
pub const DEFAULT_LISTING_PRECISION: usize = 5;
const MAX_LISTING_PRECISION: usize = 12;

pub const ENV_NOTIFICATION_MS: &str = "WAYPOINT_NOTIFICATION_MS";
pub const ENV_RIGHT_CLICK: &str = "WAYPOINT_RIGHT_CLICK";
pub const ENV_DELETE_REQUIRES_DRAGGING: &str = "WAYPOINT_DELETE_REQUIRES_DRAGGING";
pub const ENV_LISTING_PRECISION: &str = "WAYPOINT_LISTING_PRECISION";

/// What a right-click on a marker does to its delete affordance.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum RightClickPolicy {
    /// Open it, or close it if it is already open for that marker.
    #[default]
    Toggle,
    /// Always open it for that marker.
    ForceOpen,
}

impl FromStr for RightClickPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "toggle" => Ok(RightClickPolicy::Toggle),
            "force-open" | "force_open" | "open" => Ok(RightClickPolicy::ForceOpen),
            _ => Err(ConfigError::invalid(
                ENV_RIGHT_CLICK,
                s,
                "`toggle` or `force-open`",
            )),
        }
    }
}

impl std::fmt::Display for RightClickPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RightClickPolicy::Toggle => f.write_str("toggle"),
            RightClickPolicy::ForceOpen => f.write_str("force-open"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, expected: &'static str) -> Self {
        ConfigError::Invalid {
            key,
            value: value.to_string(),
            expected,
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid {
                key,
                value,
                expected,
            } => write!(f, "invalid {key}={value:?}: expected {expected}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub notification_ttl: Duration,
    pub right_click: RightClickPolicy,
    /// Only offer the delete affordance while in dragging mode.
    pub delete_requires_dragging: bool,
    pub listing_precision: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            right_click: RightClickPolicy::default(),
            delete_requires_dragging: false,
            listing_precision: DEFAULT_LISTING_PRECISION,
        }
    }
}

impl EditorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `WAYPOINT_*` variables. Unset keys keep their
    /// defaults; set but unparsable keys are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_NOTIFICATION_MS) {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                ConfigError::invalid(ENV_NOTIFICATION_MS, &raw, "a duration in milliseconds")
            })?;
            config.notification_ttl = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup(ENV_RIGHT_CLICK) {
            config.right_click = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_DELETE_REQUIRES_DRAGGING) {
            config.delete_requires_dragging = parse_bool(&raw)
                .ok_or_else(|| ConfigError::invalid(ENV_DELETE_REQUIRES_DRAGGING, &raw, "a boolean"))?;
        }
        if let Some(raw) = lookup(ENV_LISTING_PRECISION) {
            config.listing_precision = raw
                .trim()
                .parse()
                .ok()
                .filter(|p| *p <= MAX_LISTING_PRECISION)
                .ok_or_else(|| {
                    ConfigError::invalid(ENV_LISTING_PRECISION, &raw, "an integer from 0 to 12")
                })?;
        }

        Ok(config)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_environment_gives_defaults() {
        let config = EditorConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.notification_ttl, Duration::from_secs(3));
        assert_eq!(config.listing_precision, 5);
    }

    #[test]
    fn reads_every_key() {
        let config = EditorConfig::from_lookup(lookup_from(&[
            (ENV_NOTIFICATION_MS, "1500"),
            (ENV_RIGHT_CLICK, "force-open"),
            (ENV_DELETE_REQUIRES_DRAGGING, "yes"),
            (ENV_LISTING_PRECISION, "3"),
        ]))
        .unwrap();

        assert_eq!(
            config,
            EditorConfig {
                notification_ttl: Duration::from_millis(1500),
                right_click: RightClickPolicy::ForceOpen,
                delete_requires_dragging: true,
                listing_precision: 3,
            }
        );
    }

    #[test]
    fn invalid_values_name_the_key() {
        let err = EditorConfig::from_lookup(lookup_from(&[(ENV_NOTIFICATION_MS, "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_NOTIFICATION_MS));

        let err = EditorConfig::from_lookup(lookup_from(&[(ENV_LISTING_PRECISION, "40")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == ENV_LISTING_PRECISION));

        assert!(EditorConfig::from_lookup(lookup_from(&[(ENV_RIGHT_CLICK, "maybe")])).is_err());
    }

    #[test]
    fn right_click_policy_parses_and_displays() {
        assert_eq!("Toggle".parse::<RightClickPolicy>(), Ok(RightClickPolicy::Toggle));
        assert_eq!("force_open".parse::<RightClickPolicy>(), Ok(RightClickPolicy::ForceOpen));
        assert_eq!(RightClickPolicy::ForceOpen.to_string(), "force-open");
    }
}
