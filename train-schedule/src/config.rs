//! Engine configuration.

use crate::query::DayMatch;

/// Environment variable overriding [`EngineConfig::max_stop_index`].
pub const MAX_STOPS_VAR: &str = "SCHEDULE_MAX_STOPS";

/// Environment variable overriding [`EngineConfig::day_match`].
pub const DAY_MATCH_VAR: &str = "SCHEDULE_DAY_MATCH";

/// Error reading configuration overrides.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: &'static str,
}

/// Configuration parameters for decoding and querying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Highest stop index scanned in a wide record.
    /// Must exceed the longest real service.
    pub max_stop_index: usize,

    /// How a multi-day running-days selection combines when the caller
    /// does not pick a mode.
    pub day_match: DayMatch,
}

impl EngineConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_stop_index: usize, day_match: DayMatch) -> Self {
        Self {
            max_stop_index,
            day_match,
        }
    }

    /// Defaults, overridden from `SCHEDULE_MAX_STOPS` and `SCHEDULE_DAY_MATCH`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults, overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(MAX_STOPS_VAR) {
            config.max_stop_index = match value.trim().parse::<usize>() {
                Ok(0) => return Err(invalid(MAX_STOPS_VAR, value, "must be at least 1")),
                Ok(n) => n,
                Err(_) => return Err(invalid(MAX_STOPS_VAR, value, "expected an integer")),
            };
        }

        if let Some(value) = lookup(DAY_MATCH_VAR) {
            config.day_match = value
                .parse()
                .map_err(|_| invalid(DAY_MATCH_VAR, value, "expected \"any\" or \"all\""))?;
        }

        Ok(config)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_stop_index: 1000,
            day_match: DayMatch::Any,
        }
    }
}

fn invalid(var: &'static str, value: String, reason: &'static str) -> ConfigError {
    ConfigError { var, value, reason }
}
