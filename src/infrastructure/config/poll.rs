//! Background poll and initial filter configuration.

use serde::Deserialize;

use crate::domain::DEFAULT_DAYS;

const fn default_true() -> bool {
    true
}

/// Background poll settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Period between polls in milliseconds (default: 5 minutes).
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

const fn default_interval_ms() -> u64 {
    300_000
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: default_interval_ms(),
        }
    }
}

/// Filter applied when the dashboard starts.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_days")]
    pub days: u32,
    /// Exchange code; empty for all exchanges.
    #[serde(default)]
    pub exchange: String,
}

const fn default_days() -> u32 {
    DEFAULT_DAYS
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
            exchange: String::new(),
        }
    }
}
