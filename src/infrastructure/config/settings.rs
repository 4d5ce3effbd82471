//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the API root can be overridden
//! with `STOCKSCANNER_API_URL`, and Telegram credentials only ever come from
//! the environment.
//!
//! # Example
//!
//! ```no_run
//! use stockscanner::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("stockscanner.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use super::api::{ApiConfig, MAX_PAGE_LIMIT};
use super::logging::LoggingConfig;
use super::notification::NotificationConfig;
use super::poll::{FilterConfig, PollConfig};
use super::telegram::TelegramAppConfig;
use crate::application::orchestrator::service::OrchestratorConfig;
use crate::application::state::AppState;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "STOCKSCANNER_API_URL";

/// Main application configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    /// Filter the dashboard starts with.
    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub poll: PollConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub telegram: TelegramAppConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies environment overrides before validating.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(std::env::var(API_URL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise start from the defaults.
    ///
    /// Environment overrides and validation apply either way.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Replace `api.base_url` with a non-empty override.
    pub fn apply_overrides(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        if let Err(e) = url::Url::parse(&self.api.base_url) {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: e.to_string(),
            }
            .into());
        }
        if !(1..=MAX_PAGE_LIMIT).contains(&self.api.page_limit) {
            return Err(ConfigError::InvalidValue {
                field: "page_limit",
                reason: format!("must be between 1 and {MAX_PAGE_LIMIT}"),
            }
            .into());
        }
        if self.filter.days == 0 {
            return Err(ConfigError::InvalidValue {
                field: "days",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.poll.interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Orchestrator settings derived from `[api]` and `[poll]`.
    #[must_use]
    pub fn orchestrator(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            poll_enabled: self.poll.enabled,
            poll_interval: Duration::from_millis(self.poll.interval_ms),
            page_limit: self.api.page_limit,
        }
    }

    /// Dashboard state before the first fetch.
    #[must_use]
    pub fn initial_state(&self) -> AppState {
        let mut state = AppState::with_days(self.filter.days);
        state.selected_exchange = self.filter.exchange.trim().to_string();
        state
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
