//! Telegram notification configuration.

use serde::Deserialize;

/// Telegram notification configuration.
///
/// Credentials are never read from the file; see `TelegramConfig::from_env`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramAppConfig {
    /// Enable telegram notifications.
    #[serde(default)]
    pub enabled: bool,
    /// Also send a message when a scan finishes.
    #[serde(default)]
    pub notify_scans: bool,
}
