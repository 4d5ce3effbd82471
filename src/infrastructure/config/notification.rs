//! Notification permission configuration.

use serde::Deserialize;

use crate::port::outbound::permission::Permission;

const fn default_true() -> bool {
    true
}

/// Initial notification permission and how a request is answered.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Permission at startup: `default`, `granted` or `denied`.
    #[serde(default)]
    pub permission: Permission,
    /// Answer to a permission request while undecided.
    #[serde(default = "default_true")]
    pub grant_on_request: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            permission: Permission::Default,
            grant_on_request: true,
        }
    }
}
