//! Notification permission backed by configuration.
//!
//! A terminal has no permission prompt; the configured answer stands in for
//! the user's choice.

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::info;

use crate::infrastructure::config::notification::NotificationConfig;
use crate::port::outbound::permission::{Permission, PermissionGate};

/// [`PermissionGate`] that starts from a configured value and answers a
/// request with a configured decision.
pub struct ConfiguredPermission {
    current: RwLock<Permission>,
    grant_on_request: bool,
}

impl ConfiguredPermission {
    #[must_use]
    pub fn new(initial: Permission, grant_on_request: bool) -> Self {
        Self {
            current: RwLock::new(initial),
            grant_on_request,
        }
    }

    #[must_use]
    pub fn from_config(config: &NotificationConfig) -> Self {
        Self::new(config.permission, config.grant_on_request)
    }
}

#[async_trait]
impl PermissionGate for ConfiguredPermission {
    fn permission(&self) -> Permission {
        *self.current.read()
    }

    async fn request(&self) -> Permission {
        let mut current = self.current.write();
        if *current == Permission::Default {
            *current = if self.grant_on_request {
                Permission::Granted
            } else {
                Permission::Denied
            };
            info!(permission = %*current, "Notification permission decided");
        }
        *current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn request_decides_once() {
        let gate = ConfiguredPermission::new(Permission::Default, true);
        assert_eq!(gate.permission(), Permission::Default);

        assert_eq!(gate.request().await, Permission::Granted);
        assert_eq!(gate.permission(), Permission::Granted);
    }

    #[tokio::test]
    async fn request_can_deny() {
        let gate = ConfiguredPermission::new(Permission::Default, false);
        assert_eq!(gate.request().await, Permission::Denied);
    }

    #[tokio::test]
    async fn decided_permission_is_sticky() {
        let gate = ConfiguredPermission::new(Permission::Denied, true);
        assert_eq!(gate.request().await, Permission::Denied);
        assert_eq!(gate.permission(), Permission::Denied);
    }
}
