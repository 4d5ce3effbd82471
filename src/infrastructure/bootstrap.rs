//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::adapter::outbound::api::client::HttpListingApi;
use crate::adapter::outbound::notifier::log::LogNotifier;
#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::notifier::{TelegramConfig, TelegramNotifier};
use crate::adapter::outbound::permission::ConfiguredPermission;
use crate::application::orchestrator::service::Orchestrator;
use crate::application::state::Store;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::api::ListingApi;
use crate::port::outbound::notifier::NotifierRegistry;
use crate::port::outbound::permission::PermissionGate;

/// Build the REST client from `[api]`.
#[must_use]
pub fn build_api(config: &Config) -> Arc<dyn ListingApi> {
    Arc::new(HttpListingApi::from_config(&config.api))
}

/// Build the permission gate from `[notifications]`.
#[must_use]
pub fn build_permission(config: &Config) -> Arc<dyn PermissionGate> {
    Arc::new(ConfiguredPermission::from_config(&config.notifications))
}

/// How long [`Deliveries::flush`] waits for queued notifications.
pub const DELIVERY_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// Background delivery tasks owned by registered notifiers.
#[derive(Default)]
pub struct Deliveries {
    tasks: Vec<JoinHandle<()>>,
}

impl Deliveries {
    fn push(&mut self, task: JoinHandle<()>) {
        self.tasks.push(task);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait for queued notifications to go out.
    ///
    /// Tasks only finish once their notifier is dropped, so drop the
    /// registry's last owner first. Gives up after `timeout`.
    pub async fn flush(self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        for task in self.tasks {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match tokio::time::timeout(remaining, task).await {
                Ok(_) => debug!("Notification delivery finished"),
                Err(_) => {
                    warn!("Gave up waiting for queued notifications");
                    return;
                }
            }
        }
    }
}

/// Build notifier registry from configuration.
///
/// Must be called from within a Tokio runtime when Telegram is enabled.
#[cfg(feature = "telegram")]
#[must_use]
pub fn build_notifier_registry(config: &Config) -> (NotifierRegistry, Deliveries) {
    let mut registry = NotifierRegistry::new();
    let mut deliveries = Deliveries::default();
    registry.register(Box::new(LogNotifier));

    if config.telegram.enabled {
        if let Some(tg_config) = TelegramConfig::from_env() {
            let tg_config = tg_config.with_notify_scans(config.telegram.notify_scans);
            let (notifier, delivery) = TelegramNotifier::spawn(tg_config);
            registry.register(Box::new(notifier));
            deliveries.push(delivery);
            info!("Telegram notifier enabled");
        } else {
            warn!("Telegram enabled but TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID not set");
        }
    }

    (registry, deliveries)
}

/// Build notifier registry from configuration (non-telegram variant).
#[cfg(not(feature = "telegram"))]
#[must_use]
pub fn build_notifier_registry(config: &Config) -> (NotifierRegistry, Deliveries) {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));
    if config.telegram.enabled {
        warn!("Telegram enabled in config but the telegram feature is not compiled in");
    }
    (registry, Deliveries::default())
}

/// Wire an orchestrator around `store` with every adapter from `config`.
///
/// Flush the returned [`Deliveries`] after the orchestrator and its scanners
/// are gone so queued alerts are not lost on exit.
#[must_use]
pub fn build_orchestrator(config: &Config, store: Store) -> (Orchestrator, Deliveries) {
    let (notifiers, deliveries) = build_notifier_registry(config);
    let orchestrator = Orchestrator::new(
        build_api(config),
        store,
        notifiers,
        build_permission(config),
        config.orchestrator(),
    );
    (orchestrator, deliveries)
}
