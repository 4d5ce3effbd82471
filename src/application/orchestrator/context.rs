//! Collaborators shared by every orchestrator task.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::application::state::Store;
use crate::port::outbound::api::ListingApi;
use crate::port::outbound::notifier::{Event, NotifierRegistry};
use crate::port::outbound::permission::PermissionGate;

use super::generation::RequestGeneration;

pub(crate) struct Context {
    pub api: Arc<dyn ListingApi>,
    pub store: Store,
    pub notifiers: Arc<NotifierRegistry>,
    pub permission: Arc<dyn PermissionGate>,
    pub page_limit: u32,
    pub exchanges: RequestGeneration,
    pub listings: RequestGeneration,
    pub statistics: RequestGeneration,
    pub scan_in_flight: AtomicBool,
}

impl Context {
    pub fn new(
        api: Arc<dyn ListingApi>,
        store: Store,
        notifiers: Arc<NotifierRegistry>,
        permission: Arc<dyn PermissionGate>,
        page_limit: u32,
    ) -> Self {
        Self {
            api,
            store,
            notifiers,
            permission,
            page_limit,
            exchanges: RequestGeneration::new(),
            listings: RequestGeneration::new(),
            statistics: RequestGeneration::new(),
            scan_in_flight: AtomicBool::new(false),
        }
    }

    /// Emit a platform notification, only when permission is granted.
    pub fn notify(&self, event: Event) -> bool {
        if !self.permission.permission().is_granted() {
            return false;
        }
        self.notifiers.notify_all(event);
        true
    }
}
