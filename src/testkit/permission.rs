//! Permission gate with a test-controlled answer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::port::outbound::permission::{Permission, PermissionGate};

/// Gate whose permission the test sets directly.
///
/// `request()` resolves a `Default` permission to `on_request` and counts
/// how often it was asked.
#[derive(Clone)]
pub struct FixedPermission {
    current: Arc<Mutex<Permission>>,
    on_request: Permission,
    requests: Arc<AtomicUsize>,
}

impl FixedPermission {
    pub fn new(permission: Permission) -> Self {
        Self {
            current: Arc::new(Mutex::new(permission)),
            on_request: permission,
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn granted() -> Self {
        Self::new(Permission::Granted)
    }

    pub fn denied() -> Self {
        Self::new(Permission::Denied)
    }

    /// Undecided gate that resolves to `answer` when asked.
    pub fn undecided(answer: Permission) -> Self {
        Self {
            on_request: answer,
            ..Self::new(Permission::Default)
        }
    }

    pub fn set(&self, permission: Permission) {
        *self.current.lock() = permission;
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionGate for FixedPermission {
    fn permission(&self) -> Permission {
        *self.current.lock()
    }

    async fn request(&self) -> Permission {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let mut current = self.current.lock();
        if *current == Permission::Default {
            *current = self.on_request;
        }
        *current
    }
}
