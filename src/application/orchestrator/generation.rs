//! Request generation counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic ticket counter for one kind of request.
///
/// Every request takes a ticket when it is issued. Its response may only be
/// applied while that ticket is still the latest one issued.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    latest: AtomicU64,
}

impl RequestGeneration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a new ticket, superseding every earlier one.
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Latest ticket without taking a new one.
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Whether no ticket was issued after `ticket`.
    #[must_use]
    pub fn is_current(&self, ticket: u64) -> bool {
        self.peek() == ticket
    }
}
