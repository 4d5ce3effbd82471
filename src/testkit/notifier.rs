//! Recording notifier for notification assertions.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::port::outbound::notifier::{Event, NewListingsEvent, Notifier};

/// Thread-safe event collector. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Only the new-listings events, in arrival order.
    pub fn new_listings(&self) -> Vec<NewListingsEvent> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::NewListings(e) => Some(e.clone()),
                Event::ScanCompleted(_) => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: Event) {
        self.events.lock().push(event);
    }
}
