//! Single owner of the dashboard state.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, trace};

use super::{reduce, Action, AppState};

/// Owns the [`AppState`] and publishes every change to subscribers.
///
/// [`Store::dispatch`] is the only way to update state. Clones share the
/// same underlying state.
#[derive(Clone)]
pub struct Store {
    sender: Arc<watch::Sender<AppState>>,
}

impl Store {
    /// Create a store holding `initial`.
    #[must_use]
    pub fn new(initial: AppState) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Reduce `action` into the current state.
    ///
    /// Subscribers are woken only when the state actually changed.
    pub fn dispatch(&self, action: Action) {
        let kind = action.kind();
        let changed = self.sender.send_if_modified(|state| {
            let next = reduce(state, action);
            if next == *state {
                return false;
            }
            *state = next;
            true
        });

        if changed {
            debug!(action = kind, "State updated");
        } else {
            trace!(action = kind, "Action left state unchanged");
        }
    }

    /// Clone the current state.
    #[must_use]
    pub fn snapshot(&self) -> AppState {
        self.sender.borrow().clone()
    }

    /// Read the current state without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.sender.borrow())
    }

    /// Receiver that observes every published state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.sender.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::listings;

    #[test]
    fn dispatch_applies_reducer() {
        let store = Store::default();
        store.dispatch(Action::SetListings(listings(5)));
        store.dispatch(Action::SetListings(listings(8)));

        let state = store.snapshot();
        assert_eq!(state.listings.len(), 8);
        assert_eq!(state.previous_listings_count, 5);
    }

    #[test]
    fn clones_share_state() {
        let store = Store::default();
        let other = store.clone();

        other.dispatch(Action::ToggleStatistics);
        assert!(!store.snapshot().show_statistics);
    }

    #[tokio::test]
    async fn subscribers_wake_only_on_change() {
        let store = Store::default();
        let mut rx = store.subscribe();

        store.dispatch(Action::SetDays(0));
        assert!(!rx.has_changed().unwrap());

        store.dispatch(Action::SetDays(7));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().days, 7);
    }

    #[test]
    fn with_state_reads_without_clone() {
        let store = Store::default();
        let days = store.with_state(|state| state.days);
        assert_eq!(days, 30);
    }
}
