use std::sync::Arc;
use std::time::Duration;

use stockscanner::application::orchestrator::service::{
    Orchestrator, OrchestratorConfig, OrchestratorHandle,
};
use stockscanner::application::state::{Action, AppState, Store};
use stockscanner::domain::ListingQuery;
use stockscanner::port::outbound::notifier::NotifierRegistry;
use stockscanner::testkit::api::{Reply, ScriptedApi};
use stockscanner::testkit::domain::{exchanges, listings, statistics};
use stockscanner::testkit::notifier::RecordingNotifier;
use stockscanner::testkit::permission::FixedPermission;

/// Poll period used by [`Harness::start`].
pub const POLL: Duration = Duration::from_millis(300_000);

/// A running orchestrator plus every test double it talks to.
pub struct Harness {
    pub api: Arc<ScriptedApi>,
    pub recorder: RecordingNotifier,
    pub permission: FixedPermission,
    pub handle: OrchestratorHandle,
}

/// API answering 3 exchanges, 5 listings and statistics for every call.
pub fn healthy_api() -> Arc<ScriptedApi> {
    let api = Arc::new(ScriptedApi::new());
    api.set_exchanges(Reply::Ok(exchanges()))
        .set_listings(Reply::Ok(listings(5)))
        .set_statistics(Reply::Ok(statistics(5)));
    api
}

impl Harness {
    /// Mount an orchestrator over the default state.
    pub fn start(api: Arc<ScriptedApi>, permission: FixedPermission) -> Self {
        Self::start_with(api, permission, AppState::default())
    }

    pub fn start_with(api: Arc<ScriptedApi>, permission: FixedPermission, state: AppState) -> Self {
        let recorder = RecordingNotifier::new();
        let mut notifiers = NotifierRegistry::new();
        notifiers.register(Box::new(recorder.clone()));

        let orchestrator = Orchestrator::new(
            api.clone(),
            Store::new(state),
            notifiers,
            Arc::new(permission.clone()),
            OrchestratorConfig::default(),
        );

        Self {
            api,
            recorder,
            permission,
            handle: orchestrator.start(),
        }
    }

    pub fn store(&self) -> &Store {
        self.handle.store()
    }

    pub fn state(&self) -> AppState {
        self.store().snapshot()
    }

    pub fn dispatch(&self, action: Action) {
        self.store().dispatch(action);
    }

    pub fn listing_calls(&self) -> usize {
        self.api.listing_queries().len()
    }

    pub fn last_query(&self) -> Option<ListingQuery> {
        self.api.listing_queries().pop()
    }

    /// Mount, then reload with a different window so the poll has a
    /// non-zero baseline of 5.
    pub async fn with_baseline(api: Arc<ScriptedApi>, permission: FixedPermission) -> Self {
        let harness = Self::start(api, permission);
        settle().await;
        harness.dispatch(Action::SetDays(7));
        settle().await;
        assert_eq!(harness.state().previous_listings_count, 5);
        harness
    }
}

/// Let every runnable task finish. Under paused time this advances the
/// clock by a few milliseconds only.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}
