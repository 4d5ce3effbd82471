//! Orchestrator lifecycle: mount, react to state changes, unmount.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info};

use crate::application::state::{AppState, Store};
use crate::domain::ListingQuery;
use crate::port::outbound::api::ListingApi;
use crate::port::outbound::notifier::NotifierRegistry;
use crate::port::outbound::permission::{Permission, PermissionGate};

use super::context::Context;
use super::loader;
use super::poll::PollTask;
use super::scan::{ScanOutcome, Scanner};

/// Default background poll period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(300_000);

/// Default page size requested from the listings endpoint (the API maximum).
pub const DEFAULT_PAGE_LIMIT: u32 = 1000;

/// Orchestrator tuning.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Run the background poll at all.
    pub poll_enabled: bool,
    pub poll_interval: Duration,
    /// `limit` sent with every listings request.
    pub page_limit: u32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            poll_enabled: true,
            poll_interval: DEFAULT_POLL_INTERVAL,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ListingsKey {
    selected_exchange: String,
    days: u32,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    is_pagination_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StatisticsKey {
    days: u32,
    is_pagination_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PollKey {
    days: u32,
    selected_exchange: String,
    previous_listings_count: usize,
}

/// Dependency slices of one observed state.
struct Observed {
    listings: ListingsKey,
    statistics: StatisticsKey,
    poll: PollKey,
    query: ListingQuery,
}

impl Observed {
    fn of(state: &AppState) -> Self {
        Self {
            listings: ListingsKey {
                selected_exchange: state.selected_exchange.clone(),
                days: state.days,
                start_date: state.start_date,
                end_date: state.end_date,
                is_pagination_mode: state.is_pagination_mode,
            },
            statistics: StatisticsKey {
                days: state.days,
                is_pagination_mode: state.is_pagination_mode,
            },
            poll: PollKey {
                days: state.days,
                selected_exchange: state.selected_exchange.clone(),
                previous_listings_count: state.previous_listings_count,
            },
            query: state.listing_query(),
        }
    }
}

/// Last seen dependency slices; `None` until the first observation.
#[derive(Default)]
struct Watched {
    listings: Option<ListingsKey>,
    statistics: Option<StatisticsKey>,
    poll: Option<PollKey>,
}

/// Data-fetch orchestrator. Build it, then [`start`](Self::start) it once.
pub struct Orchestrator {
    ctx: Arc<Context>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(
        api: Arc<dyn ListingApi>,
        store: Store,
        notifiers: NotifierRegistry,
        permission: Arc<dyn PermissionGate>,
        config: OrchestratorConfig,
    ) -> Self {
        let ctx = Context::new(
            api,
            store,
            Arc::new(notifiers),
            permission,
            config.page_limit,
        );
        Self {
            ctx: Arc::new(ctx),
            config,
        }
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.ctx.store
    }

    /// Scan trigger sharing this orchestrator's store and request counters.
    #[must_use]
    pub fn scanner(&self) -> Scanner {
        Scanner {
            ctx: Arc::clone(&self.ctx),
        }
    }

    /// Mount: load exchanges, ask for notification permission if undecided,
    /// then react to state changes until shut down.
    pub fn start(self) -> OrchestratorHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let scanner = self.scanner();
        let store = self.ctx.store.clone();
        let ctx = self.ctx;
        let config = self.config;

        info!(
            poll = config.poll_enabled,
            poll_interval_ms = config.poll_interval.as_millis() as u64,
            page_limit = config.page_limit,
            "Starting orchestrator"
        );

        let task = tokio::spawn(async move {
            let mut tasks = JoinSet::new();
            let mut watched = Watched::default();
            let mut poll: Option<PollTask> = None;
            let mut rx = ctx.store.subscribe();

            tasks.spawn(request_permission(Arc::clone(&ctx)));
            {
                let ctx = Arc::clone(&ctx);
                let ticket = ctx.exchanges.issue();
                tasks.spawn(async move { loader::load_exchanges(&ctx, ticket).await });
            }

            loop {
                let observed = Observed::of(&rx.borrow_and_update());
                react(&ctx, &config, observed, &mut watched, &mut poll, &mut tasks);

                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Orchestrator shutting down");
                        break;
                    }
                    changed = rx.changed() => {
                        if changed.is_err() {
                            debug!("Store dropped");
                            break;
                        }
                    }
                    Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
                }
            }

            if let Some(poll) = poll.take() {
                poll.cancel().await;
            }
            tasks.shutdown().await;
        });

        OrchestratorHandle {
            shutdown_tx,
            task,
            scanner,
            store,
        }
    }
}

fn react(
    ctx: &Arc<Context>,
    config: &OrchestratorConfig,
    observed: Observed,
    watched: &mut Watched,
    poll: &mut Option<PollTask>,
    tasks: &mut JoinSet<()>,
) {
    if watched.listings.as_ref() != Some(&observed.listings) {
        // Tickets are taken here, in change order, not when a task first runs.
        let ticket = ctx.listings.issue();
        debug!(ticket, params = ?observed.query.params(), "Listings filter changed");
        let ctx = Arc::clone(ctx);
        let query = observed.query;
        tasks.spawn(async move { loader::load_listings(&ctx, ticket, query).await });
        watched.listings = Some(observed.listings);
    }

    if watched.statistics.as_ref() != Some(&observed.statistics) {
        if !observed.statistics.is_pagination_mode {
            let ticket = ctx.statistics.issue();
            let ctx = Arc::clone(ctx);
            let days = observed.statistics.days;
            tasks.spawn(async move { loader::load_statistics(&ctx, ticket, days).await });
        }
        watched.statistics = Some(observed.statistics);
    }

    if watched.poll.as_ref() != Some(&observed.poll) {
        // Dropping the previous task cancels it.
        *poll = config
            .poll_enabled
            .then(|| PollTask::arm(Arc::clone(ctx), config.poll_interval));
        debug!(
            days = observed.poll.days,
            previous = observed.poll.previous_listings_count,
            "Poll re-armed"
        );
        watched.poll = Some(observed.poll);
    }
}

async fn request_permission(ctx: Arc<Context>) {
    if ctx.permission.permission() != Permission::Default {
        return;
    }
    let answer = ctx.permission.request().await;
    info!(permission = %answer, "Notification permission requested");
}

/// Handle to a running orchestrator.
pub struct OrchestratorHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
    scanner: Scanner,
    store: Store,
}

impl OrchestratorHandle {
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub fn scanner(&self) -> Scanner {
        self.scanner.clone()
    }

    /// Run a scan to completion.
    pub async fn scan(&self) -> ScanOutcome {
        self.scanner.scan().await
    }

    /// Unmount: cancel the poll and every in-flight load, then wait.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        let _ = self.task.await;
    }
}
