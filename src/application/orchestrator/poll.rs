//! Background poll for new listings.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::application::notification::detect_growth;
use crate::application::state::Action;
use crate::port::outbound::notifier::{DetectionSource, Event, NewListingsEvent};

use super::context::Context;

/// A running poll task. Dropping it cancels the task.
pub(crate) struct PollTask {
    cancel: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollTask {
    /// Arm a poll whose first tick fires one full `period` from now.
    pub fn arm(ctx: Arc<Context>, period: Duration) -> Self {
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                // A tick in flight is abandoned on cancel.
                tokio::select! {
                    biased;
                    _ = &mut cancel_rx => break,
                    () = next_tick(&mut ticker, &ctx) => {}
                }
            }
            trace!("Poll task stopped");
        });

        Self {
            cancel: Some(cancel_tx),
            task: Some(task),
        }
    }

    /// Stop the poll and wait for its task to finish.
    pub async fn cancel(mut self) {
        self.signal();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn signal(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        self.signal();
    }
}

async fn next_tick(ticker: &mut Interval, ctx: &Context) {
    ticker.tick().await;
    tick(ctx).await;
}

/// One poll iteration.
pub(crate) async fn tick(ctx: &Context) {
    if !ctx.permission.permission().is_granted() {
        trace!("Poll skipped: notifications not granted");
        return;
    }

    let (query, exchange) = ctx
        .store
        .with_state(|state| (state.poll_query(), state.selected_exchange.clone()));
    let Some(query) = query else {
        trace!("Poll skipped: date range filter active");
        return;
    };
    let query = query.with_limit(ctx.page_limit);

    // The poll never supersedes a listings request; it yields to any issued
    // while it is in flight.
    let generation = ctx.listings.peek();

    let listings = match ctx.api.listings(&query).await {
        Ok(listings) => listings,
        Err(e) => {
            warn!(error = %e, "Poll for new listings failed");
            return;
        }
    };

    if !ctx.listings.is_current(generation) {
        debug!("Dropping poll result superseded by a listings request");
        return;
    }

    let (previous, announced) = ctx.store.with_state(|state| {
        let announced = state.has_new_listings.then_some(state.new_listings_count);
        (state.previous_listings_count, announced)
    });
    let Some(count) = detect_growth(previous, listings.len()) else {
        trace!(previous, current = listings.len(), "Poll found no new listings");
        return;
    };

    ctx.store
        .dispatch(Action::SetNewListings { has: true, count });
    // The baseline only moves on the next reload, so later ticks keep finding
    // the same growth. Alert once per distinct count.
    if announced == Some(count) {
        debug!(count, "New listings already announced");
    } else {
        info!(count, total = listings.len(), "New listings detected");
        ctx.notify(Event::NewListings(NewListingsEvent::new(
            count,
            &listings,
            &exchange,
            DetectionSource::Poll,
        )));
    }
    ctx.store.dispatch(Action::SetListings(listings));
}
