//! On-demand scan: ask the scraper to run, then re-fetch listings.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::notification::detect_growth;
use crate::application::state::Action;
use crate::port::outbound::api::ScanAck;
use crate::port::outbound::notifier::{DetectionSource, Event, NewListingsEvent, ScanEvent};

use super::context::Context;
use super::loader::LISTINGS_ERROR;

pub(crate) const SCAN_ERROR: &str = "Failed to trigger scan";

/// How a scan ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Scrape accepted and listings re-fetched.
    Completed {
        ack: ScanAck,
        total: usize,
        /// Growth against the previous listings, if any.
        new_listings: Option<usize>,
    },
    /// The re-fetch was superseded by a newer listings request.
    Superseded { ack: ScanAck },
    /// The scrape trigger failed; nothing was re-fetched.
    ScrapeFailed,
    /// Scrape accepted but the re-fetch failed.
    RefetchFailed { ack: ScanAck },
    /// Another scan was still running.
    AlreadyRunning,
}

impl ScanOutcome {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Triggers scans against the shared store. Clones share the same state.
#[derive(Clone)]
pub struct Scanner {
    pub(crate) ctx: Arc<Context>,
}

impl Scanner {
    /// Run one scan for the selected exchange.
    ///
    /// `is_scanning` brackets the whole scan. Only one scan runs at a time.
    pub async fn scan(&self) -> ScanOutcome {
        let ctx = &self.ctx;
        if ctx.scan_in_flight.swap(true, Ordering::SeqCst) {
            debug!("Scan already running");
            return ScanOutcome::AlreadyRunning;
        }

        ctx.store.dispatch(Action::SetScanning(true));
        let outcome = run(ctx).await;
        ctx.store.dispatch(Action::SetScanning(false));
        ctx.scan_in_flight.store(false, Ordering::SeqCst);

        outcome
    }
}

async fn run(ctx: &Context) -> ScanOutcome {
    let exchange = ctx.store.with_state(|state| state.selected_exchange.clone());
    let target = (!exchange.is_empty()).then_some(exchange.as_str());

    let ack = match ctx.api.scrape(target).await {
        Ok(ack) => ack,
        Err(e) => {
            warn!(error = %e, exchange = target.unwrap_or("all"), "Scan trigger failed");
            ctx.store.dispatch(Action::SetError(SCAN_ERROR.into()));
            return ScanOutcome::ScrapeFailed;
        }
    };
    info!(
        exchange = target.unwrap_or("all"),
        status = %ack.status,
        message = %ack.message,
        "Scan triggered"
    );

    let ticket = ctx.listings.issue();
    let query = ctx
        .store
        .with_state(|state| state.listing_query())
        .with_limit(ctx.page_limit);
    ctx.store.dispatch(Action::SetLoadingListings(true));

    let result = ctx.api.listings(&query).await;
    if !ctx.listings.is_current(ticket) {
        debug!(ticket, "Dropping superseded scan re-fetch");
        return ScanOutcome::Superseded { ack };
    }

    let listings = match result {
        Ok(listings) => listings,
        Err(e) => {
            warn!(error = %e, "Scan re-fetch failed");
            ctx.store.dispatch(Action::SetError(LISTINGS_ERROR.into()));
            ctx.store.dispatch(Action::SetLoadingListings(false));
            return ScanOutcome::RefetchFailed { ack };
        }
    };

    let previous = ctx.store.with_state(|state| state.previous_listings_count);
    let total = listings.len();
    let new_listings = detect_growth(previous, total);

    if let Some(count) = new_listings {
        info!(count, total, "Scan found new listings");
        ctx.store
            .dispatch(Action::SetNewListings { has: true, count });
        ctx.notify(Event::NewListings(NewListingsEvent::new(
            count,
            &listings,
            &exchange,
            DetectionSource::Scan,
        )));
    }
    ctx.notify(Event::ScanCompleted(ScanEvent {
        exchange: target.map(ToOwned::to_owned),
        new_listings,
        message: ack.message.clone(),
    }));

    ctx.store.dispatch(Action::SetListings(listings));
    ctx.store.dispatch(Action::SetLoadingListings(false));

    ScanOutcome::Completed {
        ack,
        total,
        new_listings,
    }
}
