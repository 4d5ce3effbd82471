//! Loaders: one remote read each, bracketed by its loading flag.
//!
//! Callers issue the request ticket before spawning a loader, so tickets
//! follow the order of requests rather than the order tasks get scheduled.
//! A response is applied only while its ticket is still current; superseded
//! responses (success or failure) are dropped.

use tracing::{debug, info, warn};

use crate::application::state::Action;
use crate::domain::ListingQuery;

use super::context::Context;

pub(crate) const EXCHANGES_ERROR: &str = "Failed to load exchanges";
pub(crate) const LISTINGS_ERROR: &str = "Failed to load listings";
pub(crate) const STATISTICS_ERROR: &str = "Failed to load statistics";

pub(crate) async fn load_exchanges(ctx: &Context, ticket: u64) {
    if !ctx.exchanges.is_current(ticket) {
        debug!(ticket, "Skipping superseded exchanges request");
        return;
    }
    ctx.store.dispatch(Action::SetLoadingExchanges(true));

    let result = ctx.api.exchanges().await;
    if !ctx.exchanges.is_current(ticket) {
        debug!(ticket, "Dropping superseded exchanges response");
        return;
    }

    match result {
        Ok(exchanges) => {
            info!(count = exchanges.len(), "Loaded exchanges");
            ctx.store.dispatch(Action::SetExchanges(exchanges));
        }
        Err(e) => {
            warn!(error = %e, "Exchanges request failed");
            ctx.store.dispatch(Action::SetError(EXCHANGES_ERROR.into()));
        }
    }
    ctx.store.dispatch(Action::SetLoadingExchanges(false));
}

pub(crate) async fn load_listings(ctx: &Context, ticket: u64, query: ListingQuery) {
    let query = query.with_limit(ctx.page_limit);
    if !ctx.listings.is_current(ticket) {
        debug!(ticket, "Skipping superseded listings request");
        return;
    }
    ctx.store.dispatch(Action::SetLoadingListings(true));
    debug!(ticket, params = ?query.params(), "Loading listings");

    let result = ctx.api.listings(&query).await;
    if !ctx.listings.is_current(ticket) {
        debug!(ticket, "Dropping superseded listings response");
        return;
    }

    match result {
        Ok(listings) => {
            info!(count = listings.len(), "Loaded listings");
            ctx.store.dispatch(Action::SetListings(listings));
            ctx.store
                .dispatch(Action::SetNewListings { has: false, count: 0 });
        }
        Err(e) => {
            warn!(error = %e, "Listings request failed");
            ctx.store.dispatch(Action::SetError(LISTINGS_ERROR.into()));
        }
    }
    ctx.store.dispatch(Action::SetLoadingListings(false));
}

pub(crate) async fn load_statistics(ctx: &Context, ticket: u64, days: u32) {
    if !ctx.statistics.is_current(ticket) {
        debug!(ticket, "Skipping superseded statistics request");
        return;
    }
    ctx.store.dispatch(Action::SetLoadingStatistics(true));

    let result = ctx.api.statistics(days).await;
    if !ctx.statistics.is_current(ticket) {
        debug!(ticket, "Dropping superseded statistics response");
        return;
    }

    match result {
        Ok(statistics) => {
            debug!(days, total = statistics.total, "Loaded statistics");
            ctx.store.dispatch(Action::SetStatistics(statistics));
        }
        Err(e) => {
            warn!(error = %e, days, "Statistics request failed");
            ctx.store.dispatch(Action::SetError(STATISTICS_ERROR.into()));
        }
    }
    ctx.store.dispatch(Action::SetLoadingStatistics(false));
}
