//! Pure state transitions.

use super::{Action, AppState};

/// Apply `action` to `state`, returning the next state.
///
/// Pure and total: no I/O, every action handled. Actions whose payload would
/// break filter-mode exclusivity return the state unchanged.
#[must_use]
pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();

    match action {
        Action::SetListings(listings) => {
            // Baseline for the next growth check: the length being replaced.
            next.previous_listings_count = next.listings.len();
            next.listings = listings;
        }
        Action::SetExchanges(exchanges) => next.exchanges = exchanges,
        Action::SetStatistics(statistics) => next.statistics = Some(statistics),
        Action::SetSelectedExchange(code) => next.selected_exchange = code,
        Action::SetDays(0) => {}
        Action::SetDays(days) => {
            next.days = days;
            next.is_pagination_mode = false;
            next.start_date = None;
            next.end_date = None;
        }
        Action::SetDateRange { start, end } => {
            next.start_date = Some(start);
            next.end_date = Some(end);
            next.is_pagination_mode = true;
            next.days = 0;
        }
        Action::SetNewListings { has, count } => {
            next.has_new_listings = has;
            next.new_listings_count = count;
            next.notification_open = has;
        }
        Action::AcknowledgeNewListings => {
            next.has_new_listings = false;
            next.notification_open = false;
        }
        Action::SetNotificationOpen(open) => next.notification_open = open,
        Action::ToggleStatistics => next.show_statistics = !next.show_statistics,
        Action::SetError(message) => next.error = Some(message),
        Action::ClearError => next.error = None,
        Action::SetLoadingListings(loading) => next.is_loading_listings = loading,
        Action::SetLoadingExchanges(loading) => next.is_loading_exchanges = loading,
        Action::SetLoadingStatistics(loading) => next.is_loading_statistics = loading,
        Action::SetScanning(scanning) => next.is_scanning = scanning,
    }

    next
}
