//! Listing-dashboard state.
//!
//! [`AppState`] is a single value replaced on every [`Action`]. The
//! [`reduce`] function is the only code that builds a new state, and the
//! [`Store`] is the only owner that applies it.
//!
//! Filter modes are mutually exclusive: `is_pagination_mode` holds exactly
//! when `days == 0` and both range dates are set.

mod action;
mod reducer;
mod store;

use chrono::NaiveDate;

use crate::domain::{Exchange, Listing, ListingQuery, Statistics, DEFAULT_DAYS};

pub use action::Action;
pub use reducer::reduce;
pub use store::Store;

/// Snapshot of everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Server truth from the last successful listings fetch.
    pub listings: Vec<Listing>,
    pub exchanges: Vec<Exchange>,
    pub statistics: Option<Statistics>,
    /// Exchange code, or empty for all exchanges.
    pub selected_exchange: String,

    /// Trailing day window; 0 while in pagination mode.
    pub days: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_pagination_mode: bool,

    pub is_loading_listings: bool,
    pub is_loading_exchanges: bool,
    pub is_loading_statistics: bool,
    pub is_scanning: bool,
    pub show_statistics: bool,

    /// Last error message, kept until cleared or overwritten.
    pub error: Option<String>,

    pub has_new_listings: bool,
    /// Drives the transient "new listings" banner.
    pub notification_open: bool,
    pub new_listings_count: usize,
    /// Length of `listings` before the most recent `SetListings`.
    pub previous_listings_count: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_days(DEFAULT_DAYS)
    }
}

impl AppState {
    /// Initial state filtering by a trailing day window.
    ///
    /// A zero window falls back to [`DEFAULT_DAYS`].
    #[must_use]
    pub fn with_days(days: u32) -> Self {
        Self {
            listings: Vec::new(),
            exchanges: Vec::new(),
            statistics: None,
            selected_exchange: String::new(),
            days: if days == 0 { DEFAULT_DAYS } else { days },
            start_date: None,
            end_date: None,
            is_pagination_mode: false,
            is_loading_listings: false,
            is_loading_exchanges: false,
            is_loading_statistics: false,
            is_scanning: false,
            show_statistics: true,
            error: None,
            has_new_listings: false,
            notification_open: false,
            new_listings_count: 0,
            previous_listings_count: 0,
        }
    }

    /// Seed `listings` as an already-observed snapshot, so the next growth
    /// check compares against their count.
    #[must_use]
    pub fn with_baseline(mut self, listings: Vec<Listing>) -> Self {
        self.previous_listings_count = listings.len();
        self.listings = listings;
        self
    }

    /// Whether the filter-mode exclusivity invariant holds.
    #[must_use]
    pub fn filter_mode_consistent(&self) -> bool {
        let dates_set = self.start_date.is_some() && self.end_date.is_some();
        let dates_clear = self.start_date.is_none() && self.end_date.is_none();
        if self.is_pagination_mode {
            self.days == 0 && dates_set
        } else {
            self.days > 0 && dates_clear
        }
    }

    /// Query for the current filter: date range in pagination mode, day
    /// window otherwise, narrowed to the selected exchange.
    #[must_use]
    pub fn listing_query(&self) -> ListingQuery {
        let query = match (self.is_pagination_mode, self.start_date, self.end_date) {
            (true, Some(start), Some(end)) => ListingQuery::range(start, end),
            _ => ListingQuery::days(self.days),
        };
        query.with_exchange(&self.selected_exchange)
    }

    /// Query used by the background poll, which only knows day windows.
    ///
    /// `None` while in pagination mode.
    #[must_use]
    pub fn poll_query(&self) -> Option<ListingQuery> {
        (self.days > 0).then(|| ListingQuery::days(self.days).with_exchange(&self.selected_exchange))
    }

    /// Display name of the selected exchange, or "All exchanges".
    #[must_use]
    pub fn exchange_label(&self) -> String {
        if self.selected_exchange.is_empty() {
            return "All exchanges".to_string();
        }
        Exchange::find(&self.exchanges, &self.selected_exchange)
            .map(|exchange| format!("{} ({})", exchange.name, exchange.code))
            .unwrap_or_else(|| self.selected_exchange.clone())
    }
}
