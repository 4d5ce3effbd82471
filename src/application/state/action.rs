//! Action vocabulary accepted by the store.

use chrono::NaiveDate;

use crate::domain::{Exchange, Listing, Statistics};

/// Every state transition the dashboard knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace listings; re-baselines `previous_listings_count` first.
    SetListings(Vec<Listing>),
    SetExchanges(Vec<Exchange>),
    SetStatistics(Statistics),
    /// Exchange code, or empty for all exchanges.
    SetSelectedExchange(String),
    /// Switch to a trailing day window. Zero is ignored.
    SetDays(u32),
    /// Switch to an inclusive date range (pagination mode).
    SetDateRange { start: NaiveDate, end: NaiveDate },
    /// Raise or clear the new-listings flag; the banner follows the flag.
    SetNewListings { has: bool, count: usize },
    /// Clear the flag and close the banner, keeping the counts.
    AcknowledgeNewListings,
    /// Open or close the banner without touching the flag.
    SetNotificationOpen(bool),
    ToggleStatistics,
    SetError(String),
    ClearError,
    SetLoadingListings(bool),
    SetLoadingExchanges(bool),
    SetLoadingStatistics(bool),
    SetScanning(bool),
}

impl Action {
    /// Stable name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SetListings(_) => "SET_LISTINGS",
            Self::SetExchanges(_) => "SET_EXCHANGES",
            Self::SetStatistics(_) => "SET_STATISTICS",
            Self::SetSelectedExchange(_) => "SET_SELECTED_EXCHANGE",
            Self::SetDays(_) => "SET_DAYS",
            Self::SetDateRange { .. } => "SET_DATE_RANGE",
            Self::SetNewListings { .. } => "SET_NEW_LISTINGS",
            Self::AcknowledgeNewListings => "ACKNOWLEDGE_NEW_LISTINGS",
            Self::SetNotificationOpen(_) => "SET_NOTIFICATION_OPEN",
            Self::ToggleStatistics => "TOGGLE_STATISTICS",
            Self::SetError(_) => "SET_ERROR",
            Self::ClearError => "CLEAR_ERROR",
            Self::SetLoadingListings(_) => "SET_LOADING_LISTINGS",
            Self::SetLoadingExchanges(_) => "SET_LOADING_EXCHANGES",
            Self::SetLoadingStatistics(_) => "SET_LOADING_STATISTICS",
            Self::SetScanning(_) => "SET_SCANNING",
        }
    }
}
