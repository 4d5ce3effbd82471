//! Listing-dashboard domain types.
//!
//! Plain data returned by the stock-scanner API plus the filter types used
//! to build listing queries. Nothing in here performs I/O.

mod exchange;
mod filter;
mod listing;
mod statistics;

pub use exchange::Exchange;
pub use filter::{DateRange, ListingQuery, DATE_FORMAT, DEFAULT_DAYS};
pub use listing::Listing;
pub use statistics::{DailyCount, ExchangeTotal, Statistics};
