//! Listing API port.
//!
//! The stock-scanner REST service owns listings, exchanges, statistics and
//! the scrape trigger. The dashboard only reads from it (and asks it to
//! scan).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Exchange, Listing, ListingQuery, Statistics};
use crate::error::Result;

/// Acknowledgement returned by the scrape trigger.
///
/// The scan itself runs asynchronously on the scraper side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanAck {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

/// Remote reads and the scan trigger.
///
/// Implementations must not retry; failures are reported to the caller as
/// they happen.
#[async_trait]
pub trait ListingApi: Send + Sync {
    /// `GET listings` for a filter.
    async fn listings(&self, query: &ListingQuery) -> Result<Vec<Listing>>;

    /// `GET exchanges`.
    async fn exchanges(&self) -> Result<Vec<Exchange>>;

    /// `GET statistics` for a trailing day window.
    async fn statistics(&self, days: u32) -> Result<Statistics>;

    /// `POST scrape`, for one exchange or all of them.
    async fn scrape(&self, exchange: Option<&str>) -> Result<ScanAck>;
}
