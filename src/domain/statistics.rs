//! Aggregate listing statistics for a day window.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Listing count for one calendar day (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: String,
    pub count: u64,
}

/// Listing total for one exchange within the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeTotal {
    pub code: String,
    pub name: String,
    pub total_listings: u64,
}

/// Server-side aggregate snapshot, recomputed per request.
///
/// Only defined for a trailing day window, never for custom date ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_all_time: u64,
    #[serde(default)]
    pub statuses: BTreeMap<String, u64>,
    #[serde(default)]
    pub security_types: BTreeMap<String, u64>,
    #[serde(default)]
    pub daily_stats: Vec<DailyCount>,
    #[serde(default)]
    pub exchange_stats: Vec<ExchangeTotal>,
}

impl Statistics {
    /// The busiest day in the window, if any listing was recorded.
    #[must_use]
    pub fn peak_day(&self) -> Option<&DailyCount> {
        self.daily_stats
            .iter()
            .filter(|day| day.count > 0)
            .max_by_key(|day| day.count)
    }
}
