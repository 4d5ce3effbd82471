//! Listing filters and the query they produce.
//!
//! A listing query is scoped either by a trailing day window or by an
//! inclusive date range, never both, optionally narrowed to one exchange.

use std::fmt;

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Wire format for dates sent to and received from the API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Day window used when nothing else is configured.
pub const DEFAULT_DAYS: u32 = 30;

/// Inclusive calendar date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end` the same way the API does.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse a range from two `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate {
        value: value.to_string(),
    })
}

/// Query sent to `GET /listings`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub exchange_code: Option<String>,
    pub days: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<u32>,
}

impl ListingQuery {
    /// Query for the trailing `days` window.
    #[must_use]
    pub fn days(days: u32) -> Self {
        Self {
            exchange_code: None,
            days: Some(days),
            start_date: None,
            end_date: None,
            limit: None,
        }
    }

    /// Query for an inclusive date range.
    #[must_use]
    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            exchange_code: None,
            days: None,
            start_date: Some(start),
            end_date: Some(end),
            limit: None,
        }
    }

    /// Narrow to one exchange. An empty code means all exchanges.
    #[must_use]
    pub fn with_exchange(mut self, code: &str) -> Self {
        self.exchange_code = (!code.is_empty()).then(|| code.to_string());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs in a stable order.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);
        if let Some(code) = &self.exchange_code {
            params.push(("exchange_code", code.clone()));
        }
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => {
                params.push(("start_date", start.format(DATE_FORMAT).to_string()));
                params.push(("end_date", end.format(DATE_FORMAT).to_string()));
            }
            _ => {
                if let Some(days) = self.days {
                    params.push(("days", days.to_string()));
                }
            }
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}
