//! Scripted [`ListingApi`] for orchestrator tests.
//!
//! Each endpoint has a queue of replies. A call pops the next reply; once the
//! queue is empty the endpoint keeps answering with its fallback. Replies can
//! carry a delay so tests can hold a request in flight under paused Tokio
//! time.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{Exchange, Listing, ListingQuery, Statistics};
use crate::error::{Error, Result};
use crate::port::outbound::api::{ListingApi, ScanAck};

/// Scripted outcome of one call.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    /// Fails with an HTTP 500 carrying this message.
    Fail(String),
}

impl<T> Reply<T> {
    fn into_result(self) -> Result<T> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Fail(message) => Err(Error::Api {
                status: 500,
                message,
            }),
        }
    }
}

/// A recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Listings(ListingQuery),
    Exchanges,
    Statistics(u32),
    Scrape(Option<String>),
}

#[derive(Debug, Clone)]
struct Step<T> {
    reply: Reply<T>,
    delay: Duration,
}

struct Script<T> {
    queue: VecDeque<Step<T>>,
    fallback: Step<T>,
}

impl<T: Clone> Script<T> {
    fn new(fallback: T) -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: Step {
                reply: Reply::Ok(fallback),
                delay: Duration::ZERO,
            },
        }
    }

    fn next(&mut self) -> Step<T> {
        self.queue
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// In-memory API answering from per-endpoint scripts.
pub struct ScriptedApi {
    listings: Mutex<Script<Vec<Listing>>>,
    exchanges: Mutex<Script<Vec<Exchange>>>,
    statistics: Mutex<Script<Statistics>>,
    scrape: Mutex<Script<ScanAck>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl ScriptedApi {
    /// Every endpoint succeeds with empty data.
    pub fn new() -> Self {
        Self {
            listings: Mutex::new(Script::new(Vec::new())),
            exchanges: Mutex::new(Script::new(Vec::new())),
            statistics: Mutex::new(Script::new(Statistics::default())),
            scrape: Mutex::new(Script::new(ScanAck {
                message: "Scan triggered successfully".into(),
                status: "success".into(),
            })),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue the next listings reply.
    pub fn push_listings(&self, reply: Reply<Vec<Listing>>) -> &Self {
        self.push_listings_after(reply, Duration::ZERO)
    }

    /// Queue a listings reply delivered after `delay`.
    pub fn push_listings_after(&self, reply: Reply<Vec<Listing>>, delay: Duration) -> &Self {
        self.listings.lock().queue.push_back(Step { reply, delay });
        self
    }

    /// Answer every unscripted listings call with `reply`.
    pub fn set_listings(&self, reply: Reply<Vec<Listing>>) -> &Self {
        self.listings.lock().fallback = Step {
            reply,
            delay: Duration::ZERO,
        };
        self
    }

    pub fn set_exchanges(&self, reply: Reply<Vec<Exchange>>) -> &Self {
        self.exchanges.lock().fallback = Step {
            reply,
            delay: Duration::ZERO,
        };
        self
    }

    pub fn set_statistics(&self, reply: Reply<Statistics>) -> &Self {
        self.statistics.lock().fallback = Step {
            reply,
            delay: Duration::ZERO,
        };
        self
    }

    pub fn push_statistics_after(&self, reply: Reply<Statistics>, delay: Duration) -> &Self {
        self.statistics.lock().queue.push_back(Step { reply, delay });
        self
    }

    pub fn set_scrape(&self, reply: Reply<ScanAck>) -> &Self {
        self.scrape.lock().fallback = Step {
            reply,
            delay: Duration::ZERO,
        };
        self
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    /// Queries of every listings call so far.
    pub fn listing_queries(&self) -> Vec<ListingQuery> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                ApiCall::Listings(query) => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of statistics calls so far.
    pub fn statistics_calls(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, ApiCall::Statistics(_)))
            .count()
    }

    async fn answer<T>(step: Step<T>) -> Result<T> {
        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }
        step.reply.into_result()
    }
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingApi for ScriptedApi {
    async fn listings(&self, query: &ListingQuery) -> Result<Vec<Listing>> {
        self.calls.lock().push(ApiCall::Listings(query.clone()));
        let step = self.listings.lock().next();
        Self::answer(step).await
    }

    async fn exchanges(&self) -> Result<Vec<Exchange>> {
        self.calls.lock().push(ApiCall::Exchanges);
        let step = self.exchanges.lock().next();
        Self::answer(step).await
    }

    async fn statistics(&self, days: u32) -> Result<Statistics> {
        self.calls.lock().push(ApiCall::Statistics(days));
        let step = self.statistics.lock().next();
        Self::answer(step).await
    }

    async fn scrape(&self, exchange: Option<&str>) -> Result<ScanAck> {
        self.calls
            .lock()
            .push(ApiCall::Scrape(exchange.map(ToOwned::to_owned)));
        let step = self.scrape.lock().next();
        Self::answer(step).await
    }
}
