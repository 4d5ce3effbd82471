//! HTTP client for the stock-scanner REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{ErrorBody, ListingPage};
use crate::domain::{Exchange, Listing, ListingQuery, Statistics};
use crate::error::{Error, Result};
use crate::infrastructure::config::api::ApiConfig;
use crate::port::outbound::api::{ListingApi, ScanAck};

/// [`ListingApi`] over HTTP. Never retries.
pub struct HttpListingApi {
    http: HttpClient,
    base_url: String,
}

impl HttpListingApi {
    /// Client with reqwest's default timeouts.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        let mut builder = HttpClient::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms));
        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }

        let http = builder.build().unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build HTTP client, using defaults");
            HttpClient::new()
        });

        Self {
            http,
            base_url: config.base_url.clone(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Collection endpoints are mounted with a trailing slash.
    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{}/", self.base_url.trim_end_matches('/'), resource)
    }

    async fn get<T>(&self, resource: &str, params: &[(&'static str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(resource);
        debug!(url = %url, ?params, "GET");
        let response = self.http.get(&url).query(params).send().await?;
        Self::decode(response).await
    }

    async fn post<T>(&self, resource: &str, params: &[(&'static str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(resource);
        debug!(url = %url, ?params, "POST");
        let response = self.http.post(&url).query(params).send().await?;
        Self::decode(response).await
    }

    async fn decode<T>(response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|error| error.message())
            .unwrap_or_else(|_| {
                if body.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    body
                }
            });

        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ListingApi for HttpListingApi {
    async fn listings(&self, query: &ListingQuery) -> Result<Vec<Listing>> {
        let page: ListingPage = self.get("listings", &query.params()).await?;
        if page.total > page.items.len() as u64 {
            debug!(
                returned = page.items.len(),
                total = page.total,
                skip = page.skip,
                limit = page.limit,
                "Listings truncated to one page"
            );
        }
        Ok(page.items)
    }

    async fn exchanges(&self) -> Result<Vec<Exchange>> {
        self.get("exchanges", &[]).await
    }

    async fn statistics(&self, days: u32) -> Result<Statistics> {
        self.get("statistics", &[("days", days.to_string())]).await
    }

    async fn scrape(&self, exchange: Option<&str>) -> Result<ScanAck> {
        let params: Vec<(&'static str, String)> = exchange
            .map(|code| vec![("exchange", code.to_string())])
            .unwrap_or_default();
        self.post("scrape", &params).await
    }
}
