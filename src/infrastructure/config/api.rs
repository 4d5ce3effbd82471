//! REST API client configuration.

use serde::Deserialize;

/// Largest page the listings endpoint accepts.
pub const MAX_PAGE_LIMIT: u32 = 1000;

/// Settings for the stock-scanner REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// API root including the version prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in milliseconds; 0 disables it.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// `limit` sent with every listings request.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

fn default_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

const fn default_page_limit() -> u32 {
    MAX_PAGE_LIMIT
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            page_limit: default_page_limit(),
        }
    }
}
