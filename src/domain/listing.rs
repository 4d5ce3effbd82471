//! Newly-listed securities.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

fn default_status() -> String {
    "New Listing".to_string()
}

fn default_security_type() -> String {
    "Equity".to_string()
}

/// A single exchange-traded security's new-listing record.
///
/// Immutable once fetched. The listing collection is always replaced as a
/// whole; individual records are never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub listing_date: NaiveDateTime,
    #[serde(default)]
    pub lot_size: i64,
    #[serde(default = "default_status")]
    pub status: String,
    /// Only present when the API includes the foreign key.
    #[serde(default)]
    pub exchange_id: Option<i64>,
    pub exchange_code: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub listing_detail_url: Option<String>,
    #[serde(default = "default_security_type")]
    pub security_type: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Listing {
    /// Best link for this listing: the detail page if known, else the source page.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.listing_detail_url
            .as_deref()
            .or(self.url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_api_item_with_defaults() {
        let json = r#"{
            "id": 7,
            "name": "Acme Robotics Inc",
            "symbol": "ACME",
            "listing_date": "2024-01-15T00:00:00",
            "exchange_code": "NASDAQ"
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();

        assert_eq!(listing.status, "New Listing");
        assert_eq!(listing.security_type, "Equity");
        assert_eq!(listing.lot_size, 0);
        assert!(listing.exchange_id.is_none());
        assert!(listing.link().is_none());
    }

    #[test]
    fn link_prefers_detail_url() {
        let json = r#"{
            "id": 1,
            "name": "Harbour Holdings",
            "symbol": "1234",
            "listing_date": "2024-02-01T09:30:00",
            "lot_size": 500,
            "exchange_code": "HKEX",
            "url": "https://hkex.example/new",
            "listing_detail_url": "https://hkex.example/new/1234"
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.link(), Some("https://hkex.example/new/1234"));
    }
}
