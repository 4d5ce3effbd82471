//! Wire types that only exist at the HTTP boundary.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::Listing;

/// `GET listings` response page.
#[derive(Debug, Deserialize)]
pub struct ListingPage {
    pub items: Vec<Listing>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

/// Error body of a non-2xx response.
///
/// `detail` is a string for handled errors and a list of field errors for
/// request validation failures.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Value,
}

impl ErrorBody {
    /// Human-readable message for the error.
    pub fn message(&self) -> String {
        match &self.detail {
            Value::String(message) => message.clone(),
            Value::Array(errors) => errors
                .iter()
                .map(|error| {
                    error
                        .get("msg")
                        .and_then(Value::as_str)
                        .map_or_else(|| error.to_string(), ToOwned::to_owned)
                })
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}
