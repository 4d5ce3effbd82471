//! Securities exchanges.

use serde::{Deserialize, Serialize};

/// A securities market identified by a unique code (e.g. `NASDAQ`, `HKEX`).
///
/// Loaded once per session; there is no invalidation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Exchange {
    /// Find an exchange by code in a loaded set.
    #[must_use]
    pub fn find<'a>(exchanges: &'a [Exchange], code: &str) -> Option<&'a Exchange> {
        exchanges.iter().find(|exchange| exchange.code == code)
    }
}
