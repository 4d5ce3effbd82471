//! Notification permission port.
//!
//! Models the host's three-valued notification permission. The dashboard
//! consults it but never owns it.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Deserialize;

/// Host notification permission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Not yet decided; may be requested once.
    #[default]
    Default,
    Granted,
    Denied,
}

impl Permission {
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "granted" => Ok(Self::Granted),
            "denied" => Ok(Self::Denied),
            other => Err(format!("unknown permission '{other}'")),
        }
    }
}

/// Read and request the notification permission.
#[async_trait]
pub trait PermissionGate: Send + Sync {
    /// Current permission; must not block.
    fn permission(&self) -> Permission;

    /// Ask the host for permission and return the outcome.
    ///
    /// Only meaningful from [`Permission::Default`]; a decided permission is
    /// returned unchanged.
    async fn request(&self) -> Permission;
}
