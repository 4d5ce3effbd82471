//! Telegram delivery of listing notifications.
//!
//! Requires the `telegram` feature to be enabled.

mod format;

pub mod notifier;
