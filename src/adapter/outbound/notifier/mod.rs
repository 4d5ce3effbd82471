//! Notification adapters.
//!
//! Implements the `port::outbound::notifier::Notifier` trait for the log and
//! Telegram backends.

pub mod log;

#[cfg(feature = "telegram")]
pub mod telegram;
