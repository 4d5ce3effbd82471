//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`api`]: [`ScriptedApi`](api::ScriptedApi), a scripted
//!   [`ListingApi`](crate::port::outbound::api::ListingApi) with call recording
//!   and per-reply delays.
//! - [`domain`]: Builders for listings, exchanges and statistics.
//! - [`notifier`]: [`RecordingNotifier`](notifier::RecordingNotifier).
//! - [`permission`]: [`FixedPermission`](permission::FixedPermission).

pub mod api;
pub mod domain;
pub mod notifier;
pub mod permission;
