//! Data-fetch orchestrator.
//!
//! Owns every effectful read of the dashboard. Once started it watches the
//! [`Store`](crate::application::state::Store) and re-runs a loader whenever the slice of state that loader
//! depends on changes:
//!
//! | loader      | re-runs on                                               |
//! |-------------|----------------------------------------------------------|
//! | exchanges   | start only                                               |
//! | listings    | exchange, days, start/end date, pagination mode          |
//! | statistics  | days, pagination mode (skipped for date ranges)          |
//! | poll (task) | days, exchange, previous listings count (re-armed)       |
//!
//! Each loader owns a request generation; a response is applied only while
//! its request is the latest of its kind. The poll never takes a listings
//! ticket, so a user or scan fetch always wins over it.

mod context;
mod loader;
mod poll;

pub mod generation;
pub mod scan;
pub mod service;
