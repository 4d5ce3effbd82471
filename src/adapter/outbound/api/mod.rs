//! Stock-scanner REST API adapter.

pub mod client;
mod dto;
