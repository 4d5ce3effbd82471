//! Command-line adapter.
//!
//! `command` parses arguments, `dispatch` hands each subcommand to its
//! handler, and handlers print through `output` only.

pub mod check;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod exchanges;
pub mod filter;
pub mod listings;
pub mod output;
pub mod render;
pub mod scan;
pub mod stats;
pub mod watch;
