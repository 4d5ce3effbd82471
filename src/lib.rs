//! Stockscanner - watch stock exchanges for new listings.
//!
//! A client for the stock-scanner REST API. It keeps a listing dashboard's
//! state in one place, fetches whatever that state depends on, and raises a
//! notification when a background poll or an on-demand scan finds more
//! listings than before.
//!
//! # Architecture
//!
//! - **`domain`** - Listings, exchanges, statistics and listing filters
//! - **`application`** - State store, reducer and the data-fetch orchestrator
//! - **`port`** - Traits for the listing API, notifiers and the
//!   notification permission
//! - **`adapter`** - HTTP client, notifiers (log, Telegram) and the CLI
//! - **`infrastructure`** - Configuration, logging and wiring
//!
//! # Features
//!
//! - `telegram` (default) - Telegram alerts via teloxide
//! - `testkit` - Scripted API, recording notifier and fixtures for tests
//!
//! # Example
//!
//! ```no_run
//! use stockscanner::application::state::Store;
//! use stockscanner::infrastructure::bootstrap;
//! use stockscanner::infrastructure::config::settings::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("stockscanner.toml")?;
//!     config.init_logging();
//!
//!     let store = Store::new(config.initial_state());
//!     let (orchestrator, deliveries) = bootstrap::build_orchestrator(&config, store);
//!     let handle = orchestrator.start();
//!     let outcome = handle.scan().await;
//!     println!("scan completed: {}", outcome.is_completed());
//!     handle.shutdown().await;
//!     deliveries.flush(bootstrap::DELIVERY_FLUSH_TIMEOUT).await;
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
