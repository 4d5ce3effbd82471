//! Log sink for notifier events.

use tracing::info;

use crate::port::outbound::notifier::{Event, Notifier};

/// Writes every event to the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        match event {
            Event::NewListings(e) => {
                info!(
                    count = e.count,
                    total = e.total,
                    exchange = e.exchange.as_deref().unwrap_or("all"),
                    symbols = %e.symbols.join(","),
                    source = e.source.as_str(),
                    "{}",
                    e.title()
                );
            }
            Event::ScanCompleted(e) => {
                info!(
                    exchange = e.exchange.as_deref().unwrap_or("all"),
                    new_listings = e.new_listings.unwrap_or(0),
                    message = %e.message,
                    "Scan completed"
                );
            }
        }
    }
}
