//! Notifier port for event notifications.
//!
//! This module defines the trait for the platform "show notification" side
//! effect raised when new listings are detected.

use crate::domain::Listing;

/// Which path detected the growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSource {
    /// Unattended background poll.
    Poll,
    /// On-demand scan.
    Scan,
}

impl DetectionSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Poll => "poll",
            Self::Scan => "scan",
        }
    }
}

/// Events that can trigger notifications.
#[derive(Debug, Clone)]
pub enum Event {
    /// The listing count grew since the last baseline.
    NewListings(NewListingsEvent),
    /// A scan request finished (with or without growth).
    ScanCompleted(ScanEvent),
}

/// New-listings event.
#[derive(Debug, Clone)]
pub struct NewListingsEvent {
    /// How many listings appeared since the baseline.
    pub count: usize,
    /// Listings now visible for the filter.
    pub total: usize,
    /// Exchange code the filter was narrowed to, if any.
    pub exchange: Option<String>,
    /// Symbols of the most recent listings, newest first.
    pub symbols: Vec<String>,
    pub source: DetectionSource,
}

impl NewListingsEvent {
    /// Maximum number of symbols carried in an event.
    pub const MAX_SYMBOLS: usize = 5;

    /// Build an event from the freshly fetched listings.
    #[must_use]
    pub fn new(
        count: usize,
        listings: &[Listing],
        exchange: &str,
        source: DetectionSource,
    ) -> Self {
        let mut newest: Vec<&Listing> = listings.iter().collect();
        newest.sort_by(|a, b| b.listing_date.cmp(&a.listing_date));

        Self {
            count,
            total: listings.len(),
            exchange: (!exchange.is_empty()).then(|| exchange.to_string()),
            symbols: newest
                .into_iter()
                .take(count.min(Self::MAX_SYMBOLS))
                .map(|listing| listing.symbol.clone())
                .collect(),
            source,
        }
    }

    /// Notification title, e.g. "3 new listings".
    #[must_use]
    pub fn title(&self) -> String {
        if self.count == 1 {
            "1 new listing".to_string()
        } else {
            format!("{} new listings", self.count)
        }
    }
}

/// Scan completion event.
#[derive(Debug, Clone)]
pub struct ScanEvent {
    pub exchange: Option<String>,
    /// Growth detected by the re-fetch, if any.
    pub new_listings: Option<usize>,
    /// Acknowledgement message from the API.
    pub message: String,
}

/// Trait for notification handlers.
///
/// Notifications are fire-and-forget.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - The `notify` method should not block or perform slow I/O synchronously
/// - Spawn async tasks for slow operations
pub trait Notifier: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Notify all registered notifiers.
    pub fn notify_all(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A no-op notifier for when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}
