//! Store-level dashboard flows: dispatch sequences a user session produces.

use chrono::NaiveDate;

use stockscanner::application::state::{Action, AppState, Store};
use stockscanner::domain::DATE_FORMAT;
use stockscanner::testkit::domain::{exchanges, listings, statistics};

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, DATE_FORMAT).unwrap()
}

#[test]
fn consecutive_listing_loads_track_previous_count() {
    let store = Store::default();
    let initial = store.snapshot();
    assert_eq!(initial.days, 30);
    assert!(!initial.is_pagination_mode);
    assert_eq!(initial.previous_listings_count, 0);

    store.dispatch(Action::SetListings(listings(5)));
    let state = store.snapshot();
    assert_eq!(state.listings.len(), 5);
    assert_eq!(state.previous_listings_count, 0);

    store.dispatch(Action::SetListings(listings(8)));
    assert_eq!(store.snapshot().previous_listings_count, 5);
}

#[test]
fn dismissing_banner_keeps_badge_until_acknowledged() {
    let store = Store::default();
    store.dispatch(Action::SetListings(listings(5)));
    store.dispatch(Action::SetNewListings { has: true, count: 3 });
    store.dispatch(Action::SetListings(listings(8)));

    let state = store.snapshot();
    assert!(state.has_new_listings);
    assert!(state.notification_open);
    assert_eq!(state.new_listings_count, 3);
    assert_eq!(state.previous_listings_count, 5);

    store.dispatch(Action::SetNotificationOpen(false));
    let state = store.snapshot();
    assert!(!state.notification_open);
    assert!(state.has_new_listings);

    store.dispatch(Action::AcknowledgeNewListings);
    let state = store.snapshot();
    assert!(!state.has_new_listings);
    assert!(!state.notification_open);
    assert_eq!(state.new_listings_count, 3);
    assert_eq!(state.previous_listings_count, 5);
}

#[test]
fn date_range_and_day_window_are_exclusive() {
    let store = Store::default();

    store.dispatch(Action::SetDateRange {
        start: date("2024-01-01"),
        end: date("2024-01-31"),
    });
    let state = store.snapshot();
    assert!(state.is_pagination_mode);
    assert_eq!(state.days, 0);
    assert_eq!(state.start_date, Some(date("2024-01-01")));
    assert_eq!(state.end_date, Some(date("2024-01-31")));
    assert!(state.filter_mode_consistent());

    store.dispatch(Action::SetDays(30));
    let state = store.snapshot();
    assert!(!state.is_pagination_mode);
    assert_eq!(state.days, 30);
    assert!(state.start_date.is_none());
    assert!(state.end_date.is_none());
    assert!(state.filter_mode_consistent());
}

#[test]
fn every_dispatch_keeps_filter_modes_consistent() {
    let store = Store::new(AppState::with_days(7));
    let actions = vec![
        Action::SetExchanges(exchanges()),
        Action::SetSelectedExchange("HKEX".into()),
        Action::SetDays(0),
        Action::SetDateRange {
            start: date("2024-02-01"),
            end: date("2024-02-29"),
        },
        Action::SetStatistics(statistics(4)),
        Action::SetDays(0),
        Action::SetDays(90),
        Action::SetSelectedExchange(String::new()),
        Action::ToggleStatistics,
    ];

    for action in actions {
        store.dispatch(action);
        assert!(store.snapshot().filter_mode_consistent());
    }

    let state = store.snapshot();
    assert_eq!(state.days, 90);
    assert!(!state.show_statistics);
    assert_eq!(state.exchange_label(), "All exchanges");
}

#[test]
fn errors_persist_until_cleared_or_overwritten() {
    let store = Store::default();
    store.dispatch(Action::SetError("Failed to load exchanges".into()));
    store.dispatch(Action::SetListings(listings(2)));
    assert_eq!(
        store.snapshot().error.as_deref(),
        Some("Failed to load exchanges")
    );

    store.dispatch(Action::SetError("Failed to load listings".into()));
    assert_eq!(
        store.snapshot().error.as_deref(),
        Some("Failed to load listings")
    );

    store.dispatch(Action::ClearError);
    assert!(store.snapshot().error.is_none());
}

#[test]
fn exchange_label_uses_loaded_names() {
    let store = Store::default();
    store.dispatch(Action::SetSelectedExchange("FSE".into()));
    assert_eq!(store.snapshot().exchange_label(), "FSE");

    store.dispatch(Action::SetExchanges(exchanges()));
    assert_eq!(store.snapshot().exchange_label(), "FSE Exchange (FSE)");
}
