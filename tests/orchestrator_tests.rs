//! Orchestrator integration tests: mount, reactive reloads, the background
//! poll and the scan trigger, against a scripted API under paused time.

mod support;

use std::time::Duration;

use stockscanner::application::orchestrator::scan::ScanOutcome;
use stockscanner::application::state::Action;
use stockscanner::domain::{DateRange, ListingQuery};
use stockscanner::port::outbound::notifier::{DetectionSource, Event};
use stockscanner::port::outbound::permission::{Permission, PermissionGate};
use stockscanner::testkit::api::{ApiCall, Reply};
use stockscanner::testkit::domain::{listing, listings};
use stockscanner::testkit::permission::FixedPermission;

use support::orchestrator::{healthy_api, settle, Harness, POLL};

#[tokio::test(start_paused = true)]
async fn mount_loads_exchanges_listings_and_statistics() {
    let harness = Harness::start(healthy_api(), FixedPermission::granted());
    settle().await;

    let state = harness.state();
    assert_eq!(state.exchanges.len(), 3);
    assert_eq!(state.listings.len(), 5);
    assert_eq!(state.statistics.as_ref().map(|s| s.total), Some(5));
    assert_eq!(state.previous_listings_count, 0);
    assert!(!state.is_loading_listings);
    assert!(!state.is_loading_exchanges);
    assert!(!state.is_loading_statistics);
    assert!(!state.has_new_listings);
    assert!(state.error.is_none());

    let calls = harness.api.calls();
    assert!(calls.contains(&ApiCall::Exchanges));
    assert!(calls.contains(&ApiCall::Statistics(30)));
    assert_eq!(
        harness.last_query(),
        Some(ListingQuery::days(30).with_limit(1000))
    );

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn undecided_permission_is_requested_once_at_mount() {
    let harness = Harness::start(healthy_api(), FixedPermission::undecided(Permission::Granted));
    settle().await;

    assert_eq!(harness.permission.requests(), 1);
    assert_eq!(harness.permission.permission(), Permission::Granted);

    harness.dispatch(Action::SetDays(7));
    settle().await;
    assert_eq!(harness.permission.requests(), 1);

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn decided_permission_is_never_requested() {
    let harness = Harness::start(healthy_api(), FixedPermission::denied());
    settle().await;

    assert_eq!(harness.permission.requests(), 0);
    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn day_window_change_reloads_listings_and_statistics() {
    let harness = Harness::start(healthy_api(), FixedPermission::granted());
    settle().await;

    harness.dispatch(Action::SetDays(7));
    settle().await;

    assert_eq!(harness.listing_calls(), 2);
    assert_eq!(
        harness.last_query(),
        Some(ListingQuery::days(7).with_limit(1000))
    );
    assert_eq!(harness.api.statistics_calls(), 2);
    assert!(harness.api.calls().contains(&ApiCall::Statistics(7)));

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn exchange_change_reloads_listings_only() {
    let harness = Harness::start(healthy_api(), FixedPermission::granted());
    settle().await;

    harness.dispatch(Action::SetSelectedExchange("HKEX".into()));
    settle().await;

    assert_eq!(
        harness.last_query(),
        Some(ListingQuery::days(30).with_exchange("HKEX").with_limit(1000))
    );
    assert_eq!(harness.api.statistics_calls(), 1);

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn unchanged_dependencies_do_not_reload() {
    let harness = Harness::start(healthy_api(), FixedPermission::granted());
    settle().await;

    harness.dispatch(Action::ToggleStatistics);
    harness.dispatch(Action::SetError("boom".into()));
    harness.dispatch(Action::ClearError);
    harness.dispatch(Action::SetDays(30));
    settle().await;

    assert_eq!(harness.listing_calls(), 1);
    assert_eq!(harness.api.statistics_calls(), 1);

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn date_range_skips_statistics_and_poll() {
    let harness = Harness::start(healthy_api(), FixedPermission::granted());
    settle().await;

    let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
    harness.dispatch(Action::SetDateRange {
        start: range.start(),
        end: range.end(),
    });
    settle().await;

    let state = harness.state();
    assert!(state.is_pagination_mode);
    assert_eq!(state.days, 0);
    assert!(state.filter_mode_consistent());
    assert_eq!(
        harness.last_query(),
        Some(ListingQuery::range(range.start(), range.end()).with_limit(1000))
    );
    assert_eq!(harness.api.statistics_calls(), 1);

    let before = harness.listing_calls();
    tokio::time::sleep(POLL * 2).await;
    settle().await;
    assert_eq!(harness.listing_calls(), before);

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn leaving_date_range_reloads_statistics() {
    let harness = Harness::start(healthy_api(), FixedPermission::granted());
    settle().await;

    let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
    harness.dispatch(Action::SetDateRange {
        start: range.start(),
        end: range.end(),
    });
    settle().await;
    harness.dispatch(Action::SetDays(30));
    settle().await;

    assert!(!harness.state().is_pagination_mode);
    assert_eq!(harness.api.statistics_calls(), 2);
    assert_eq!(
        harness.last_query(),
        Some(ListingQuery::days(30).with_limit(1000))
    );

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn poll_detects_growth_after_one_period() {
    let harness = Harness::with_baseline(healthy_api(), FixedPermission::granted()).await;
    harness.api.set_listings(Reply::Ok(listings(8)));
    assert_eq!(harness.listing_calls(), 2);

    tokio::time::sleep(POLL - Duration::from_secs(1)).await;
    assert_eq!(harness.listing_calls(), 2);

    tokio::time::sleep(Duration::from_secs(1)).await;
    settle().await;

    let state = harness.state();
    assert_eq!(harness.listing_calls(), 3);
    assert!(state.has_new_listings);
    assert!(state.notification_open);
    assert_eq!(state.new_listings_count, 3);
    assert_eq!(state.listings.len(), 8);
    assert_eq!(state.previous_listings_count, 5);

    let events = harness.recorder.new_listings();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].count, 3);
    assert_eq!(events[0].total, 8);
    assert_eq!(events[0].source, DetectionSource::Poll);

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn later_polls_do_not_repeat_the_same_alert() {
    let harness = Harness::with_baseline(healthy_api(), FixedPermission::granted()).await;
    harness.api.set_listings(Reply::Ok(listings(8)));

    tokio::time::sleep(POLL * 3).await;
    settle().await;

    assert_eq!(harness.listing_calls(), 5);
    let state = harness.state();
    assert!(state.has_new_listings);
    assert_eq!(state.new_listings_count, 3);
    assert_eq!(harness.recorder.new_listings().len(), 1);

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn poll_is_skipped_without_permission() {
    let harness = Harness::with_baseline(healthy_api(), FixedPermission::denied()).await;
    harness.api.set_listings(Reply::Ok(listings(8)));

    tokio::time::sleep(POLL * 2).await;
    settle().await;

    assert_eq!(harness.listing_calls(), 2);
    assert!(!harness.state().has_new_listings);
    assert!(harness.recorder.is_empty());

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn poll_resumes_once_permission_is_granted() {
    let harness = Harness::with_baseline(healthy_api(), FixedPermission::denied()).await;
    harness.api.set_listings(Reply::Ok(listings(6)));

    tokio::time::sleep(POLL).await;
    settle().await;
    assert!(!harness.state().has_new_listings);

    harness.permission.set(Permission::Granted);
    tokio::time::sleep(POLL).await;
    settle().await;

    assert_eq!(harness.state().new_listings_count, 1);
    assert_eq!(harness.recorder.new_listings().len(), 1);

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn poll_never_fires_from_zero_baseline() {
    let harness = Harness::start(healthy_api(), FixedPermission::granted());
    settle().await;
    assert_eq!(harness.state().previous_listings_count, 0);
    harness.api.set_listings(Reply::Ok(listings(7)));

    tokio::time::sleep(POLL).await;
    settle().await;

    let state = harness.state();
    assert_eq!(harness.listing_calls(), 2);
    assert!(!state.has_new_listings);
    assert_eq!(state.listings.len(), 5);
    assert!(harness.recorder.is_empty());

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn poll_discards_result_without_growth() {
    let harness = Harness::with_baseline(healthy_api(), FixedPermission::granted()).await;
    let original = harness.state().listings;

    let mut same_size = listings(4);
    same_size.push(listing(77, "SWAP", "2024-03-01"));
    harness.api.set_listings(Reply::Ok(same_size));

    tokio::time::sleep(POLL).await;
    settle().await;

    let state = harness.state();
    assert_eq!(harness.listing_calls(), 3);
    assert_eq!(state.listings, original);
    assert!(!state.has_new_listings);

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn poll_failure_is_silent() {
    let harness = Harness::with_baseline(healthy_api(), FixedPermission::granted()).await;
    harness
        .api
        .set_listings(Reply::Fail("upstream unavailable".into()));

    tokio::time::sleep(POLL).await;
    settle().await;

    let state = harness.state();
    assert!(state.error.is_none());
    assert_eq!(state.listings.len(), 5);

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn filter_change_resets_poll_schedule() {
    let harness = Harness::with_baseline(healthy_api(), FixedPermission::granted()).await;
    harness.api.set_listings(Reply::Ok(listings(5)));

    tokio::time::sleep(POLL - Duration::from_secs(10)).await;
    harness.dispatch(Action::SetSelectedExchange("NASDAQ".into()));
    settle().await;
    let after_change = harness.listing_calls();

    // The old schedule would have ticked here.
    tokio::time::sleep(Duration::from_secs(20)).await;
    assert_eq!(harness.listing_calls(), after_change);

    tokio::time::sleep(POLL).await;
    settle().await;
    assert_eq!(harness.listing_calls(), after_change + 1);

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn exchange_failure_leaves_other_loaders_untouched() {
    let api = healthy_api();
    api.set_exchanges(Reply::Fail("database locked".into()));
    let harness = Harness::start(api, FixedPermission::granted());
    settle().await;

    let state = harness.state();
    assert_eq!(state.error.as_deref(), Some("Failed to load exchanges"));
    assert!(state.exchanges.is_empty());
    assert_eq!(state.listings.len(), 5);
    assert!(state.statistics.is_some());
    assert!(!state.is_loading_exchanges);

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn listings_failure_keeps_previous_snapshot() {
    let harness = Harness::start(healthy_api(), FixedPermission::granted());
    settle().await;

    harness.api.set_listings(Reply::Fail("timeout".into()));
    harness.dispatch(Action::SetDays(14));
    settle().await;

    let state = harness.state();
    assert_eq!(state.error.as_deref(), Some("Failed to load listings"));
    assert_eq!(state.listings.len(), 5);
    assert!(!state.is_loading_listings);

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn stale_listings_response_is_dropped() {
    let api = healthy_api();
    api.push_listings_after(Reply::Ok(listings(3)), Duration::from_secs(5))
        .push_listings(Reply::Ok(listings(9)));
    let harness = Harness::start(api, FixedPermission::granted());
    settle().await;

    harness.dispatch(Action::SetDays(7));
    settle().await;
    assert_eq!(harness.state().listings.len(), 9);

    tokio::time::sleep(Duration::from_secs(6)).await;
    settle().await;

    let state = harness.state();
    assert_eq!(state.listings.len(), 9);
    assert!(!state.is_loading_listings);

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn filter_change_drops_poll_in_flight() {
    let harness = Harness::with_baseline(healthy_api(), FixedPermission::granted()).await;
    harness
        .api
        .push_listings_after(Reply::Ok(listings(20)), Duration::from_secs(10));
    harness.api.set_listings(Reply::Ok(listings(6)));

    tokio::time::sleep(POLL).await;
    settle().await;
    harness.dispatch(Action::SetSelectedExchange("HKEX".into()));
    settle().await;

    tokio::time::sleep(Duration::from_secs(15)).await;
    settle().await;

    let state = harness.state();
    assert_eq!(state.listings.len(), 6);
    assert!(!state.has_new_listings);
    assert!(harness.recorder.is_empty());

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn scan_detects_growth_and_notifies() {
    let harness = Harness::with_baseline(healthy_api(), FixedPermission::granted()).await;
    harness.api.set_listings(Reply::Ok(listings(8)));

    let outcome = harness.handle.scan().await;

    match outcome {
        ScanOutcome::Completed {
            total,
            new_listings,
            ..
        } => {
            assert_eq!(total, 8);
            assert_eq!(new_listings, Some(3));
        }
        other => panic!("expected a completed scan, got {other:?}"),
    }
    assert!(harness.api.calls().contains(&ApiCall::Scrape(None)));

    let state = harness.state();
    assert!(!state.is_scanning);
    assert!(state.has_new_listings);
    assert_eq!(state.listings.len(), 8);

    let events = harness.recorder.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], Event::NewListings(e) if e.source == DetectionSource::Scan));
    assert!(matches!(&events[1], Event::ScanCompleted(e) if e.new_listings == Some(3)));

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn scan_targets_selected_exchange() {
    let harness = Harness::start(healthy_api(), FixedPermission::granted());
    settle().await;
    harness.dispatch(Action::SetSelectedExchange("FSE".into()));
    settle().await;

    assert!(harness.handle.scan().await.is_completed());
    assert!(harness
        .api
        .calls()
        .contains(&ApiCall::Scrape(Some("FSE".into()))));

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn scrape_failure_sets_error() {
    let api = healthy_api();
    api.set_scrape(Reply::Fail("scraper offline".into()));
    let harness = Harness::start(api, FixedPermission::granted());
    settle().await;

    assert_eq!(harness.handle.scan().await, ScanOutcome::ScrapeFailed);

    let state = harness.state();
    assert_eq!(state.error.as_deref(), Some("Failed to trigger scan"));
    assert!(!state.is_scanning);

    harness.handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_poll() {
    let harness = Harness::with_baseline(healthy_api(), FixedPermission::granted()).await;
    let api = harness.api.clone();
    let store = harness.store().clone();
    api.set_listings(Reply::Ok(listings(8)));

    harness.handle.shutdown().await;
    tokio::time::sleep(POLL * 3).await;
    settle().await;

    assert_eq!(api.listing_queries().len(), 2);
    assert!(!store.snapshot().has_new_listings);

    // The store outlives the orchestrator but nothing reacts any more.
    store.dispatch(Action::SetDays(90));
    settle().await;
    assert_eq!(api.listing_queries().len(), 2);
}
