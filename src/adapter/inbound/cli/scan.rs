//! Handler for the `scan` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::ScanArgs;
use crate::adapter::inbound::cli::dispatch::prepare;
use crate::adapter::inbound::cli::{output, render};
use crate::application::orchestrator::scan::ScanOutcome;
use crate::application::state::{AppState, Store};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::port::outbound::api::ListingApi;

/// Trigger a scrape, then report how the listings changed.
///
/// The current listings are fetched first and seeded as the growth baseline,
/// so the scan reports and notifies new listings like the dashboard does.
pub async fn execute(args: &ScanArgs) -> Result<()> {
    let config = prepare(&args.config.config)?;
    let mut state = config.initial_state();
    if let Some(code) = &args.exchange {
        state.selected_exchange = code.trim().to_string();
    }
    let target = if state.selected_exchange.is_empty() {
        "all exchanges".to_string()
    } else {
        state.selected_exchange.clone()
    };

    let api = bootstrap::build_api(&config);
    let store = seed_baseline(api.as_ref(), state, config.api.page_limit).await?;
    let before = store.with_state(|state| state.previous_listings_count);

    let (orchestrator, deliveries) = bootstrap::build_orchestrator(&config, store.clone());
    let scanner = orchestrator.scanner();
    drop(orchestrator);

    let pb = output::spinner(&format!("Scanning {target}..."));
    let outcome = scanner.scan().await;
    drop(scanner);

    match &outcome {
        ScanOutcome::Completed { ack, .. } => output::spinner_success(&pb, &ack.message),
        ScanOutcome::RefetchFailed { .. } => {
            output::spinner_fail(&pb, "Scan triggered but listings could not be reloaded")
        }
        _ => output::spinner_fail(&pb, "Scan failed"),
    }
    report(&outcome, &target, before, &store);

    deliveries.flush(bootstrap::DELIVERY_FLUSH_TIMEOUT).await;

    if outcome.is_completed() {
        return Ok(());
    }
    let message = store
        .with_state(|state| state.error.clone())
        .unwrap_or_else(|| "scan did not complete".to_string());
    Err(Error::Scan(message))
}

/// Store holding the current listings as an already-observed snapshot.
async fn seed_baseline(api: &dyn ListingApi, state: AppState, page_limit: u32) -> Result<Store> {
    let query = state.listing_query().with_limit(page_limit);
    let baseline = api.listings(&query).await?;
    Ok(Store::new(state.with_baseline(baseline)))
}

fn report(outcome: &ScanOutcome, target: &str, before: usize, store: &Store) {
    let (after, new_listings) = match outcome {
        ScanOutcome::Completed {
            total,
            new_listings,
            ..
        } => (*total, *new_listings),
        _ => (before, None),
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "scan",
            "exchange": target,
            "completed": outcome.is_completed(),
            "before": before,
            "after": after,
            "new_listings": new_listings,
            "error": store.with_state(|state| state.error.clone()),
        }));
        return;
    }
    if !outcome.is_completed() {
        return;
    }

    output::section("Scan");
    output::field("Target", target);
    output::field("Before", before);
    output::field("After", after);
    match new_listings {
        Some(count) => {
            output::field("New", output::positive(count));
            let listings = store.with_state(|state| state.listings.clone());
            render::print_listings(&listings, count);
        }
        None => output::note("No new listings yet; the scraper may still be running"),
    }
}
