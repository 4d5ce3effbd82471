//! Handler for the `listings` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::ListingsArgs;
use crate::adapter::inbound::cli::dispatch::prepare;
use crate::adapter::inbound::cli::filter::{describe_filter, initial_state};
use crate::adapter::inbound::cli::{output, render};
use crate::error::Result;
use crate::infrastructure::bootstrap;

/// Fetch listings for the requested filter and print them.
pub async fn execute(args: &ListingsArgs) -> Result<()> {
    let config = prepare(&args.config.config)?;
    let state = initial_state(&config, &args.filter)?;
    let query = state.listing_query().with_limit(config.api.page_limit);
    let api = bootstrap::build_api(&config);

    let pb = output::spinner("Fetching listings...");
    let listings = match api.listings(&query).await {
        Ok(listings) => {
            output::spinner_success(&pb, &format!("Fetched {} listings", listings.len()));
            listings
        }
        Err(e) => {
            output::spinner_fail(&pb, "Failed to load listings");
            return Err(e);
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "listings",
            "filter": describe_filter(&state),
            "total": listings.len(),
            "listings": listings,
        }));
        return Ok(());
    }

    output::section(&format!("Listings ({})", describe_filter(&state)));
    render::print_listings(&listings, args.rows);
    Ok(())
}
