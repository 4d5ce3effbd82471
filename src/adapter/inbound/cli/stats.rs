//! Handler for the `stats` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::StatsArgs;
use crate::adapter::inbound::cli::dispatch::prepare;
use crate::adapter::inbound::cli::{output, render};
use crate::error::Result;
use crate::infrastructure::bootstrap;

/// Fetch and print statistics for a trailing day window.
///
/// Falls back to the configured window when `--days` is absent.
pub async fn execute(args: &StatsArgs) -> Result<()> {
    let config = prepare(&args.config.config)?;
    let days = args.days.unwrap_or(config.filter.days);
    let api = bootstrap::build_api(&config);

    let pb = output::spinner("Fetching statistics...");
    let statistics = match api.statistics(days).await {
        Ok(statistics) => {
            output::spinner_success(&pb, "Statistics loaded");
            statistics
        }
        Err(e) => {
            output::spinner_fail(&pb, "Failed to load statistics");
            return Err(e);
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "stats",
            "days": days,
            "statistics": statistics,
        }));
        return Ok(());
    }

    render::print_statistics(&statistics, days);
    Ok(())
}
