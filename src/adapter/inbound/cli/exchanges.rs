//! Handler for the `exchanges` command.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::dispatch::prepare;
use crate::adapter::inbound::cli::{output, render};
use crate::error::Result;
use crate::infrastructure::bootstrap;

pub async fn execute(config_path: &Path) -> Result<()> {
    let config = prepare(config_path)?;
    let api = bootstrap::build_api(&config);

    let pb = output::spinner("Fetching exchanges...");
    let exchanges = match api.exchanges().await {
        Ok(exchanges) => {
            output::spinner_success(&pb, &format!("{} exchanges", exchanges.len()));
            exchanges
        }
        Err(e) => {
            output::spinner_fail(&pb, "Failed to load exchanges");
            return Err(e);
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "exchanges",
            "exchanges": exchanges,
        }));
        return Ok(());
    }

    output::section("Exchanges");
    render::print_exchanges(&exchanges);
    Ok(())
}
