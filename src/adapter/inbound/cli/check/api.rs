use std::path::Path;
use std::time::Instant;

use serde_json::json;

use crate::adapter::inbound::cli::dispatch::prepare;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::api::client::HttpListingApi;
use crate::error::Result;
use crate::port::outbound::api::ListingApi;

/// Test connectivity to the stock-scanner API by listing its exchanges.
pub async fn execute_api<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = prepare(config_path.as_ref())?;
    let api = HttpListingApi::from_config(&config.api);

    if !output::is_json() {
        output::section("API Check");
        output::field("Base URL", api.base_url());
    }

    let pb = output::spinner("Checking API...");
    let started = Instant::now();
    let exchanges = match api.exchanges().await {
        Ok(exchanges) => exchanges,
        Err(e) => {
            output::spinner_fail(&pb, "API unreachable");
            return Err(e);
        }
    };
    let elapsed_ms = started.elapsed().as_millis() as u64;
    output::spinner_success(&pb, &format!("API responded in {elapsed_ms}ms"));

    if output::is_json() {
        output::json_output(json!({
            "command": "check.api",
            "base_url": api.base_url(),
            "latency_ms": elapsed_ms,
            "exchanges": exchanges.len(),
            "status": "ok",
        }));
        return Ok(());
    }

    output::field("Exchanges", exchanges.len());
    if exchanges.is_empty() {
        output::warning("API has no exchanges configured");
    } else {
        let codes: Vec<&str> = exchanges.iter().map(|e| e.code.as_str()).collect();
        output::field("Codes", codes.join(", "));
    }
    output::success("API check passed");
    Ok(())
}
