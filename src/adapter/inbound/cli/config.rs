//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../stockscanner.toml.example");

/// Execute `config init`.
#[allow(clippy::result_large_err)]
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.init",
            "path": path.display().to_string(),
        }));
        return Ok(());
    }

    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your API root", path.display()));
    output::note("2. Set TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID for Telegram alerts");
    output::note(&format!(
        "3. Run: stockscanner check api -c {}",
        path.display()
    ));
    output::note(&format!("4. Run: stockscanner watch -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
///
/// A missing file shows the defaults.
#[allow(clippy::result_large_err)]
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "api": {
                "base_url": config.api.base_url,
                "timeout_ms": config.api.timeout_ms,
                "connect_timeout_ms": config.api.connect_timeout_ms,
                "page_limit": config.api.page_limit,
            },
            "filter": {
                "days": config.filter.days,
                "exchange": config.filter.exchange,
            },
            "poll": {
                "enabled": config.poll.enabled,
                "interval_ms": config.poll.interval_ms,
            },
            "notifications": {
                "permission": config.notifications.permission.as_str(),
                "grant_on_request": config.notifications.grant_on_request,
            },
            "telegram": {
                "enabled": config.telegram.enabled,
                "notify_scans": config.telegram.notify_scans,
            },
            "logging": {
                "level": config.logging.level,
                "format": config.logging.format,
            },
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    if !path.exists() {
        output::note("(file not found, showing defaults)");
    }

    output::section("API");
    output::field("Base URL", &config.api.base_url);
    output::field("Timeout", format!("{}ms", config.api.timeout_ms));
    output::field("Connect", format!("{}ms", config.api.connect_timeout_ms));
    output::field("Page limit", config.api.page_limit);

    output::section("Filter");
    output::field("Days", config.filter.days);
    output::field(
        "Exchange",
        if config.filter.exchange.is_empty() {
            "all"
        } else {
            config.filter.exchange.as_str()
        },
    );

    output::section("Poll");
    if config.poll.enabled {
        output::field("Interval", format!("{}ms", config.poll.interval_ms));
    } else {
        output::field("Interval", "disabled");
    }

    output::section("Notifications");
    output::field("Permission", config.notifications.permission);
    output::field(
        "Telegram",
        if config.telegram.enabled {
            "enabled"
        } else {
            "disabled"
        },
    );

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    Ok(())
}

/// Execute `config validate`.
#[allow(clippy::result_large_err)]
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    let warnings = warnings(&config);

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
            "warnings": warnings,
        }));
        return Ok(());
    }

    output::section("Config Validation");
    output::field("Path", path.display());
    output::success("Config file is valid");

    if !warnings.is_empty() {
        output::section("Warnings");
        for warning in &warnings {
            output::warning(warning);
        }
    }

    output::field(
        "Next",
        format!("stockscanner config show -c {}", path.display()),
    );

    Ok(())
}

/// Settings that are valid but probably not what the user wants.
fn warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.poll.enabled && config.poll.interval_ms < 10_000 {
        warnings.push(format!(
            "poll interval of {}ms will hit the API very often",
            config.poll.interval_ms
        ));
    }
    if config.api.timeout_ms == 0 {
        warnings.push("api.timeout_ms = 0 disables the request timeout".to_string());
    }
    if config.telegram.enabled
        && (std::env::var("TELEGRAM_BOT_TOKEN").is_err()
            || std::env::var("TELEGRAM_CHAT_ID").is_err())
    {
        warnings.push(
            "telegram is enabled but TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID is not set"
                .to_string(),
        );
    }
    warnings
}
