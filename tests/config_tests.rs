//! Config loading tests against files on disk.

use std::fs;
use std::time::Duration;

use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

use stockscanner::error::{ConfigError, Error};
use stockscanner::infrastructure::config::settings::Config;
use stockscanner::port::outbound::permission::Permission;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("stockscanner.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn shipped_template_is_valid() {
    let template = include_str!("../stockscanner.toml.example");
    let config = assert_ok!(Config::parse_toml(template));

    assert_eq!(config.api.page_limit, 1000);
    assert_eq!(config.filter.days, 30);
    assert_eq!(config.poll.interval_ms, 300_000);
    assert_eq!(config.notifications.permission, Permission::Default);
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[filter]
days = 7
exchange = "HKEX"

[poll]
interval_ms = 60000
"#,
    );

    let config = assert_ok!(Config::load(&path));

    assert_eq!(config.filter.days, 7);
    assert_eq!(config.filter.exchange, "HKEX");
    assert_eq!(config.api.page_limit, 1000);
    assert!(config.poll.enabled);
    assert_eq!(config.logging.format, "pretty");

    let orchestrator = config.orchestrator();
    assert_eq!(orchestrator.poll_interval, Duration::from_secs(60));
    assert_eq!(orchestrator.page_limit, 1000);

    let state = config.initial_state();
    assert_eq!(state.days, 7);
    assert_eq!(state.selected_exchange, "HKEX");
    assert!(!state.is_pagination_mode);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let config = assert_ok!(Config::load_or_default(&path));
    assert_eq!(config.filter.days, 30);
    assert!(config.poll.enabled);

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[api\nbase_url = ");

    let err = assert_err!(Config::load(&path));
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn page_limit_above_api_maximum_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[api]\npage_limit = 5000\n");

    let err = assert_err!(Config::load(&path));
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "page_limit",
            ..
        })
    ));
}

#[test]
fn zero_day_window_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[filter]\ndays = 0\n");

    let err = assert_err!(Config::load(&path));
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue { field: "days", .. })
    ));
}

#[test]
fn zero_poll_interval_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[poll]\ninterval_ms = 0\n");

    let err = assert_err!(Config::load(&path));
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "interval_ms",
            ..
        })
    ));
}

#[test]
fn unknown_log_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[logging]\nformat = \"xml\"\n");

    let err = assert_err!(Config::load(&path));
    assert!(err.to_string().contains("format"));
}

#[test]
fn permission_and_telegram_sections_parse() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[notifications]
permission = "denied"

[telegram]
enabled = true
notify_scans = true
"#,
    );

    let config = assert_ok!(Config::load(&path));
    assert_eq!(config.notifications.permission, Permission::Denied);
    assert!(config.telegram.enabled);
    assert!(config.telegram.notify_scans);
}
