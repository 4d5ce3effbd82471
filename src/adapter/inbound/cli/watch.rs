//! Handler for the `watch` command.
//!
//! Mounts the orchestrator and renders every published state change as a
//! timestamped event line. Single-letter commands on stdin drive the same
//! actions a dashboard user would.

use std::time::Duration;

use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::adapter::inbound::cli::command::WatchArgs;
use crate::adapter::inbound::cli::filter::{describe_filter, initial_state};
use crate::adapter::inbound::cli::{output, render};
use crate::application::orchestrator::scan::ScanOutcome;
use crate::application::orchestrator::service::OrchestratorHandle;
use crate::application::state::{Action, AppState, Store};
use crate::domain::{DateRange, Exchange};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// How long the "new listings" banner stays open.
pub const BANNER_DURATION: Duration = Duration::from_secs(6);

const HELP: &str = "\
s            scan now
a            acknowledge new listings
d            dismiss the banner
t            toggle statistics
e [CODE]     select exchange (no code = all)
n DAYS       trailing day window
r FROM TO    date range (YYYY-MM-DD)
l            list current listings
c            clear the error
h            this help
q            quit";

/// One line typed on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCommand {
    Scan,
    Acknowledge,
    Dismiss,
    ToggleStatistics,
    /// Empty code selects all exchanges.
    Exchange(String),
    Days(u32),
    Range(DateRange),
    List,
    ClearError,
    Help,
    Quit,
}

impl WatchCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(key) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (key, args.as_slice()) {
            ("s", []) => Self::Scan,
            ("a", []) => Self::Acknowledge,
            ("d", []) => Self::Dismiss,
            ("t", []) => Self::ToggleStatistics,
            ("e", []) => Self::Exchange(String::new()),
            ("e", [code]) => Self::Exchange((*code).to_string()),
            ("n", [days]) => match days.parse::<u32>() {
                Ok(days) if days > 0 => Self::Days(days),
                _ => return Err(format!("invalid day window '{days}'")),
            },
            ("r", [from, to]) => {
                Self::Range(DateRange::parse(from, to).map_err(|e| e.to_string())?)
            }
            ("l", []) => Self::List,
            ("c", []) => Self::ClearError,
            ("h" | "?", []) => Self::Help,
            ("q", []) => Self::Quit,
            _ => return Err(format!("unknown command '{}' (h for help)", line.trim())),
        };
        Ok(Some(command))
    }
}

/// A user-visible difference between two published states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Filter(String),
    Exchanges(usize),
    Listings(usize),
    Statistics,
    StatisticsShown(bool),
    NewListings(usize),
    BannerClosed,
    Scanning(bool),
    Error(String),
    ErrorCleared,
}

/// Differences worth rendering between `prev` and `next`, in display order.
#[must_use]
pub fn changes(prev: &AppState, next: &AppState) -> Vec<Change> {
    let mut changes = Vec::new();

    if prev.listing_query() != next.listing_query() {
        changes.push(Change::Filter(describe_filter(next)));
    }
    if prev.exchanges != next.exchanges {
        changes.push(Change::Exchanges(next.exchanges.len()));
    }
    if prev.is_scanning != next.is_scanning {
        changes.push(Change::Scanning(next.is_scanning));
    }
    if prev.listings != next.listings {
        changes.push(Change::Listings(next.listings.len()));
    }
    if prev.show_statistics != next.show_statistics {
        changes.push(Change::StatisticsShown(next.show_statistics));
    }
    if next.show_statistics && next.statistics.is_some() && prev.statistics != next.statistics {
        changes.push(Change::Statistics);
    }
    if next.has_new_listings
        && (!prev.has_new_listings || prev.new_listings_count != next.new_listings_count)
    {
        changes.push(Change::NewListings(next.new_listings_count));
    }
    if prev.notification_open && !next.notification_open {
        changes.push(Change::BannerClosed);
    }
    if prev.error != next.error {
        changes.push(match &next.error {
            Some(message) => Change::Error(message.clone()),
            None => Change::ErrorCleared,
        });
    }

    changes
}

/// Whether the watch loop should clear a shown error: it was already on
/// screen and a listings load has since succeeded.
#[must_use]
pub fn should_clear_error(prev: &AppState, next: &AppState) -> bool {
    prev.error.is_some() && prev.error == next.error && prev.listings != next.listings
}

/// Execute the watch command.
pub async fn execute(args: &WatchArgs) -> Result<()> {
    let mut config = Config::load_or_default(&args.config.config)?;
    if args.no_poll {
        config.poll.enabled = false;
    }
    config
        .logging
        .clone()
        .with_overrides(args.log_level.as_deref(), args.json_logs)
        .init();

    let store = Store::new(initial_state(&config, &args.filter)?);
    print_startup(&config, &store.snapshot());

    let (orchestrator, deliveries) = bootstrap::build_orchestrator(&config, store);
    let handle = orchestrator.start();
    let result = run(&handle).await;
    handle.shutdown().await;
    deliveries.flush(bootstrap::DELIVERY_FLUSH_TIMEOUT).await;

    output::success("Stopped watching");
    result
}

fn print_startup(config: &Config, state: &AppState) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("API", &config.api.base_url);
    output::field("Filter", describe_filter(state));
    if config.poll.enabled {
        output::field(
            "Poll",
            format!("every {}s", config.poll.interval_ms / 1000),
        );
    } else {
        output::field("Poll", "disabled");
    }
    output::field("Notify", config.notifications.permission);
    output::hint("type h for commands, q to quit");
}

async fn run(handle: &OrchestratorHandle) -> Result<()> {
    let store = handle.store().clone();
    let mut rx = store.subscribe();
    let mut shown = rx.borrow_and_update().clone();

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut scans: JoinSet<ScanOutcome> = JoinSet::new();
    let mut banner_deadline: Option<Instant> = None;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let deadline = banner_deadline.unwrap_or_else(Instant::now);

        tokio::select! {
            _ = &mut ctrl_c => {
                debug!("Interrupted");
                return Ok(());
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let next = rx.borrow_and_update().clone();
                for change in changes(&shown, &next) {
                    if matches!(change, Change::NewListings(_)) {
                        banner_deadline = Some(Instant::now() + BANNER_DURATION);
                    }
                    if matches!(change, Change::BannerClosed) {
                        banner_deadline = None;
                    }
                    render_change(&change, &next);
                }
                if should_clear_error(&shown, &next) {
                    store.dispatch(Action::ClearError);
                }
                shown = next;
            }
            line = stdin.next_line(), if stdin_open => {
                match line? {
                    None => {
                        debug!("stdin closed, commands disabled");
                        stdin_open = false;
                    }
                    Some(line) => match WatchCommand::parse(&line) {
                        Ok(Some(WatchCommand::Quit)) => return Ok(()),
                        Ok(Some(command)) => apply(command, handle, &mut scans),
                        Ok(None) => {}
                        Err(message) => output::warning(&message),
                    },
                }
            }
            Some(joined) = scans.join_next(), if !scans.is_empty() => {
                match joined {
                    Ok(outcome) => report_scan(&outcome),
                    Err(e) => warn!(error = %e, "Scan task failed"),
                }
            }
            _ = tokio::time::sleep_until(deadline), if banner_deadline.is_some() => {
                banner_deadline = None;
                store.dispatch(Action::SetNotificationOpen(false));
            }
        }
    }
}

fn apply(command: WatchCommand, handle: &OrchestratorHandle, scans: &mut JoinSet<ScanOutcome>) {
    let store = handle.store();
    match command {
        WatchCommand::Scan => {
            let scanner = handle.scanner();
            scans.spawn(async move { scanner.scan().await });
        }
        WatchCommand::Acknowledge => store.dispatch(Action::AcknowledgeNewListings),
        WatchCommand::Dismiss => store.dispatch(Action::SetNotificationOpen(false)),
        WatchCommand::ToggleStatistics => store.dispatch(Action::ToggleStatistics),
        WatchCommand::Exchange(code) => {
            let known = store.with_state(|state| {
                code.is_empty()
                    || state.exchanges.is_empty()
                    || Exchange::find(&state.exchanges, &code).is_some()
            });
            if known {
                store.dispatch(Action::SetSelectedExchange(code));
            } else {
                output::warning(&format!("unknown exchange '{code}'"));
            }
        }
        WatchCommand::Days(days) => store.dispatch(Action::SetDays(days)),
        WatchCommand::Range(range) => store.dispatch(Action::SetDateRange {
            start: range.start(),
            end: range.end(),
        }),
        WatchCommand::List => {
            let listings = store.with_state(|state| state.listings.clone());
            render::print_listings(&listings, 20);
        }
        WatchCommand::ClearError => store.dispatch(Action::ClearError),
        WatchCommand::Help => output::lines(HELP),
        WatchCommand::Quit => {}
    }
}

fn render_change(change: &Change, state: &AppState) {
    let now = chrono::Local::now().format("%H:%M:%S").to_string();
    match change {
        Change::Filter(filter) => output::event(&now, "filter", filter),
        Change::Exchanges(count) => {
            output::event(&now, "exchanges", &format!("{count} loaded"))
        }
        Change::Listings(total) => output::event(
            &now,
            "listings",
            &format!("{total} for {}", describe_filter(state)),
        ),
        Change::Statistics => {
            if let Some(statistics) = &state.statistics {
                let peak = statistics
                    .peak_day()
                    .map(|day| format!(", peak {} ({})", day.date, day.count))
                    .unwrap_or_default();
                output::event(
                    &now,
                    "stats",
                    &format!(
                        "{} in last {} days, {} all time{peak}",
                        statistics.total, state.days, statistics.total_all_time
                    ),
                );
            }
        }
        Change::StatisticsShown(shown) => output::event(
            &now,
            "stats",
            if *shown { "shown" } else { "hidden" },
        ),
        Change::NewListings(count) => {
            let noun = if *count == 1 { "listing" } else { "listings" };
            output::event(
                &now,
                "new",
                &output::positive(format!("{count} new {noun} (a to acknowledge)")),
            );
        }
        Change::BannerClosed => output::event(&now, "new", &output::muted("banner closed")),
        Change::Scanning(true) => output::event(&now, "scan", "started"),
        Change::Scanning(false) => output::event(&now, "scan", "finished"),
        Change::Error(message) => output::warning(message),
        Change::ErrorCleared => output::event(&now, "error", &output::muted("cleared")),
    }
}

fn report_scan(outcome: &ScanOutcome) {
    match outcome {
        ScanOutcome::Completed {
            ack, new_listings, ..
        } => {
            if output::is_json() {
                output::json_output(json!({
                    "command": "watch.scan",
                    "message": ack.message,
                    "new_listings": new_listings,
                }));
            } else {
                output::note(&ack.message);
            }
        }
        ScanOutcome::AlreadyRunning => output::warning("scan already running"),
        ScanOutcome::Superseded { .. } => {
            output::note("scan results replaced by a newer filter")
        }
        ScanOutcome::ScrapeFailed | ScanOutcome::RefetchFailed { .. } => {}
    }
}
