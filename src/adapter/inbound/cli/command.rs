//! Command-line interface definitions.
//!
//! Defines the CLI structure for the stockscanner application using `clap`.
//! The CLI supports subcommands for watching new listings interactively,
//! one-shot queries against the API, configuration management, and
//! diagnostic checks.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::DateRange;
use crate::error::Result;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG: &str = "stockscanner.toml";

/// Watch stock exchanges for new listings
#[derive(Parser, Debug)]
#[command(name = "stockscanner")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the stockscanner CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch for new listings (foreground, interactive)
    Watch(WatchArgs),

    /// List recent listings
    Listings(ListingsArgs),

    /// List known exchanges
    Exchanges(ConfigPathArg),

    /// Show listing statistics
    Stats(StatsArgs),

    /// Ask the scraper to scan now and report new listings
    Scan(ScanArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `stockscanner config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Subcommands for `stockscanner check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Test connectivity to the stock-scanner API.
    Api(ConfigPathArg),
    /// Test Telegram notification delivery.
    Telegram(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Listing filter shared by `watch` and `listings`.
///
/// A trailing day window and an explicit date range are mutually exclusive.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Trailing day window (overrides the configured default).
    #[arg(long, conflicts_with_all = ["from", "to"], value_parser = clap::value_parser!(u32).range(1..))]
    pub days: Option<u32>,

    /// Start of a date range (YYYY-MM-DD).
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// End of a date range (YYYY-MM-DD).
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// Exchange code (e.g. NASDAQ); all exchanges when omitted.
    #[arg(short, long)]
    pub exchange: Option<String>,
}

impl FilterArgs {
    /// Parsed date range, if one was given.
    pub fn range(&self) -> Result<Option<DateRange>> {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => DateRange::parse(from, to).map(Some),
            _ => Ok(None),
        }
    }
}

/// Arguments for the `watch` subcommand.
#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Disable the background poll.
    #[arg(long)]
    pub no_poll: bool,

    /// Override log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for the `listings` subcommand.
#[derive(Args, Debug)]
pub struct ListingsArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Maximum rows to print.
    #[arg(long, default_value = "50")]
    pub rows: usize,
}

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Trailing day window (overrides the configured default).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: Option<u32>,
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Exchange code to scan; all exchanges when omitted.
    #[arg(short, long)]
    pub exchange: Option<String>,
}

/// Arguments for the `config init` subcommand.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value = DEFAULT_CONFIG)]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}
