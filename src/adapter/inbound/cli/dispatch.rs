//! Top-level command dispatch.

use std::path::Path;

use crate::adapter::inbound::cli::command::{
    CheckCommand, Cli, ColorChoice, Commands, ConfigCommand,
};
use crate::adapter::inbound::cli::{
    check, config, exchanges, listings, output, scan, stats, watch,
};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Apply the `--color` choice to every styled write.
pub fn apply_color(choice: &ColorChoice) {
    match choice {
        ColorChoice::Auto => owo_colors::unset_override(),
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
    }
}

/// Run the parsed command to completion.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Watch(args) => watch::execute(&args).await,
        Commands::Listings(args) => listings::execute(&args).await,
        Commands::Exchanges(args) => exchanges::execute(&args.config).await,
        Commands::Stats(args) => stats::execute(&args).await,
        Commands::Scan(args) => scan::execute(&args).await,
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args.config),
        Commands::Config(ConfigCommand::Validate(args)) => config::execute_validate(&args.config),
        Commands::Check(CheckCommand::Api(args)) => check::api::execute_api(&args.config).await,
        Commands::Check(CheckCommand::Telegram(args)) => {
            check::telegram::execute_telegram(&args.config).await
        }
    }
}

/// Load configuration for a one-shot command and start logging.
///
/// One-shot commands log warnings only unless `-v` raises the level.
#[allow(clippy::result_large_err)]
pub(crate) fn prepare(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path)?;
    let level = match output::verbosity() {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    config
        .logging
        .clone()
        .with_overrides(Some(level), false)
        .init();
    Ok(config)
}
