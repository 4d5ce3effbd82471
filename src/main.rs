use clap::Parser;

use stockscanner::adapter::inbound::cli::command::Cli;
use stockscanner::adapter::inbound::cli::output::{self, OutputConfig};
use stockscanner::adapter::inbound::cli::dispatch::{apply_color, dispatch};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    apply_color(&cli.color);
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    if let Err(e) = dispatch(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
