//! DCA CLI - Decline-curve analysis of production flow-rate data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "dca-cli",
    version,
    about = "Decline-curve analysis and production forecasting toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: dca_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("dca-cli {}", env!("CARGO_PKG_VERSION"));
    dca_cmd::run(cli.command).await
}
