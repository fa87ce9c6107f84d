//! Command implementations for the DCA CLI.
//!
//! Provides subcommands for inspecting a production series and for running
//! a decline-curve forecast against the calculation service.

use clap::Subcommand;

pub mod config;
pub mod export;
pub mod forecast;
pub mod inspect;

#[derive(Subcommand)]
pub enum Command {
    /// Load a production CSV and print the series that would be plotted
    Inspect {
        /// Production CSV with 'Date' and 'FlowRate' columns
        #[arg(short = 'i', long)]
        input: String,
    },

    /// Pick two anchor points and forecast through the calculation service
    Forecast(forecast::ForecastArgs),
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Inspect { input } => inspect::run_inspect(&input).await,
        Command::Forecast(args) => forecast::run_forecast(args).await,
    }
}
