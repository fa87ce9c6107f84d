//! Calculation service configuration shared by subcommands.

use clap::Args;
use dca_core::client::{ForecastClient, DEFAULT_BASE_URL};
use std::time::Duration;

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Base URL of the decline-curve calculation service
    #[arg(long = "api-base", env = "DCA_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub api_base: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn client(&self) -> anyhow::Result<ForecastClient> {
        Ok(ForecastClient::new(&self.api_base, self.timeout())?)
    }
}
