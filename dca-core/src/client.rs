use log::{info, warn};
use reqwest::Client;
use std::time::Duration;

use crate::{
    error::RequestError,
    forecast::{ForecastRequest, ForecastResult},
    service::ForecastService,
};

/// Default location of the calculation service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Path of the calculation endpoint, relative to the base URL.
pub const CALCULATE_PATH: &str = "/calculate";

/// HTTP client for the decline-curve calculation service.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    /// Create a client with its own connection pool and request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RequestError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RequestError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, CALCULATE_PATH)
    }
}

impl ForecastService for ForecastClient {
    async fn calculate(&self, request: &ForecastRequest) -> Result<ForecastResult, RequestError> {
        let url = self.endpoint();
        info!(
            "POST {} ({} model, {} samples)",
            url,
            request.decline_type,
            request.original_q.len()
        );

        let response = match self.client.post(&url).json(request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request to {} failed: {}", url, e);
                return Err(RequestError::Transport(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Bad response status from {}: {}", url, status);
            return Err(RequestError::Status {
                status: status.as_u16(),
            });
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read response body from {}: {}", url, e);
                return Err(RequestError::Transport(e.to_string()));
            }
        };

        serde_json::from_str::<ForecastResult>(&body).map_err(|e| {
            warn!("Malformed response body from {}: {}", url, e);
            RequestError::MalformedBody(e.to_string())
        })
    }
}
