//! Kaspa REST API balance lookups.
//!
//! API: `https://api.kaspa.org/addresses/{address}/balance`
//! Auth: None.
//! The address is placed in the path verbatim; validity is whatever the
//! API decides (HTTP 200 for a known-good address, 400 for bad format).

use async_trait::async_trait;
use reqwest::Client;
use std::error::Error as _;
use std::time::Duration;
use tracing::debug;

use super::{ApiResponse, BalanceApi};
use crate::config::ApiConfig;
use crate::types::CheckerError;

/// Kaspa REST API client.
pub struct KaspaRestClient {
    http: Client,
    base_url: String,
}

impl KaspaRestClient {
    /// Create a client with the configured timeout and user agent.
    pub fn new(cfg: &ApiConfig) -> Result<Self, CheckerError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .user_agent(cfg.user_agent.as_str())
            .build()
            .map_err(|e| CheckerError::Http(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(http, &cfg.base_url))
    }

    /// Wrap an already-built `reqwest::Client`.
    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn balance_url(&self, address: &str) -> String {
        format!("{}/addresses/{address}/balance", self.base_url)
    }
}

/// Render a reqwest error together with its causes, e.g.
/// "error sending request for url (...): operation timed out".
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    if err.is_timeout() && !message.contains("timed out") {
        message.push_str(" (timed out)");
    }
    message
}

#[async_trait]
impl BalanceApi for KaspaRestClient {
    async fn fetch_balance(&self, address: &str) -> Result<ApiResponse, CheckerError> {
        let url = self.balance_url(address);
        debug!(url = %url, "Fetching Kaspa balance");

        let network_error = |e: reqwest::Error| CheckerError::Network {
            address: address.to_string(),
            message: describe(&e),
        };

        let resp = self.http.get(&url).send().await.map_err(network_error)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(network_error)?;

        debug!(status, bytes = body.len(), "Kaspa balance response");
        Ok(ApiResponse { status, body })
    }

    fn base_url(&self) -> String {
        self.base_url.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
