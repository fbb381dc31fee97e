//! HTTP client for the external address lookup service.

use std::net::IpAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Plain-text echo of the caller's public address
pub const DEFAULT_LOOKUP_URL: &str = "https://api.ipify.org";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the address-echo service.
#[derive(Clone)]
pub struct AddressClient {
    client: Client,
    lookup_url: String,
}

impl AddressClient {
    /// Create a new client for the given lookup URL
    pub fn new(lookup_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::from)?;

        Ok(Self {
            client,
            lookup_url: lookup_url.into(),
        })
    }

    pub fn lookup_url(&self) -> &str {
        &self.lookup_url
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Fetch the address this host is seen from on the public internet
    pub async fn fetch_external_address(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.lookup_url)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send GET request to {}", self.lookup_url))?;

        let response = Self::check_response(response).await?;

        let body = response
            .text()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to read response body from {}", self.lookup_url))?;

        let address = parse_address(&body)?;
        debug!(url = %self.lookup_url, address = %address, "Fetched external address");
        Ok(address)
    }
}

/// Validate a lookup response body as a bare IPv4 or IPv6 address.
fn parse_address(body: &str) -> Result<String, ApiError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidResponse("empty body".to_string()));
    }
    trimmed
        .parse::<IpAddr>()
        .map(|_| trimmed.to_string())
        .map_err(|_| ApiError::InvalidResponse(format!("not an IP address: {:?}", trimmed)))
}
