// # HTTP IP Source
//
// This crate provides public-IP discovery over HTTP for the cfddns updater.
//
// ## Purpose
//
// Used only when no address is given on the command line. One `GET` to a
// "what is my IP" service that answers with the bare address as plain text
// (e.g. `https://ident.me`, `https://api.ipify.org`, `https://icanhazip.com`).
//
// ## Behaviour
//
// - One request per `current()` call: no polling, no caching, no failover
// - Surrounding whitespace is trimmed before parsing
// - Any failure (transport, non-2xx, unparseable body) is `Error::IpSource`

use async_trait::async_trait;
use cfddns_core::traits::IpSource;
use cfddns_core::{Error, Result};

use std::net::IpAddr;
use std::time::Duration;

/// Default discovery service
pub const DEFAULT_IP_URL: &str = "https://ident.me";

/// Request timeout for discovery
const TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-based IP source
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// URL to fetch the address from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a source querying `url`
    ///
    /// # Errors
    ///
    /// `Error::Config` if the URL is empty or the HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(Error::config("IP discovery URL cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { url, client })
    }

    /// URL this source queries
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<IpAddr> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::ip_source(format!("Request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ip_source(format!(
                "{} answered with HTTP {}",
                self.url, status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::ip_source(format!("Failed to read response: {}", e)))?;

        let text = body.trim();
        let ip: IpAddr = text
            .parse()
            .map_err(|_| Error::ip_source(format!("Invalid IP address from {}: {:?}", self.url, text)))?;

        tracing::debug!("Discovered public IP: {}", ip);
        Ok(ip)
    }
}
