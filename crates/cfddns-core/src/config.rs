//! Configuration and request types for the updater
//!
//! This module defines the request-scoped values handed to the updater and
//! the settings used to build a provider client.

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::zone::normalize_hostname;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

/// Cloudflare API base URL
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for provider API requests
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// TTL used by the NAS entry point
pub const SYNO_TTL_SECS: u32 = 120;

/// DNS address record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// A record (IPv4)
    A,
    /// AAAA record (IPv6)
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl RecordType {
    /// Address family of an IP: IPv6 literals (the ones with a `:`) are AAAA
    pub fn for_ip(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => RecordType::A,
            IpAddr::V6(_) => RecordType::Aaaa,
        }
    }

    /// Parse the type field of a provider record; `None` for non-address types
    pub fn from_api(value: &str) -> Option<Self> {
        match value {
            "A" => Some(RecordType::A),
            "AAAA" => Some(RecordType::Aaaa),
            _ => None,
        }
    }

    /// Wire name of the record type
    pub const fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One desired-state request: make `hostname` resolve to `desired_ip`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Fully-qualified hostname (e.g. "home.example.com")
    pub hostname: String,

    /// Address the record should hold
    pub desired_ip: IpAddr,

    /// TTL in seconds; left to the provider default when unset
    pub ttl: Option<u32>,

    /// Proxy flag; left to the provider default when unset
    pub proxied: Option<bool>,
}

impl UpdateRequest {
    /// Build a request from a hostname and an IP literal
    ///
    /// The literal is trimmed, since discovery services usually append a
    /// newline.
    pub fn new(hostname: impl Into<String>, ip: &str) -> Result<Self> {
        let ip = ip.trim();
        let desired_ip: IpAddr = ip
            .parse()
            .map_err(|_| Error::invalid_input(format!("not an IP address: {:?}", ip)))?;

        Ok(Self::for_ip(hostname, desired_ip))
    }

    /// Build a request from an already parsed address
    ///
    /// The hostname is stored in its [`normalize_hostname`] form, and every
    /// stage uses it as stored.
    pub fn for_ip(hostname: impl Into<String>, desired_ip: IpAddr) -> Self {
        Self {
            hostname: normalize_hostname(&hostname.into()),
            desired_ip,
            ttl: None,
            proxied: None,
        }
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: Option<u32>) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the proxy flag
    pub fn with_proxied(mut self, proxied: Option<bool>) -> Self {
        self.proxied = proxied;
        self
    }

    /// Record type matching the desired address family
    pub fn record_type(&self) -> RecordType {
        RecordType::for_ip(&self.desired_ip)
    }
}

/// Provider client settings
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Resolved credentials
    pub credentials: Credentials,

    /// API base URL (overridable for tests)
    pub api_base: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Settings for the public Cloudflare API
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    /// Point the client at another API base
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base.is_empty() {
            return Err(Error::config("API base URL cannot be empty"));
        }
        if self.timeout.is_zero() {
            return Err(Error::config("Provider timeout must be > 0"));
        }
        self.credentials.validate()
    }
}

/// Updater settings
#[derive(Debug, Clone, Default)]
pub struct UpdaterConfig {
    /// Run lookups but only log the mutation that would be made
    pub dry_run: bool,
}
