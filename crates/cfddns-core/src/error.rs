//! Error types for the updater
//!
//! This module defines all error types used throughout the crate. Every
//! variant maps onto exactly one [`UpdateStatus`](crate::status::UpdateStatus).

use thiserror::Error;

/// Result type alias for updater operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the updater
#[derive(Error, Debug)]
pub enum Error {
    /// Credentials were missing or rejected by the provider
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The hostname has no registrable domain (no public suffix + 1 label)
    #[error("No registrable domain for hostname: {0}")]
    UnresolvableDomain(String),

    /// The provider has no zone for the registrable domain
    #[error("Zone not found: {0}")]
    ZoneNotFound(String),

    /// The provider returned more than one zone for an exact-name query
    #[error("Ambiguous zone for {domain}: provider returned {count} zones")]
    AmbiguousZone {
        /// Registrable domain that was queried
        domain: String,
        /// Number of zones returned
        count: usize,
    },

    /// More than one address record of the requested type exists and none
    /// already holds the desired address
    #[error("Ambiguous records for {name}: {count} {record_type} records, none matching")]
    AmbiguousRecords {
        /// Hostname
        name: String,
        /// Record type queried
        record_type: String,
        /// Number of candidate records
        count: usize,
    },

    /// Invalid input (hostname or IP literal)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IP discovery errors
    #[error("IP source error: {0}")]
    IpSource(String),

    /// Provider-specific error (transport, API failure, malformed response)
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an IP source error
    pub fn ip_source(msg: impl Into<String>) -> Self {
        Self::IpSource(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Whether the provider rejected the credentials
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }
}
