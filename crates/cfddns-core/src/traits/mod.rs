//! Core traits for the updater
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`DnsProvider`]: Zone and record calls against a provider API
//! - [`IpSource`]: Public IP discovery

pub mod dns_provider;
pub mod ip_source;

pub use dns_provider::{DnsProvider, DnsRecord, RecordPayload, UpdateResult, Zone};
pub use ip_source::IpSource;
