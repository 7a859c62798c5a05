// # DNS Provider Trait
//
// Defines the four provider API calls the updater needs: zone lookup,
// record lookup, record create and record replace.
//
// ## Implementations
//
// - Cloudflare: `cfddns-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use cfddns_core::DnsProvider;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     let zones = provider.find_zones("example.com").await?;
//     let records = provider
//         .list_records(&zones[0].id, "home.example.com", RecordType::A)
//         .await?;
//
//     Ok(())
// }
// ```

use crate::config::RecordType;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Result of a successful update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResult {
    /// An existing record was replaced
    Updated {
        /// Content the record held before
        previous: String,
        /// The new IP address
        new_ip: IpAddr,
    },
    /// Record already had the correct IP (no-op)
    Unchanged {
        /// The current IP address
        current_ip: IpAddr,
    },
    /// Record was created (didn't exist before)
    Created {
        /// The created IP address
        new_ip: IpAddr,
    },
}

/// A provider zone
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Zone {
    /// Opaque zone identifier
    pub id: String,
    /// Domain the zone covers
    pub name: String,
}

/// A DNS record as returned by the provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DnsRecord {
    /// Opaque record identifier
    pub id: String,
    /// Record name (hostname)
    pub name: String,
    /// Record type as sent by the provider ("A", "AAAA", "CNAME", ...)
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record content
    pub content: String,
    /// Time-to-live
    #[serde(default)]
    pub ttl: Option<u32>,
    /// Proxy flag
    #[serde(default)]
    pub proxied: Option<bool>,
}

impl DnsRecord {
    /// Whether the record content is `ip`
    ///
    /// Compares addresses, so differently written IPv6 literals match. Content
    /// that is not an address only matches its exact text.
    pub fn holds(&self, ip: &IpAddr) -> bool {
        match self.content.trim().parse::<IpAddr>() {
            Ok(current) => current == *ip,
            Err(_) => self.content == ip.to_string(),
        }
    }
}

/// Body of create and update calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordPayload {
    /// Record name
    pub name: String,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Address the record will hold
    pub content: String,
    /// TTL in seconds (omitted when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Proxy flag (omitted when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

/// Trait for DNS provider implementations
///
/// Each method is exactly one API call. Providers hold no state between
/// calls, do not retry and do not decide whether an update is needed; that
/// is the updater's job.
///
/// Errors must separate rejected credentials ([`Error::Authentication`])
/// from everything else ([`Error::Provider`]), since the two report
/// different status codes.
///
/// [`Error::Authentication`]: crate::Error::Authentication
/// [`Error::Provider`]: crate::Error::Provider
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Zones whose name is exactly `domain`
    async fn find_zones(&self, domain: &str) -> Result<Vec<Zone>, crate::Error>;

    /// Records in `zone_id` with exactly this name and type
    async fn list_records(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, crate::Error>;

    /// Create a record
    async fn create_record(
        &self,
        zone_id: &str,
        payload: &RecordPayload,
    ) -> Result<DnsRecord, crate::Error>;

    /// Replace an existing record, keeping its identifier
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<DnsRecord, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(content: &str) -> DnsRecord {
        DnsRecord {
            id: "rec".into(),
            name: "home.example.com".into(),
            record_type: "AAAA".into(),
            content: content.into(),
            ttl: None,
            proxied: None,
        }
    }

    #[test]
    fn test_holds_compares_addresses() {
        let ip: IpAddr = "2001:db8::1".parse().unwrap();
        assert!(record("2001:0db8:0:0:0:0:0:1").holds(&ip));
        assert!(!record("2001:db8::2").holds(&ip));
        assert!(!record("garbage").holds(&ip));
    }

    #[test]
    fn test_payload_omits_unset_fields() {
        let payload = RecordPayload {
            name: "home.example.com".into(),
            record_type: RecordType::A,
            content: "203.0.113.5".into(),
            ttl: None,
            proxied: None,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "name": "home.example.com",
                "type": "A",
                "content": "203.0.113.5"
            })
        );
    }

    #[test]
    fn test_record_deserializes_without_optional_fields() {
        let rec: DnsRecord = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "name": "home.example.com",
            "type": "A",
            "content": "203.0.113.5"
        }))
        .unwrap();
        assert_eq!(rec.ttl, None);
        assert_eq!(rec.proxied, None);
    }
}
