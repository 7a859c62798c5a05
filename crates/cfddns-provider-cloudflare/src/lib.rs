// # Cloudflare DNS Provider
//
// This crate provides the Cloudflare implementation of `DnsProvider` for the
// cfddns updater.
//
// ## Implementation Status
//
// - ✅ One HTTP request per trait call
// - ✅ API token (bearer) and global key (X-Auth-Email / X-Auth-Key) auth
// - ✅ HTTP timeout configured (30 seconds by default)
// - ✅ Authentication failures reported separately from everything else
// - ✅ Both A and AAAA record support
// - ❌ NO retry logic (a failed call is a final status)
// - ❌ NO caching (zones are looked up on every request)
//
// ## Security Requirements
//
// - API key / token NEVER appears in logs or Debug output
// - Construction fails if the secret is empty
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List Zones: GET `/zones?name=...`
// - List DNS Records: GET `/zones/:zone_id/dns_records?name=...&type=...&match=all`
// - Create DNS Record: POST `/zones/:zone_id/dns_records`
// - Overwrite DNS Record: PUT `/zones/:zone_id/dns_records/:record_id`

mod types;

use async_trait::async_trait;
use cfddns_core::config::{ProviderConfig, RecordType};
use cfddns_core::traits::{DnsProvider, DnsRecord, RecordPayload, Zone};
use cfddns_core::{Credentials, Error, Result};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use types::CloudflareResponse;

const PROVIDER: &str = "cloudflare";

/// API error codes that mean the credentials were rejected
///
/// - 6003: Invalid request headers
/// - 6103: Invalid format for X-Auth-Key header
/// - 6111: Invalid format for Authorization header
/// - 9103: Unknown X-Auth-Key or X-Auth-Email
/// - 9109: Invalid access token
/// - 10000: Authentication error
/// - 10001: Unable to authenticate request
const AUTH_ERROR_CODES: &[i64] = &[6003, 6103, 6111, 9103, 9109, 10000, 10001];

/// Cloudflare DNS provider
///
/// Stateless: every method is one API call, and nothing is kept between
/// calls except the HTTP client.
pub struct CloudflareProvider {
    /// API credentials
    /// ⚠️ NEVER log this value
    credentials: Credentials,

    /// API base URL, without trailing slash
    api_base: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Credentials' own Debug already redacts the secret
impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("credentials", &self.credentials)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider
    ///
    /// # Errors
    ///
    /// - `Error::Authentication` if the key or token is empty
    /// - `Error::Config` if the configuration is invalid or the HTTP client
    ///   cannot be built
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            credentials: config.credentials,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Attach the credential headers
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Credentials::ApiToken(token) => request.bearer_auth(token),
            Credentials::GlobalKey { email, key } => request
                .header("X-Auth-Email", email)
                .header("X-Auth-Key", key),
        }
    }

    /// Send one request and unwrap the Cloudflare envelope
    ///
    /// `operation` names the call in error messages (e.g. "Zone lookup").
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, operation: &str) -> Result<T> {
        let response = self
            .authorize(request)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| Error::provider(PROVIDER, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            Error::provider(PROVIDER, format!("Failed to read response: {}", e))
        })?;

        let envelope = serde_json::from_str::<CloudflareResponse<T>>(&body);

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            let detail = envelope
                .as_ref()
                .map(|env| env.error_summary())
                .unwrap_or_else(|_| body.clone());
            return Err(Error::auth(format!(
                "{}: invalid credentials or insufficient permissions. Status: {} ({})",
                operation, status, detail
            )));
        }

        let envelope = match envelope {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(Error::provider(
                    PROVIDER,
                    format!("{}: failed to parse response: {}", operation, e),
                ));
            }
            Err(_) => return Err(status_error(operation, status, &body)),
        };

        if envelope
            .errors
            .iter()
            .any(|e| AUTH_ERROR_CODES.contains(&e.code))
        {
            return Err(Error::auth(format!(
                "{}: {}",
                operation,
                envelope.error_summary()
            )));
        }

        if !status.is_success() {
            return Err(status_error(operation, status, &envelope.error_summary()));
        }

        if !envelope.success {
            return Err(Error::provider(
                PROVIDER,
                format!("{} failed: {}", operation, envelope.error_summary()),
            ));
        }

        envelope.result.ok_or_else(|| {
            Error::provider(
                PROVIDER,
                format!("{}: invalid response format: result is missing", operation),
            )
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

/// Non-auth HTTP failure
fn status_error(operation: &str, status: StatusCode, detail: &str) -> Error {
    let message = match status.as_u16() {
        429 => format!("Rate limit exceeded. Status: {}", status),
        500..=599 => format!("Cloudflare server error: {} - {}", status, detail),
        _ => format!("{} failed: {} - {}", operation, status, detail),
    };
    Error::provider(PROVIDER, message)
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    /// # API Call
    ///
    /// ```http
    /// GET /zones?name=example.com
    /// ```
    async fn find_zones(&self, domain: &str) -> Result<Vec<Zone>> {
        tracing::debug!("Looking up zone for domain: {}", domain);

        let request = self.client.get(self.url("/zones")).query(&[("name", domain)]);
        let zones: Vec<Zone> = self.send(request, "Zone lookup").await?;

        tracing::debug!("Zone lookup for {} returned {} zone(s)", domain, zones.len());
        Ok(zones)
    }

    /// # API Call
    ///
    /// ```http
    /// GET /zones/:zone_id/dns_records?name=home.example.com&type=A&match=all
    /// ```
    async fn list_records(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>> {
        tracing::debug!("Looking up records: {} (type: {})", name, record_type);

        let request = self
            .client
            .get(self.url(&format!("/zones/{}/dns_records", zone_id)))
            .query(&[
                ("name", name),
                ("type", record_type.as_str()),
                ("match", "all"),
            ]);

        self.send(request, "Record lookup").await
    }

    /// # API Call
    ///
    /// ```http
    /// POST /zones/:zone_id/dns_records
    /// { "name": "...", "type": "A", "content": "1.2.3.4", "ttl": 120 }
    /// ```
    async fn create_record(&self, zone_id: &str, payload: &RecordPayload) -> Result<DnsRecord> {
        let request = self
            .client
            .post(self.url(&format!("/zones/{}/dns_records", zone_id)))
            .json(payload);

        let record: DnsRecord = self.send(request, "Record create").await?;
        tracing::debug!("Created record ID: {}", record.id);
        Ok(record)
    }

    /// # API Call
    ///
    /// ```http
    /// PUT /zones/:zone_id/dns_records/:record_id
    /// { "name": "...", "type": "A", "content": "1.2.3.4" }
    /// ```
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<DnsRecord> {
        let request = self
            .client
            .put(self.url(&format!("/zones/{}/dns_records/{}", zone_id, record_id)))
            .json(payload);

        self.send(request, "Record update").await
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
