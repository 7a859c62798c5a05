//! Core update workflow
//!
//! The [`DdnsUpdater`] drives one request through four stages:
//!
//! ```text
//!  UpdateRequest
//!       │
//!       ▼
//! ┌──────────────┐  nohost / notfqdn / badauth / 911
//! │ Zone Locator │──────────────────────────────────┐
//! └──────────────┘                                  │
//!       │ zone id                                   │
//!       ▼                                           │
//! ┌──────────────┐  nochg                           │
//! │Record Matcher│──────────────────────────────┐   │
//! └──────────────┘                              │   │
//!       │ stale record / no record              │   │
//!       ▼                                       │   │
//! ┌──────────────┐  good / 911                  │   │
//! │Record Mutator│──────────────────────────┐   │   │
//! └──────────────┘                          ▼   ▼   ▼
//!                                      ┌──────────────┐
//!                                      │Status Report │
//!                                      └──────────────┘
//! ```
//!
//! ## Call budget
//!
//! At most three provider calls per request, strictly in order: one zone
//! lookup, one record lookup, at most one create or replace. Nothing is
//! retried and nothing is cached between requests.

use crate::config::{RecordType, UpdateRequest, UpdaterConfig};
use crate::error::{Error, Result};
use crate::status::UpdateStatus;
use crate::traits::{DnsProvider, DnsRecord, RecordPayload, UpdateResult, Zone};
use crate::zone::registrable_domain;
use tracing::{debug, error, info, warn};

/// What the matcher found for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordMatch {
    /// A record already holds the desired address
    Unchanged(DnsRecord),
    /// Exactly one record of the right type holds another address
    Stale(DnsRecord),
    /// No record of the right type exists
    Missing,
}

/// One-shot dynamic DNS updater
///
/// Owns a provider client and turns an [`UpdateRequest`] into exactly one
/// [`UpdateStatus`].
pub struct DdnsUpdater {
    /// DNS provider for zone and record calls
    provider: Box<dyn DnsProvider>,

    /// Skip the mutation call, only log it
    dry_run: bool,
}

impl DdnsUpdater {
    /// Create a new updater
    ///
    /// # Parameters
    ///
    /// - `provider`: DNS provider implementation
    /// - `config`: updater settings
    pub fn new(provider: Box<dyn DnsProvider>, config: UpdaterConfig) -> Self {
        if config.dry_run {
            warn!(
                "{} updater running in DRY-RUN mode - no changes will be made",
                provider.provider_name()
            );
        }

        Self {
            provider,
            dry_run: config.dry_run,
        }
    }

    /// Create or update the record and report the status code
    pub async fn update(&self, request: &UpdateRequest) -> UpdateStatus {
        debug!("Updating {} to {}", request.hostname, request.desired_ip);

        match self.apply(request).await {
            Ok(result) => UpdateStatus::from(&result),
            Err(e) => {
                debug!("Update of {} failed: {:?}", request.hostname, e);
                UpdateStatus::from(&e)
            }
        }
    }

    /// Boolean form of [`update`](Self::update): `good` and `nochg` are success
    pub async fn update_record(&self, request: &UpdateRequest) -> bool {
        self.update(request).await.is_success()
    }

    /// Run the full workflow, returning the typed outcome
    pub async fn apply(&self, request: &UpdateRequest) -> Result<UpdateResult> {
        let zone = self.locate_zone(&request.hostname).await?;
        let found = self.match_record(&zone.id, request).await?;
        self.mutate(&zone.id, request, found).await
    }

    /// Find the single zone owning `hostname`
    ///
    /// Fails with [`Error::UnresolvableDomain`] before any provider call when
    /// the hostname has no registrable domain.
    pub async fn locate_zone(&self, hostname: &str) -> Result<Zone> {
        let domain = registrable_domain(hostname)?;
        debug!("Zone domain of hostname is {}", domain);

        let mut zones = self
            .provider
            .find_zones(&domain)
            .await
            .inspect_err(|e| error!("/zones.get - {} - api call failed: {}", domain, e))?;

        match zones.len() {
            0 => {
                error!("No zone found for {}", domain);
                Err(Error::ZoneNotFound(domain))
            }
            1 => {
                let zone = zones.remove(0);
                debug!("Zone ID is {}", zone.id);
                Ok(zone)
            }
            count => {
                error!("/zones.get - {} - api call returned {} items", domain, count);
                Err(Error::AmbiguousZone { domain, count })
            }
        }
    }

    /// Decide between no-op, replace and create
    ///
    /// Any record already holding the desired address wins. Otherwise a single
    /// record of the right type is stale and gets replaced. Several stale
    /// records are an error: replacing one would leave the others behind.
    pub async fn match_record(&self, zone_id: &str, request: &UpdateRequest) -> Result<RecordMatch> {
        let record_type = request.record_type();

        let records = self
            .provider
            .list_records(zone_id, &request.hostname, record_type)
            .await
            .inspect_err(|e| {
                error!("/zones/dns_records {} - api call failed: {}", request.hostname, e)
            })?;

        let mut candidates = Vec::new();
        for record in records {
            match RecordType::from_api(&record.record_type) {
                None => continue,
                Some(found) if found != record_type => {
                    debug!(
                        "IGNORED: {} {} ; wrong address family",
                        request.hostname, record.content
                    );
                    continue;
                }
                Some(_) => {}
            }

            if record.holds(&request.desired_ip) {
                info!("UNCHANGED: {} == {}", request.hostname, request.desired_ip);
                return Ok(RecordMatch::Unchanged(record));
            }

            candidates.push(record);
        }

        match candidates.len() {
            0 => Ok(RecordMatch::Missing),
            1 => Ok(RecordMatch::Stale(candidates.remove(0))),
            count => {
                error!(
                    "{} has {} {} records and none holds {}; refusing to pick one",
                    request.hostname, count, record_type, request.desired_ip
                );
                Err(Error::AmbiguousRecords {
                    name: request.hostname.clone(),
                    record_type: record_type.to_string(),
                    count,
                })
            }
        }
    }

    /// Apply the matcher's decision with at most one provider call
    pub async fn mutate(
        &self,
        zone_id: &str,
        request: &UpdateRequest,
        found: RecordMatch,
    ) -> Result<UpdateResult> {
        let payload = RecordPayload {
            name: request.hostname.clone(),
            record_type: request.record_type(),
            content: request.desired_ip.to_string(),
            ttl: request.ttl,
            proxied: request.proxied,
        };

        match found {
            RecordMatch::Unchanged(_) => Ok(UpdateResult::Unchanged {
                current_ip: request.desired_ip,
            }),
            RecordMatch::Stale(record) => {
                if self.dry_run {
                    info!(
                        "[DRY-RUN] Would replace record {} with payload: {}",
                        record.id,
                        serde_json::to_string(&payload)?
                    );
                } else {
                    self.provider
                        .update_record(zone_id, &record.id, &payload)
                        .await
                        .inspect_err(|e| {
                            error!(
                                "/zones.dns_records.put {} - api call failed: {}",
                                request.hostname, e
                            )
                        })?;
                }

                info!(
                    "UPDATED: {} {} -> {}",
                    request.hostname, record.content, request.desired_ip
                );
                Ok(UpdateResult::Updated {
                    previous: record.content,
                    new_ip: request.desired_ip,
                })
            }
            RecordMatch::Missing => {
                if self.dry_run {
                    info!(
                        "[DRY-RUN] Would create record with payload: {}",
                        serde_json::to_string(&payload)?
                    );
                } else {
                    self.provider
                        .create_record(zone_id, &payload)
                        .await
                        .inspect_err(|e| {
                            error!(
                                "/zones.dns_records.post {} - api call failed: {}",
                                request.hostname, e
                            )
                        })?;
                }

                info!("CREATED: {} {}", request.hostname, request.desired_ip);
                Ok(UpdateResult::Created {
                    new_ip: request.desired_ip,
                })
            }
        }
    }
}
