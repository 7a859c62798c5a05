//! Test doubles and common utilities for updater contract tests
//!
//! This module provides an in-memory provider that behaves like the real
//! API closely enough to drive the updater, while counting every call.

#![allow(dead_code)]

use cfddns_core::config::RecordType;
use cfddns_core::error::{Error, Result};
use cfddns_core::traits::{DnsProvider, DnsRecord, RecordPayload, Zone};
use cfddns_core::{DdnsUpdater, UpdaterConfig};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Provider calls the updater can make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    FindZones,
    ListRecords,
    Create,
    Update,
}

/// Failure to inject for a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Provider rejects the credentials
    Auth,
    /// Anything else (network, 5xx, malformed JSON)
    Transport,
}

/// An in-memory provider that tracks calls
#[derive(Clone)]
pub struct MockDnsProvider {
    /// Zones returned by every zone lookup
    zones: Arc<Mutex<Vec<Zone>>>,
    /// Records across all zones, keyed by zone id
    records: Arc<Mutex<HashMap<String, Vec<DnsRecord>>>>,
    /// Return every record of the zone regardless of name and type
    ignore_filters: bool,
    /// Injected failures
    failures: Arc<Mutex<HashMap<Call, Failure>>>,
    /// Call log, in order
    calls: Arc<Mutex<Vec<Call>>>,
    /// Payloads sent to create and update
    payloads: Arc<Mutex<Vec<RecordPayload>>>,
    /// Domains passed to zone lookups
    zone_queries: Arc<Mutex<Vec<String>>>,
    next_id: Arc<AtomicUsize>,
}

impl MockDnsProvider {
    /// Provider owning a single zone `example.com` with id `zone-1`
    pub fn new() -> Self {
        Self::with_zones(vec![zone("zone-1", "example.com")])
    }

    /// Provider returning exactly these zones from every lookup
    pub fn with_zones(zones: Vec<Zone>) -> Self {
        Self {
            zones: Arc::new(Mutex::new(zones)),
            records: Arc::new(Mutex::new(HashMap::new())),
            ignore_filters: false,
            failures: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            payloads: Arc::new(Mutex::new(Vec::new())),
            zone_queries: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicUsize::new(1)),
        }
    }

    /// Return all records of a zone from record lookups, like a provider
    /// that ignores its query filters
    pub fn ignoring_filters(mut self) -> Self {
        self.ignore_filters = true;
        self
    }

    /// Seed a record into `zone-1`
    pub fn with_record(self, name: &str, record_type: &str, content: &str) -> Self {
        let id = format!("rec-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.records
            .lock()
            .unwrap()
            .entry("zone-1".to_string())
            .or_default()
            .push(DnsRecord {
                id,
                name: name.to_string(),
                record_type: record_type.to_string(),
                content: content.to_string(),
                ttl: Some(1),
                proxied: Some(false),
            });
        self
    }

    /// Make `call` fail
    pub fn failing(self, call: Call, failure: Failure) -> Self {
        self.failures.lock().unwrap().insert(call, failure);
        self
    }

    /// Number of times `call` was made
    pub fn call_count(&self, call: Call) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == call).count()
    }

    /// Total number of provider calls
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Create and update calls made
    pub fn mutation_count(&self) -> usize {
        self.call_count(Call::Create) + self.call_count(Call::Update)
    }

    /// Payloads sent to create and update, in order
    pub fn payloads(&self) -> Vec<RecordPayload> {
        self.payloads.lock().unwrap().clone()
    }

    /// Domains passed to zone lookups, in order
    pub fn zone_queries(&self) -> Vec<String> {
        self.zone_queries.lock().unwrap().clone()
    }

    /// Current records of `zone-1`
    pub fn records(&self) -> Vec<DnsRecord> {
        self.records
            .lock()
            .unwrap()
            .get("zone-1")
            .cloned()
            .unwrap_or_default()
    }

    fn enter(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(&call) {
            Some(Failure::Auth) => Err(Error::auth("Invalid API token")),
            Some(Failure::Transport) => Err(Error::provider("mock", "connection reset")),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn find_zones(&self, domain: &str) -> Result<Vec<Zone>> {
        self.enter(Call::FindZones)?;
        self.zone_queries.lock().unwrap().push(domain.to_string());
        Ok(self.zones.lock().unwrap().clone())
    }

    async fn list_records(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>> {
        self.enter(Call::ListRecords)?;
        let records = self.records.lock().unwrap();
        let zone_records = records.get(zone_id).cloned().unwrap_or_default();

        if self.ignore_filters {
            return Ok(zone_records);
        }

        Ok(zone_records
            .into_iter()
            .filter(|r| r.name == name && r.record_type == record_type.as_str())
            .collect())
    }

    async fn create_record(&self, zone_id: &str, payload: &RecordPayload) -> Result<DnsRecord> {
        self.enter(Call::Create)?;
        self.payloads.lock().unwrap().push(payload.clone());

        let record = DnsRecord {
            id: format!("rec-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
            name: payload.name.clone(),
            record_type: payload.record_type.to_string(),
            content: payload.content.clone(),
            ttl: payload.ttl,
            proxied: payload.proxied,
        };
        self.records
            .lock()
            .unwrap()
            .entry(zone_id.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<DnsRecord> {
        self.enter(Call::Update)?;
        self.payloads.lock().unwrap().push(payload.clone());

        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(zone_id)
            .and_then(|rs| rs.iter_mut().find(|r| r.id == record_id))
            .ok_or_else(|| Error::provider("mock", format!("no record {}", record_id)))?;

        record.name = payload.name.clone();
        record.record_type = payload.record_type.to_string();
        record.content = payload.content.clone();
        record.ttl = payload.ttl;
        record.proxied = payload.proxied;
        Ok(record.clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Build a zone
pub fn zone(id: &str, name: &str) -> Zone {
    Zone {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Updater in live mode over a clone of `provider`
pub fn updater(provider: &MockDnsProvider) -> DdnsUpdater {
    DdnsUpdater::new(Box::new(provider.clone()), UpdaterConfig::default())
}
