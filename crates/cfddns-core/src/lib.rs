// # cfddns-core
//
// Core library for the cfddns dynamic DNS updater.
//
// ## Architecture Overview
//
// One request, one linear workflow:
// - **Credentials**: resolve explicit arguments and environment variables
//   into a single credential for the provider client
// - **Zone Locator**: registrable domain → provider zone
// - **Record Matcher**: existing A/AAAA records → no-op, replace or create
// - **Record Mutator**: at most one create or replace call
// - **UpdateStatus**: every outcome as one dyndns2-style status code
//
// ## Design Principles
//
// 1. **Separation of Concerns**: the decision logic here never speaks HTTP;
//    providers and IP sources live in their own crates
// 2. **No hidden state**: nothing is cached, persisted or retried
// 3. **Library-First**: the command-line tools are thin wrappers

pub mod config;
pub mod credentials;
pub mod engine;
pub mod error;
pub mod status;
pub mod traits;
pub mod zone;

// Re-export core types for convenience
pub use config::{ProviderConfig, RecordType, UpdateRequest, UpdaterConfig};
pub use credentials::{Credentials, Environment, ProcessEnv};
pub use engine::{DdnsUpdater, RecordMatch};
pub use error::{Error, Result};
pub use status::UpdateStatus;
pub use traits::{DnsProvider, IpSource};
