// # cfddns command-line support
//
// Shared plumbing for the two binaries:
//
// - `cloudflareddns`: general-purpose CLI (flags, IP discovery, exit codes)
// - `cloudflareddns-syno`: Synology DSM custom-provider entry point
//   (positional arguments, status code on stdout)
//
// Both binaries are thin: all update logic lives in `cfddns-core`.

use anyhow::{Context, Result};
use cfddns_core::config::{DEFAULT_API_BASE, ProviderConfig};
use cfddns_core::{Credentials, DdnsUpdater, UpdateRequest, UpdateStatus, UpdaterConfig};
use cfddns_provider_cloudflare::CloudflareProvider;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Exit codes of the `cloudflareddns` binary
///
/// - 0: `good` or `nochg`
/// - 1: configuration or startup error (nothing was sent to the provider)
/// - 2: the update ran and ended in any other status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliExitCode {
    /// Record is (now) correct
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Update ended in a failure status
    UpdateFailed = 2,
}

impl From<UpdateStatus> for CliExitCode {
    fn from(status: UpdateStatus) -> Self {
        if status.is_success() {
            CliExitCode::Success
        } else {
            CliExitCode::UpdateFailed
        }
    }
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Install the global tracing subscriber
///
/// Everything goes to stderr. Non-verbose prints bare messages at `INFO`
/// and above; verbose adds `DEBUG` and the level prefix.
pub fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_level(verbose)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    tracing::debug!("Verbose output.");
    Ok(())
}

/// Fully-qualified name of the local machine, the default hostname to update
///
/// `gethostname` often returns a bare label (`nas`), so the name is
/// canonicalised through the resolver the way `getfqdn` does it.
pub fn local_hostname() -> Result<String> {
    let name = hostname::get().context("Failed to read local host name")?;
    let name = name
        .into_string()
        .map_err(|raw| anyhow::anyhow!("Local host name is not valid UTF-8: {:?}", raw))?;

    Ok(fully_qualified(name, canonical_name))
}

/// `name` if it is already qualified, else the canonical name `resolve`
/// returns for it, else `name` unchanged
pub fn fully_qualified(name: String, resolve: impl FnOnce(&str) -> Option<String>) -> String {
    if name.contains('.') {
        return name;
    }

    match resolve(&name) {
        Some(canonical) if canonical.trim_end_matches('.').contains('.') => {
            tracing::debug!("Local host name {} is {}", name, canonical);
            canonical
        }
        _ => {
            tracing::debug!("No fully-qualified name for {}, using it as is", name);
            name
        }
    }
}

/// Canonical name of `host` from `getaddrinfo` with `AI_CANONNAME`
#[cfg(unix)]
fn canonical_name(host: &str) -> Option<String> {
    let hints = dns_lookup::AddrInfoHints {
        flags: libc::AI_CANONNAME,
        ..Default::default()
    };

    let mut entries = dns_lookup::getaddrinfo(Some(host), None, Some(hints))
        .inspect_err(|e| tracing::debug!("Resolving {} failed: {:?}", host, e))
        .ok()?;

    entries.find_map(|entry| entry.ok().and_then(|entry| entry.canonname))
}

#[cfg(not(unix))]
fn canonical_name(_host: &str) -> Option<String> {
    None
}

/// Build an updater talking to the Cloudflare API
///
/// `api_base` overrides the public endpoint (used by tests).
pub fn cloudflare_updater(
    credentials: Credentials,
    api_base: Option<&str>,
    config: UpdaterConfig,
) -> cfddns_core::Result<DdnsUpdater> {
    let provider_config = ProviderConfig::new(credentials)
        .with_api_base(api_base.unwrap_or(DEFAULT_API_BASE));
    let provider = CloudflareProvider::new(provider_config)?;

    Ok(DdnsUpdater::new(Box::new(provider), config))
}

/// Run one update against Cloudflare and report its status
///
/// Failures to build the provider are reported through the status too
/// (an empty secret is `badauth`).
pub async fn run_update(
    credentials: Credentials,
    request: &UpdateRequest,
    api_base: Option<&str>,
    config: UpdaterConfig,
) -> UpdateStatus {
    match cloudflare_updater(credentials, api_base, config) {
        Ok(updater) => updater.update(request).await,
        Err(e) => {
            tracing::error!("{}", e);
            UpdateStatus::from(&e)
        }
    }
}
