// # cloudflareddns
//
// Point one Cloudflare address record at an IP, creating it if needed.
//
// This binary is a THIN integration layer: it parses arguments, resolves
// credentials, discovers the public IP when none is given, and hands one
// `UpdateRequest` to `cfddns-core`.
//
// ## Credentials
//
// `--email` / `--key` win over the environment. Without them, the first of
// these is used:
//
// - `CF_API_TOKEN` (API token)
// - `CF_API_EMAIL` / `CF_EMAIL` / `CLOUDFLARE_EMAIL` (account email)
// - `CF_API_KEY` / `CF_KEY` / `CLOUDFLARE_API_KEY` (global key or token)
//
// ## Example
//
// ```bash
// export CF_API_TOKEN=your_token
// cloudflareddns --hostname home.example.com
// cloudflareddns --hostname home.example.com --ip 203.0.113.5 --ttl 120
// ```

use anyhow::{Context, Result};
use cfddns::{CliExitCode, init_logging, local_hostname, run_update};
use cfddns_core::{Credentials, IpSource, ProcessEnv, UpdateRequest, UpdaterConfig};
use cfddns_ip_http::{DEFAULT_IP_URL, HttpIpSource};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info};

/// Update DDNS in Cloudflare
#[derive(Parser, Debug)]
#[command(name = "cloudflareddns", version, about, long_about = None)]
struct Args {
    /// Cloudflare account email (omit if using an API token)
    #[arg(long)]
    email: Option<String>,

    /// Cloudflare API key or token
    #[arg(long)]
    key: Option<String>,

    /// Hostname to set the IP for (default: this machine's fully-qualified name)
    #[arg(long)]
    hostname: Option<String>,

    /// The IP address (default: discovered public IP)
    #[arg(long)]
    ip: Option<String>,

    /// TTL in seconds
    #[arg(long)]
    ttl: Option<u32>,

    /// Proxy traffic through Cloudflare (true/false)
    #[arg(long, value_name = "BOOL")]
    proxied: Option<bool>,

    /// Report what would change without changing it
    #[arg(long)]
    dry_run: bool,

    /// "What is my IP" service used when --ip is not given
    #[arg(long, env = "CF_DDNS_IP_URL", default_value = DEFAULT_IP_URL)]
    ip_url: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("{:#}", e);
        return CliExitCode::ConfigError.into();
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CliExitCode::ConfigError.into();
        }
    };

    runtime.block_on(run(args)).into()
}

async fn run(args: Args) -> CliExitCode {
    let dry_run = args.dry_run;
    let (credentials, request) = match prepare(args).await {
        Ok(prepared) => prepared,
        Err(e) => {
            error!("{:#}", e);
            return CliExitCode::ConfigError;
        }
    };

    let status = run_update(credentials, &request, None, UpdaterConfig { dry_run }).await;
    info!("Status: {}", status);
    status.into()
}

/// Everything that has to succeed before the provider is contacted
async fn prepare(args: Args) -> Result<(Credentials, UpdateRequest)> {
    let credentials =
        Credentials::resolve(args.email.as_deref(), args.key.as_deref(), &ProcessEnv)?;
    match credentials.identity() {
        Some(email) => debug!("Authenticating as {} with a global API key", email),
        None => debug!("Authenticating with an API token"),
    }

    let hostname = match args.hostname {
        Some(hostname) => hostname,
        None => local_hostname()?,
    };

    let request = match args.ip {
        Some(ip) => UpdateRequest::new(hostname, &ip)?,
        None => {
            let source = HttpIpSource::new(args.ip_url)?;
            debug!("Discovering public IP via {}", source.url());
            let ip = source.current().await.with_context(|| {
                format!("Could not discover the public IP from {}; pass --ip", source.url())
            })?;
            UpdateRequest::for_ip(hostname, ip)
        }
    };

    Ok((credentials, request.with_ttl(args.ttl).with_proxied(args.proxied)))
}
