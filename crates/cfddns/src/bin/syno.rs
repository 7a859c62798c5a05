// # cloudflareddns-syno
//
// Synology DSM custom DDNS provider entry point.
//
// DSM runs the configured command with `username password hostname ip` and
// shows whatever single status code it prints (`good`, `nochg`, `badauth`,
// ...). Logs go to stderr so stdout carries exactly that one line.
//
// Use `x` as the username when the password field holds an API token.
//
// ```text
// /usr/local/bin/cloudflareddns-syno __USERNAME__ __PASSWORD__ __HOSTNAME__ __MYIP__
// ```

use cfddns::{init_logging, run_update};
use cfddns_core::config::SYNO_TTL_SECS;
use cfddns_core::{Credentials, ProcessEnv, UpdateRequest, UpdateStatus, UpdaterConfig};
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::error;

/// Update DDNS in Cloudflare, for Synology
#[derive(Parser, Debug)]
#[command(name = "cloudflareddns-syno", version, about, long_about = None)]
struct Args {
    /// Cloudflare account email; "x" when using an API token
    email: String,

    /// Cloudflare API key or token
    key: String,

    /// Hostname to set the IP for
    hostname: String,

    /// The IP address
    ip: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("{:#}", e);
    }

    let status = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime.block_on(run(args)),
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            UpdateStatus::ServerError
        }
    };

    if let Err(e) = report(status, &mut io::stdout().lock()) {
        error!("Failed to write status: {}", e);
    }
    ExitCode::SUCCESS
}

/// Write the status as the one and only stdout line
fn report(status: UpdateStatus, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", status)?;
    out.flush()
}

async fn run(args: Args) -> UpdateStatus {
    let credentials =
        match Credentials::resolve(Some(&args.email), Some(&args.key), &ProcessEnv) {
            Ok(credentials) => credentials,
            Err(e) => {
                error!("{}", e);
                return UpdateStatus::from(&e);
            }
        };

    let request = match UpdateRequest::new(args.hostname, &args.ip) {
        Ok(request) => request.with_ttl(Some(SYNO_TTL_SECS)),
        Err(e) => {
            error!("{}", e);
            return UpdateStatus::from(&e);
        }
    };

    run_update(credentials, &request, None, UpdaterConfig::default()).await
}
