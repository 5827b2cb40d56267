//! ofx-probe — guess the client settings an OFX server accepts.
//!
//! Entry point. Parses flags, initialises structured logging, runs the
//! prober, and maps its outcome to an exit code: 0 when a working
//! configuration was found, non-zero on exhaustion or a fatal error.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::error;

use ofx_probe::config::{Credentials, ProbeConfig};
use ofx_probe::ofx::HttpGateway;
use ofx_probe::prober::ConfigurationProber;
use ofx_probe::types::ProbeOutcome;

#[derive(Parser, Debug)]
#[command(
    name = "ofx-probe",
    about = "Attempt to guess client settings needed for a particular financial institution"
)]
struct Args {
    /// Financial institution's OFX server URL (see ofxhome.com if you don't know it)
    #[arg(long)]
    url: String,

    /// Your username at the financial institution
    #[arg(long)]
    username: String,

    /// Your password at the financial institution
    #[arg(long)]
    password: String,

    /// 'ORG' for your financial institution
    #[arg(long, default_value = "")]
    org: String,

    /// 'FID' for your financial institution
    #[arg(long, default_value = "")]
    fid: String,

    /// How long to wait between two subsequent requests, in milliseconds
    #[arg(long, default_value = "500")]
    delay: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if args.url.trim().is_empty() {
        anyhow::bail!("--url must not be empty");
    }

    init_logging();

    let config = ProbeConfig {
        server_url: args.url,
        credentials: Credentials {
            username: args.username,
            password: args.password,
            org: args.org,
            fid: args.fid,
        },
        delay: Duration::from_millis(args.delay),
    };

    let prober = ConfigurationProber::new(HttpGateway::new()?);

    match prober.detect(&config).await? {
        ProbeOutcome::Found(candidate) => {
            println!("The following settings were found to work:");
            println!("AppID: {}", candidate.app_id);
            println!("AppVer: {}", candidate.app_version);
            println!("OFX Version: {}", candidate.spec_version);
            println!("indent: {}", candidate.indent);
            Ok(())
        }
        ProbeOutcome::Exhausted { attempts } => {
            error!(attempts, "No working configuration found");
            eprintln!("No working configuration found after {attempts} attempts.");
            std::process::exit(1);
        }
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ofx_probe=info"));

    let json_logging = std::env::var("OFX_PROBE_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
