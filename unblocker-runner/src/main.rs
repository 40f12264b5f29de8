//! Unblocker Runner
//!
//! Submits one asynchronous web-unlocking job and waits for its result.
//!
//! Architecture:
//! - Configuration: command-line flags with environment fallbacks
//! - Client: HTTP communication with the unlocker API
//! - Services: progress reporting
//! - Scheduler: submission and the poll state machine
//!
//! The result is printed to stdout as JSON. Any failure is printed to stderr
//! and the process exits non-zero.

mod config;
mod error;
mod scheduler;
mod service;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use unblocker_client::{DEFAULT_API_URL, UnblockerClient};

use crate::config::{
    Config, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TARGET_URL, DEFAULT_ZONE,
};
use crate::scheduler::JobPoller;
use crate::service::{ConsoleProgress, NoopProgress, ProgressSink};

/// Log filter used when `RUST_LOG` is unset; only the final error line reaches stderr
const DEFAULT_LOG_FILTER: &str = "unblocker=error,unblocker_client=error";

#[derive(Parser)]
#[command(name = "unblocker")]
#[command(about = "Submit an asynchronous web-unlocker job and wait for its result", long_about = None)]
struct Cli {
    /// API key
    #[arg(long, env = "BRIGHT_DATA_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Unlocker zone
    #[arg(long, env = "BRIGHT_DATA_ZONE", default_value = DEFAULT_ZONE)]
    zone: String,

    /// Page to unlock
    #[arg(long, env = "BRIGHT_DATA_TARGET_URL", default_value = DEFAULT_TARGET_URL)]
    url: String,

    /// Unlocker API base URL
    #[arg(long, env = "BRIGHT_DATA_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Delay between polls, in milliseconds
    #[arg(long, env = "BRIGHT_DATA_POLL_INTERVAL_MS", default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    poll_interval_ms: u64,

    /// Number of polls before giving up
    #[arg(long, env = "BRIGHT_DATA_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Timeout of each network call, in milliseconds (default: three poll intervals)
    #[arg(long, env = "BRIGHT_DATA_REQUEST_TIMEOUT_MS")]
    request_timeout_ms: Option<u64>,

    /// Do not print progress lines
    #[arg(short, long)]
    quiet: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            api_key: cli.api_key,
            zone: cli.zone,
            target_url: cli.url,
            api_url: cli.api_url,
            poll_interval: Duration::from_millis(cli.poll_interval_ms),
            max_attempts: cli.max_attempts,
            request_timeout: cli.request_timeout_ms.map(Duration::from_millis),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; stdout is reserved for progress and the result
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let quiet = cli.quiet;

    match run(Config::from(cli), quiet).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "❌ Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config, quiet: bool) -> Result<()> {
    config.validate()?;
    info!("Loaded configuration: {:?}", config);

    let request = config.job_request()?;
    let poll_config = config.poll_config()?;

    // The poller enforces per-call deadlines; this only bounds a stuck connection
    let http_client = reqwest::Client::builder()
        .timeout(poll_config.request_timeout())
        .build()
        .context("Failed to build HTTP client")?;
    let client = Arc::new(UnblockerClient::with_client(&config.api_url, http_client));

    let progress: Arc<dyn ProgressSink> = if quiet {
        Arc::new(NoopProgress)
    } else {
        Arc::new(ConsoleProgress)
    };

    let cancel = CancellationToken::new();
    let _ctrl_c = spawn_ctrl_c_handler(cancel.clone());

    let poller = JobPoller::new(client, poll_config, progress, cancel);
    let result = poller.run(&request).await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&result).context("Failed to serialize result")?
    );

    Ok(())
}

/// Cancels the job on Ctrl-C
fn spawn_ctrl_c_handler(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Interrupt received, cancelling job");
                cancel.cancel();
            }
            Err(e) => warn!("Failed to listen for interrupt: {}", e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::{EnvFilter, Layer, Registry};

    #[test]
    fn test_default_log_filter_hides_warnings() {
        let filter = EnvFilter::new(DEFAULT_LOG_FILTER);
        assert_eq!(
            <EnvFilter as Layer<Registry>>::max_level_hint(&filter),
            Some(LevelFilter::ERROR)
        );
    }
}
