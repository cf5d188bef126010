//! Adjust S2S CLI
//!
//! Reports a single app event to Adjust from the command line.

mod config;
mod event_data;
mod shutdown;

use adjust_sdk::client::EventClient;
use clap::Parser;
use config::ConfigLoader;
use event_data::{parse_event_data, read_event_data, stamp_now};
use shutdown::shutdown_signal;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Adjust S2S - report app events server-to-server
#[derive(Parser, Debug)]
#[command(name = "adjust-cli")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env = "ADJUST_CONFIG", default_value = "./adjust-config.toml")]
    config: PathBuf,

    /// Event token from the Adjust dashboard
    event_token: String,

    /// Event data as a JSON object
    #[arg(short, long, conflicts_with = "data_file", required_unless_present = "data_file")]
    data: Option<String>,

    /// Read event data from a JSON file
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Set `created_at_unix` to the current time if the data lacks it
    #[arg(long, default_value = "false")]
    stamp_now: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let loaded_config = ConfigLoader::new(&args.config).load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::debug!(config = ?loaded_config.client, "Configuration loaded");

    let mut event_data = match (&args.data, &args.data_file) {
        (Some(json), _) => parse_event_data(json)?,
        (None, Some(path)) => read_event_data(path)?,
        (None, None) => anyhow::bail!("either --data or --data-file is required"),
    };
    if args.stamp_now {
        stamp_now(&mut event_data);
    }

    let client =
        EventClient::new(loaded_config.client)?.with_retry_policy(loaded_config.retry);

    let response = tokio::select! {
        result = client.send_event(&args.event_token, &event_data) => result.map_err(|e| {
            tracing::error!(error = %e, "Failed to send event");
            e
        })?,
        _ = shutdown_signal() => anyhow::bail!("event delivery cancelled"),
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
