//! Failover JSON-RPC proxy.
//!
//! Accepts Ethereum JSON-RPC calls on `POST /` and forwards each one to a
//! randomly chosen upstream provider, moving on to another provider whenever
//! an attempt fails, until one succeeds or all have been tried.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │               FAILOVER PROXY                 │
//!  POST /             │  ┌────────┐   ┌────────────┐   ┌──────────┐  │
//!  ───────────────────┼─▶│  http  │──▶│  dispatch  │──▶│transport │──┼──▶ provider (random)
//!                     │  │handlers│   │ AttemptPool│   │ reqwest  │  │
//!  ◀──────────────────┼──│        │◀──│  ErrorLog  │◀──│          │◀─┼─── retry next on failure
//!  200 body / 400     │  └────────┘   └────────────┘   └──────────┘  │
//!  {"errors": [...]}  │                                              │
//!                     │  config · observability · lifecycle          │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use eth_failover_proxy::config::{load_config, ConfigOverrides};
use eth_failover_proxy::lifecycle::startup;
use eth_failover_proxy::observability::logging;

#[derive(Parser, Debug)]
#[command(name = "eth-failover-proxy")]
#[command(version, about = "Failover proxy for Ethereum JSON-RPC providers", long_about = None)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides BIND_ADDRESS
    #[arg(short, long)]
    bind: Option<String>,

    /// Comma-separated provider URLs, overrides RPC_PROVIDERS_HTTP
    #[arg(short, long)]
    providers: Option<String>,

    /// Per-attempt timeout in seconds, overrides TIMEOUT_SECONDS
    #[arg(short, long)]
    timeout_secs: Option<u64>,
}

impl From<&Cli> for ConfigOverrides {
    fn from(cli: &Cli) -> Self {
        Self {
            bind_address: cli.bind.clone(),
            providers: cli.providers.clone(),
            timeout_secs: cli.timeout_secs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is normal in containers.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref(), &ConfigOverrides::from(&cli)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("eth-failover-proxy: {}", e);
            std::process::exit(2);
        }
    };

    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        providers = config.upstream.providers.len(),
        timeout_secs = config.upstream.timeout_secs,
        "Started eth-failover-proxy"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
