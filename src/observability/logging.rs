//! Structured logging.
//!
//! `RUST_LOG` wins over the configured level. Stdout is pretty or JSON; an
//! optional log file always receives JSON lines.

use std::fs::{File, OpenOptions};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogFormat, ObservabilityConfig};

/// Filter directives for a plain level such as `info`.
pub fn default_directives(level: &str) -> String {
    format!("warn,eth_failover_proxy={level},tower_http={level}")
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn open_log_file(path: &str) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. Returns an error only when the log file
/// cannot be opened.
pub fn init_logging(config: &ObservabilityConfig) -> std::io::Result<()> {
    let stdout_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_target(false).boxed(),
    };

    let file_layer = match &config.log_file {
        Some(path) => {
            let file = Arc::new(open_log_file(path)?);
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(file)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(build_filter(&config.log_level))
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(())
}
