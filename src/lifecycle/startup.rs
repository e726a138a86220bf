//! Startup orchestration.
//!
//! Order: metrics exporter, dispatcher, listener, then traffic. Any failure
//! before the listener is bound aborts startup.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ProxyConfig;
use crate::dispatch::SetupError;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid address '{0}'")]
    Address(String),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Run the proxy until SIGINT/SIGTERM.
pub async fn run(config: ProxyConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::Address(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(StartupError::Bind)?;
    let local_addr = listener.local_addr().map_err(StartupError::Bind)?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        signals::wait_for_termination().await;
        shutdown.trigger();
    });

    server
        .run(listener, server_shutdown)
        .await
        .map_err(StartupError::Serve)
}
