//! Metrics collection and exposition.
//!
//! # Metrics
//! - `rpc_proxy_requests_total` (counter): dispatches by outcome
//! - `rpc_proxy_attempts_total` (counter): upstream attempts by provider, outcome
//! - `rpc_proxy_dispatch_duration_seconds` (histogram): end-to-end dispatch latency
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_attempt(provider: &str, outcome: &'static str) {
    metrics::counter!(
        "rpc_proxy_attempts_total",
        "provider" => provider.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_dispatch(outcome: &'static str, start_time: Instant) {
    metrics::counter!("rpc_proxy_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("rpc_proxy_dispatch_duration_seconds", "outcome" => outcome)
        .record(start_time.elapsed().as_secs_f64());
}
