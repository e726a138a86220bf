//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatch + http produce:
//!     → logging.rs (structured log events, stdout and optional JSON file)
//!     → metrics.rs (attempt and dispatch counters, latency histogram)
//!
//! Consumers:
//!     → Log aggregation (stdout, file)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line of a request via its span
//! - Provider labels are host:port only; URL paths may carry API keys

pub mod logging;
pub mod metrics;
