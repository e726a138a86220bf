//! Failover JSON-RPC proxy library.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rpc;

pub use config::schema::ProxyConfig;
pub use dispatch::Dispatcher;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
