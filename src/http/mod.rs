//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, tracing span)
//!     → handlers.rs (decode JSON-RPC body, health)
//!     → dispatch (failover across providers)
//!     → response.rs (pass-through body or aggregated errors)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::{ErrorDetail, ErrorList, HealthStatus};
pub use server::{AppState, HttpServer};
