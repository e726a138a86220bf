//! Provider selection and failover.
//!
//! # Data Flow
//! ```text
//! RpcRequest
//!     → dispatcher.rs (one dispatch per inbound request)
//!     → pool.rs (fresh AttemptPool, random draw without replacement)
//!     → provider.rs (index → URL)
//!     → transport.rs (POST with per-attempt timeout)
//!     → outcome.rs (success | transport | http | application)
//!     → first success returned, or every failure aggregated
//! ```
//!
//! # Design Decisions
//! - No state survives a dispatch; every request reconsiders all providers
//! - Application-level JSON-RPC errors are retried like transport failures
//! - Attempts are sequential, never fanned out

pub mod dispatcher;
pub mod error;
pub mod outcome;
pub mod pool;
pub mod provider;
pub mod transport;

pub use dispatcher::Dispatcher;
pub use error::{DispatchError, SetupError};
pub use outcome::AttemptOutcome;
pub use pool::{AttemptPool, Selector, UniformRandom};
pub use provider::{Provider, ProviderList};
pub use transport::{HttpTransport, UpstreamTransport};
