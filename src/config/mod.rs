//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → optional TOML file (loader.rs)
//!     → environment variables, .env included (loader.rs)
//!     → command-line overrides (loader.rs)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the provider list never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, ConfigOverrides};
pub use schema::{ListenerConfig, LogFormat, ObservabilityConfig, ProxyConfig, UpstreamConfig};
pub use validation::{validate_config, ValidationError};
