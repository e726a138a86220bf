use thiserror::Error;

/// Failure building the dispatcher. Fatal at startup.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no RPC providers configured")]
    NoProviders,

    #[error("invalid provider URL '{url}': {source}")]
    InvalidProvider {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Failure of a whole dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Every provider was tried and failed. One description per attempt, in
    /// attempt order.
    #[error("all {} providers failed", .errors.len())]
    PoolExhausted { errors: Vec<String> },

    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}
