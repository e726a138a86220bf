//! Failover dispatcher.
//!
//! One dispatch walks a fresh [`AttemptPool`]: draw a provider at random,
//! POST, and either return the first successful body or record the failure and
//! draw again. Attempts are sequential; the pool shrinks by one per attempt so
//! a dispatch makes at most `providers.len()` attempts.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::dispatch::error::{DispatchError, SetupError};
use crate::dispatch::outcome::AttemptOutcome;
use crate::dispatch::pool::{AttemptPool, Selector, UniformRandom};
use crate::dispatch::provider::ProviderList;
use crate::dispatch::transport::{HttpTransport, UpstreamTransport};
use crate::observability::metrics;
use crate::rpc::RpcRequest;

#[derive(Clone)]
pub struct Dispatcher {
    providers: ProviderList,
    transport: Arc<dyn UpstreamTransport>,
    selector: Arc<dyn Selector>,
}

impl Dispatcher {
    /// Dispatcher with uniformly random provider selection.
    pub fn new(providers: ProviderList, transport: Arc<dyn UpstreamTransport>) -> Self {
        Self {
            providers,
            transport,
            selector: Arc::new(UniformRandom),
        }
    }

    /// Build the production dispatcher: parsed provider list over an HTTP transport.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, SetupError> {
        let providers = ProviderList::from_urls(&config.providers)?;
        let transport = HttpTransport::new(config.timeout())?;
        Ok(Self::new(providers, Arc::new(transport)))
    }

    pub fn with_selector(mut self, selector: Arc<dyn Selector>) -> Self {
        self.selector = selector;
        self
    }

    /// Forward `request` until one provider succeeds or all have failed.
    pub async fn dispatch(&self, request: &RpcRequest) -> Result<Value, DispatchError> {
        let start_time = Instant::now();
        let body = serde_json::to_vec(request)?;

        let mut pool = AttemptPool::new(self.providers.len());
        let mut errors = Vec::with_capacity(pool.len());

        while let Some(index) = pool.draw(self.selector.as_ref()) {
            let provider = &self.providers[index];
            let attempt = errors.len() + 1;

            let outcome = self.transport.post_json(provider.url(), &body).await;
            metrics::record_attempt(provider.label(), outcome.kind());

            let description = match outcome {
                AttemptOutcome::Success(payload) => {
                    tracing::info!(
                        method = %request.method,
                        provider = %provider,
                        attempt,
                        elapsed_ms = start_time.elapsed().as_millis() as u64,
                        "Request served"
                    );
                    metrics::record_dispatch("success", start_time);
                    return Ok(payload);
                }
                AttemptOutcome::Transport { reason } => reason,
                AttemptOutcome::Http { reason, .. } => reason,
                AttemptOutcome::Application { error } => error.to_string(),
            };

            tracing::error!(
                method = %request.method,
                provider = %provider,
                attempt,
                remaining = pool.len(),
                error = %description,
                "Provider attempt failed"
            );
            errors.push(description);
        }

        tracing::error!(
            method = %request.method,
            attempts = errors.len(),
            "All providers failed"
        );
        metrics::record_dispatch("exhausted", start_time);
        Err(DispatchError::PoolExhausted { errors })
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("providers", &self.providers.len())
            .field("selector", &self.selector)
            .finish()
    }
}
