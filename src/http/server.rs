//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the RPC and health handlers
//! - Wire up middleware (request ID, tracing, body limit)
//! - Serve on a bound listener until shutdown is signalled

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::dispatch::{Dispatcher, SetupError};
use crate::http::handlers::{health_handler, rpc_handler};
use crate::http::request::{propagate_request_id_layer, request_span, set_request_id_layer};

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// HTTP server for the failover proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server whose dispatcher talks HTTP to the configured providers.
    pub fn new(config: ProxyConfig) -> Result<Self, SetupError> {
        let dispatcher = Dispatcher::from_config(&config.upstream)?;
        Ok(Self::with_dispatcher(config, dispatcher))
    }

    /// Create a server around an already built dispatcher.
    pub fn with_dispatcher(config: ProxyConfig, dispatcher: Dispatcher) -> Self {
        let state = AppState {
            dispatcher: Arc::new(dispatcher),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/", post(rpc_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_size))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            providers = self.config.upstream.providers.len(),
            timeout_secs = self.config.upstream.timeout_secs,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
