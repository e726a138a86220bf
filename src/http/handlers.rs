use std::net::SocketAddr;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::http::response::{ApiError, HealthStatus};
use crate::http::server::AppState;
use crate::rpc::RpcRequest;

/// Forward one JSON-RPC call through the failover dispatcher.
pub async fn rpc_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    payload: Result<Json<RpcRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(source = %addr.ip(), error = %rejection.body_text(), "Rejected request body");
        ApiError::from(rejection)
    })?;
    request.validate()?;

    tracing::info!(
        source = %addr.ip(),
        method = %request.method,
        body = %serde_json::to_string(&request).unwrap_or_default(),
        "Received request"
    );

    let payload = state.dispatcher.dispatch(&request).await?;
    Ok(Json(payload))
}

/// Liveness only; never consults providers.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthStatus::ok())
}
