//! Request identification.
//!
//! # Responsibilities
//! - Generate an `x-request-id` (UUID v4) when the caller sent none
//! - Echo the id on the response
//! - Open a tracing span carrying the id for everything the request logs

use axum::{body::Body, http::Request};
use tower_http::request_id::{
    MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer,
};
use tracing::Span;

pub const X_REQUEST_ID: &str = "x-request-id";

pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Span for one inbound request, used by the trace layer.
pub fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}
