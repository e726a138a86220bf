//! Response bodies and error mapping.
//!
//! # Design Decisions
//! - Pool exhaustion is the caller's 400 with every attempt's description
//! - Malformed JSON-RPC bodies are 422 and never reach a provider
//! - Oversized bodies keep the 413 produced by the body limit

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::dispatch::DispatchError;
use crate::rpc::RequestError;

/// Body returned when every provider failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorList {
    pub errors: Vec<String>,
}

/// Body returned for rejected or internally failed requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Body of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
        }
    }
}

/// Handler-level error, rendered through [`IntoResponse`].
#[derive(Debug)]
pub enum ApiError {
    Exhausted(Vec<String>),
    Rejected { status: StatusCode, detail: String },
    Internal(String),
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::PoolExhausted { errors } => ApiError::Exhausted(errors),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match &rejection {
            JsonRejection::BytesRejection(_) => rejection.status(),
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        ApiError::Rejected {
            status,
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Exhausted(errors) => {
                (StatusCode::BAD_REQUEST, Json(ErrorList { errors })).into_response()
            }
            ApiError::Rejected { status, detail } => {
                (status, Json(ErrorDetail { detail })).into_response()
            }
            ApiError::Internal(detail) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorDetail { detail })).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustion_maps_to_bad_request() {
        let err: ApiError = DispatchError::PoolExhausted {
            errors: vec!["a".to_string(), "b".to_string()],
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_empty_method_is_unprocessable() {
        let response = ApiError::from(RequestError::EmptyMethod).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
