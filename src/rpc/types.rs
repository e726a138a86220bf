//! JSON-RPC request envelope.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;

/// Protocol version as sent by the caller.
///
/// Clients send either `2.0` or `"2.0"`; both are accepted and the caller's
/// representation is forwarded untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JsonRpcVersion(Value);

impl JsonRpcVersion {
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Default for JsonRpcVersion {
    fn default() -> Self {
        Self(Value::String("2.0".to_string()))
    }
}

impl<'de> Deserialize<'de> for JsonRpcVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Number(_) => Ok(Self(value)),
            Value::String(s) if s.trim().parse::<f64>().is_ok() => Ok(Self(value)),
            other => Err(serde::de::Error::custom(format!(
                "jsonrpc must be a number, got {}",
                other
            ))),
        }
    }
}

/// Request identifier. `Null` is kept distinct from an absent id.
///
/// Numbers are held as [`Number`] so ids outside `i64` (up to `u64::MAX`)
/// are forwarded digit for digit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(Number),
    String(String),
    Null,
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<RpcId>, D::Error>
where
    D: Deserializer<'de>,
{
    RpcId::deserialize(deserializer).map(Some)
}

/// Inbound JSON-RPC call. Decoding enforces the shape; contents of `params`
/// are never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: JsonRpcVersion,
    pub method: String,
    pub params: Vec<Value>,
    #[serde(
        default,
        deserialize_with = "present_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RpcId>,
}

/// Request rejected after structural decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("method must be a non-empty string")]
    EmptyMethod,

    #[error("id must be an integer, got {0}")]
    FractionalId(Number),
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: Vec<Value>, id: Option<RpcId>) -> Self {
        Self {
            jsonrpc: JsonRpcVersion::default(),
            method: method.into(),
            params,
            id,
        }
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.method.trim().is_empty() {
            return Err(RequestError::EmptyMethod);
        }
        if let Some(RpcId::Number(n)) = &self.id {
            if n.is_f64() {
                return Err(RequestError::FractionalId(n.clone()));
            }
        }
        Ok(())
    }
}
