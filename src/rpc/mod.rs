//! JSON-RPC wire types shared by the HTTP layer and the dispatcher.

pub mod types;

pub use types::{JsonRpcVersion, RequestError, RpcId, RpcRequest};
