//! # JSON-RPC 2.0 Client Encoding
//!
//! Client-side JSON-RPC 2.0 wire types and the request encoder. This crate is
//! pure data transformation: it shapes request and notification payloads and
//! decodes response bodies, without any transport-specific code.
//!
//! ## Features
//! - Request and notification payload encoding with automatic id management
//! - Positional (array) and named (object) parameters
//! - Response decoding into success or server-error form
//! - Reusable call template: one encoder serves a whole session of calls

pub mod encoder;
pub mod error;
pub mod notification;
pub mod request;
pub mod response;
pub mod types;

// Re-export main types
pub use encoder::{CallTemplate, RequestEncoder};
pub use error::{EncodeError, ErrorCode, ErrorObject, JsonRpcErrorResponse, RpcError};
pub use notification::JsonRpcNotification;
pub use request::{JsonRpcRequest, RequestParams};
pub use response::{JsonRpcMessage, JsonRpcResponse};
pub use types::{JsonRpcVersion, RequestId};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";
