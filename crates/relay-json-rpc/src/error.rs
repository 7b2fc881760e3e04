use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::types::{JsonRpcVersion, RequestId};

/// Errors raised while encoding a request or notification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A required field was absent from both the call and the template
    #[error("parameter \"{0}\" is required")]
    MissingParameter(&'static str),

    /// The payload could not be serialized
    #[error("failed to serialize payload: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        EncodeError::Serialize(err.to_string())
    }
}

/// Error code reported by a server
///
/// JSON-RPC error codes are integers, but some servers report string codes,
/// so both forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Number(i64),
    String(String),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Number(n) => write!(f, "{}", n),
            ErrorCode::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        ErrorCode::Number(code)
    }
}

/// The `error` member of a JSON-RPC error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A complete JSON-RPC error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorResponse {
    #[serde(rename = "jsonrpc", default)]
    pub version: JsonRpcVersion,
    pub error: ErrorObject,
    #[serde(default)]
    pub id: Option<RequestId>,
}

/// A protocol-level error reported by the remote peer
///
/// Distinct from transport failures: the HTTP exchange succeeded, but the
/// server answered with an `error` member instead of a `result`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("server reported error (code {code}): {message}")]
pub struct RpcError {
    pub message: String,
    pub code: ErrorCode,
}

impl RpcError {
    pub fn new(message: impl Into<String>, code: impl Into<ErrorCode>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

impl From<ErrorObject> for RpcError {
    fn from(object: ErrorObject) -> Self {
        Self {
            message: object.message,
            code: object.code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{from_value, json};

    #[test]
    fn test_missing_parameter_message() {
        let err = EncodeError::MissingParameter("method");
        assert_eq!(err.to_string(), "parameter \"method\" is required");
    }

    #[test]
    fn test_error_code_accepts_both_forms() {
        let number: ErrorCode = from_value(json!(-32601)).unwrap();
        assert_eq!(number, ErrorCode::Number(-32601));

        let string: ErrorCode = from_value(json!("E_NOPE")).unwrap();
        assert_eq!(string, ErrorCode::String("E_NOPE".to_string()));
    }

    #[test]
    fn test_rpc_error_from_object() {
        let object: ErrorObject =
            from_value(json!({"message": "bad", "code": -1})).unwrap();
        let err = RpcError::from(object);

        assert_eq!(err.message, "bad");
        assert_eq!(err.code, ErrorCode::Number(-1));
        assert_eq!(err.to_string(), "server reported error (code -1): bad");
    }

    #[test]
    fn test_error_response_decoding() {
        let response: JsonRpcErrorResponse = from_value(json!({
            "jsonrpc": "2.0",
            "error": {"message": "method not found", "code": -32601},
            "id": 4
        }))
        .unwrap();

        assert_eq!(response.id, Some(RequestId::Number(4)));
        assert_eq!(response.error.message, "method not found");
    }
}
