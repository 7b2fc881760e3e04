use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ErrorCode, ErrorObject, JsonRpcErrorResponse};
use crate::types::{JsonRpcVersion, RequestId};

/// A successful JSON-RPC response
///
/// Decoding is deliberately lenient: a server that omits `result` yields
/// `Value::Null`, matching the "missing member reads as null" behavior
/// callers of a dynamic client would see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(rename = "jsonrpc", default)]
    pub version: JsonRpcVersion,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub id: Option<RequestId>,
}

/// Union over the two response shapes a server may answer with
///
/// The error form is tried first so that any body carrying an `error` member
/// decodes as an error, regardless of what else it contains.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcMessage {
    /// Error response with an `error` member
    Error(JsonRpcErrorResponse),
    /// Successful response with a `result` member
    Response(JsonRpcResponse),
}

impl JsonRpcMessage {
    /// Decode a response body, keying off the *presence* of an `error` member
    /// rather than its exact shape
    ///
    /// A malformed `error` member still counts as an error: its message falls
    /// back to the member's own text and its code to -1. A body that matches
    /// neither shape reads as a success with a null result.
    pub fn from_body(body: &Value) -> Self {
        if let Some(raw) = body.get("error") {
            let error = serde_json::from_value::<ErrorObject>(raw.clone()).unwrap_or_else(|_| {
                let code = raw
                    .get("code")
                    .and_then(|code| serde_json::from_value::<ErrorCode>(code.clone()).ok())
                    .unwrap_or(ErrorCode::Number(-1));
                let message = raw
                    .as_str()
                    .map(str::to_owned)
                    .unwrap_or_else(|| raw.to_string());
                ErrorObject {
                    code,
                    message,
                    data: None,
                }
            });

            return JsonRpcMessage::Error(JsonRpcErrorResponse {
                version: JsonRpcVersion::V2_0,
                error,
                id: body
                    .get("id")
                    .and_then(|id| serde_json::from_value(id.clone()).ok()),
            });
        }

        let response = serde_json::from_value::<JsonRpcResponse>(body.clone()).unwrap_or_else(|_| {
            JsonRpcResponse {
                version: JsonRpcVersion::V2_0,
                result: Value::Null,
                id: None,
            }
        });
        JsonRpcMessage::Response(response)
    }

    /// Check if this is an error response
    pub fn is_error(&self) -> bool {
        matches!(self, JsonRpcMessage::Error(_))
    }

    /// Get the request id echoed by the server, if any
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            JsonRpcMessage::Response(response) => response.id.as_ref(),
            JsonRpcMessage::Error(error) => error.id.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{from_value, json};

    #[test]
    fn test_success_decoding() {
        let message: JsonRpcMessage =
            from_value(json!({"jsonrpc": "2.0", "result": 3, "id": 0})).unwrap();

        assert!(!message.is_error());
        assert_eq!(message.id(), Some(&RequestId::Number(0)));
        match message {
            JsonRpcMessage::Response(response) => assert_eq!(response.result, json!(3)),
            JsonRpcMessage::Error(_) => panic!("expected success response"),
        }
    }

    #[test]
    fn test_error_decoding_wins_over_success() {
        let message: JsonRpcMessage = from_value(json!({
            "jsonrpc": "2.0",
            "error": {"message": "bad", "code": -1},
            "id": 0
        }))
        .unwrap();

        assert!(message.is_error());
        match message {
            JsonRpcMessage::Error(error) => assert_eq!(error.error.message, "bad"),
            JsonRpcMessage::Response(_) => panic!("expected error response"),
        }
    }

    #[test]
    fn test_missing_result_reads_as_null() {
        let message: JsonRpcMessage = from_value(json!({"jsonrpc": "2.0", "id": 1})).unwrap();

        match message {
            JsonRpcMessage::Response(response) => assert!(response.result.is_null()),
            JsonRpcMessage::Error(_) => panic!("expected success response"),
        }
    }

    #[test]
    fn test_from_body_keys_off_error_presence() {
        // Well-formed error member
        let message = JsonRpcMessage::from_body(&json!({
            "jsonrpc": "2.0",
            "error": {"message": "bad", "code": -1},
            "id": 0
        }));
        match message {
            JsonRpcMessage::Error(error) => {
                assert_eq!(error.error.message, "bad");
                assert_eq!(error.id, Some(RequestId::Number(0)));
            }
            JsonRpcMessage::Response(_) => panic!("expected error response"),
        }

        // A bare-string error member is still an error
        let message = JsonRpcMessage::from_body(&json!({"error": "boom"}));
        match message {
            JsonRpcMessage::Error(error) => {
                assert_eq!(error.error.message, "boom");
                assert_eq!(error.error.code, crate::ErrorCode::Number(-1));
            }
            JsonRpcMessage::Response(_) => panic!("expected error response"),
        }
    }

    #[test]
    fn test_from_body_tolerates_unrecognizable_success() {
        let message = JsonRpcMessage::from_body(&json!([1, 2, 3]));
        match message {
            JsonRpcMessage::Response(response) => assert!(response.result.is_null()),
            JsonRpcMessage::Error(_) => panic!("expected success response"),
        }

        // A null id on an error body reads as no id
        let message = JsonRpcMessage::from_body(&json!({
            "error": {"message": "bad", "code": "E_BAD"},
            "id": null
        }));
        assert_eq!(message.id(), None);
    }
}
