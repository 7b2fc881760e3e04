use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::types::{JsonRpcVersion, RequestId};

/// Parameters for a JSON-RPC call
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RequestParams {
    /// Positional parameters as an array
    Array(Vec<Value>),
    /// Named parameters as an object
    Object(HashMap<String, Value>),
}

impl RequestParams {
    /// Get a parameter by name (for object params)
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            RequestParams::Object(map) => map.get(key),
            RequestParams::Array(_) => None,
        }
    }

    /// Get a parameter by position (for array params)
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            RequestParams::Array(vec) => vec.get(index),
            RequestParams::Object(_) => None,
        }
    }
}

impl From<Vec<Value>> for RequestParams {
    fn from(vec: Vec<Value>) -> Self {
        RequestParams::Array(vec)
    }
}

impl From<HashMap<String, Value>> for RequestParams {
    fn from(map: HashMap<String, Value>) -> Self {
        RequestParams::Object(map)
    }
}

/// A JSON-RPC request payload
///
/// Requests expect a response and always carry an `id`. The `params` field is
/// dropped from the wire form entirely when no parameters were supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<RequestParams>,
    pub id: RequestId,
}

impl JsonRpcRequest {
    pub fn new(id: RequestId, method: String, params: Option<RequestParams>) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            method,
            params,
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{from_str, json, to_string, to_value};

    #[test]
    fn test_request_wire_shape() {
        let request = JsonRpcRequest::new(
            RequestId::Number(3),
            "add".to_string(),
            Some(RequestParams::Array(vec![json!(1), json!(2)])),
        );

        assert_eq!(
            to_value(&request).unwrap(),
            json!({"jsonrpc": "2.0", "method": "add", "params": [1, 2], "id": 3})
        );
    }

    #[test]
    fn test_request_omits_absent_params() {
        let request = JsonRpcRequest::new(RequestId::Number(0), "status".to_string(), None);

        let json_str = to_string(&request).unwrap();
        assert!(!json_str.contains("\"params\""));

        let parsed: JsonRpcRequest = from_str(&json_str).unwrap();
        assert_eq!(parsed.method, "status");
        assert!(parsed.params.is_none());
    }

    #[test]
    fn test_params_accessors() {
        let array = RequestParams::from(vec![json!("a"), json!("b")]);
        assert_eq!(array.get_index(1), Some(&json!("b")));
        assert_eq!(array.get_index(2), None);
        assert_eq!(array.get("a"), None);

        let mut map = HashMap::new();
        map.insert("message".to_string(), json!("Hello!"));
        let object = RequestParams::from(map);
        assert_eq!(object.get("message"), Some(&json!("Hello!")));
        assert_eq!(object.get_index(0), None);
    }
}
