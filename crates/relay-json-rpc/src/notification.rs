use serde::{Deserialize, Serialize};

use crate::request::RequestParams;
use crate::types::JsonRpcVersion;

/// A JSON-RPC notification (a request without an id)
///
/// Notifications are fire-and-forget: the server sends no response, so the
/// wire form has no `id` key at all rather than a null one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<RequestParams>,
}

impl JsonRpcNotification {
    pub fn new(method: String, params: Option<RequestParams>) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            method,
            params,
        }
    }
}
