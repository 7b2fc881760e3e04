//! Transport layer for the RPC client
//!
//! The client only shapes request bodies and interprets decoded responses;
//! actually moving bytes is the transport's job. A transport accepts a
//! serialized payload and resolves to either a decoded JSON body with status
//! metadata or a failure with whatever metadata is available.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use url::Url;

pub mod http;

pub use http::HttpTransport;

/// A completed exchange: decoded JSON body plus status metadata
#[derive(Debug, Clone)]
pub struct TransportReply {
    /// Decoded response body
    pub body: Value,
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
}

/// A failed exchange: network error, non-2xx status, or undecodable body
///
/// This is data for the error callback rather than an `Err` the caller must
/// handle; see the routing rules on [`crate::RpcClient::call`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    /// HTTP status code, when the failure happened after a response arrived
    pub status: Option<u16>,
    /// Human-readable failure detail
    pub detail: String,
}

impl TransportFailure {
    pub fn new(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}: {}", status, self.detail),
            None => write!(f, "{}", self.detail),
        }
    }
}

/// Interface every transport implements
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a serialized payload to the endpoint and decode the JSON reply
    async fn post(&self, endpoint: &Url, body: String) -> Result<TransportReply, TransportFailure>;
}

/// Type alias for a shared transport
pub type SharedTransport = std::sync::Arc<dyn Transport>;
