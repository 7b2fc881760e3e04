//! HTTP transport built on reqwest

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{RpcClientError, RpcClientResult};
use crate::transport::{Transport, TransportFailure, TransportReply};

/// HTTP transport for the RPC client
///
/// Every call is a single POST with a JSON content type; there is no retry,
/// pooling configuration, or authentication layer on top of reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport from a client configuration
    pub fn new(config: &ClientConfig) -> RpcClientResult<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| RpcClientError::config(format!("invalid header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| RpcClientError::config(format!("invalid header value: {e}")))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Create a transport around an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, endpoint: &Url, body: String) -> Result<TransportReply, TransportFailure> {
        debug!(endpoint = %endpoint, "POSTing JSON-RPC payload");

        let response = self
            .client
            .post(endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                TransportFailure::new(
                    e.status().map(|s| s.as_u16()),
                    format!("request failed: {e}"),
                )
            })?;

        let status = response.status();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.to_string(), value.to_string());
            }
        }

        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TransportFailure::new(
                Some(status.as_u16()),
                format!("HTTP {status}: {text}"),
            ));
        }

        let body: Value = response.json().await.map_err(|e| {
            TransportFailure::new(Some(status.as_u16()), format!("undecodable JSON body: {e}"))
        })?;

        Ok(TransportReply {
            body,
            status: status.as_u16(),
            headers,
        })
    }
}
