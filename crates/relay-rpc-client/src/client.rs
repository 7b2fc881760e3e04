//! Main RPC client implementation

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use relay_json_rpc::{JsonRpcMessage, RequestEncoder, RequestParams, RpcError};

use crate::config::ClientConfig;
use crate::error::{RpcClientError, RpcClientResult};
use crate::transport::{HttpTransport, SharedTransport, TransportFailure, TransportReply};

/// Callback invoked when a call completes with a `result`
///
/// Arguments: the `result` member, the full decoded response, the HTTP
/// status, and the response headers.
pub type SuccessHandler = Arc<dyn Fn(&Value, &Value, u16, &HashMap<String, String>) + Send + Sync>;

/// Callback invoked when the transport exchange itself fails
pub type ErrorHandler = Arc<dyn Fn(Option<u16>, &TransportFailure) + Send + Sync>;

/// Whether a call expects a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Expects a response and carries an id
    Request,
    /// Fire-and-forget, no id
    Notification,
}

/// How a dispatched call completed
///
/// Exactly one outcome is produced per dispatched call. Protocol errors are
/// not an outcome: they propagate as [`RpcClientError::Rpc`] so that a
/// server-reported error cannot be silently dropped. Notification replies
/// are routed the same way as request replies.
#[derive(Debug, Clone)]
pub enum CallOutcome {
    /// The server answered with a `result`
    Success {
        result: Value,
        response: Value,
        status: u16,
        headers: HashMap<String, String>,
    },
    /// The exchange failed before a protocol-level response was decoded
    Transport(TransportFailure),
}

/// JSON-RPC client bridging the encoder to a transport
///
/// Encoding (including the id increment) completes synchronously before the
/// transport await, so overlapping calls on a shared client always get
/// distinct, gap-free request ids.
pub struct RpcClient {
    transport: SharedTransport,
    encoder: parking_lot::Mutex<RequestEncoder>,
    on_success: Option<SuccessHandler>,
    on_error: Option<ErrorHandler>,
}

impl RpcClient {
    /// Create a client with no callbacks installed
    pub fn new(transport: SharedTransport) -> Self {
        Self {
            transport,
            encoder: parking_lot::Mutex::new(RequestEncoder::new()),
            on_success: None,
            on_error: None,
        }
    }

    /// Call a remote procedure
    ///
    /// Fails synchronously with [`RpcClientError::MissingParameter`] when the
    /// endpoint is absent, or when the method is absent from both the call
    /// and the encoder template. After dispatch the outcome is routed,
    /// identically for requests and notifications:
    /// - `result` responses invoke the success callback (if installed) and
    ///   return [`CallOutcome::Success`];
    /// - `error` responses return `Err(`[`RpcClientError::Rpc`]`)` without
    ///   touching either callback;
    /// - transport failures invoke the error callback (if installed) and
    ///   return [`CallOutcome::Transport`].
    pub async fn call(
        &self,
        endpoint: Option<&str>,
        method: Option<&str>,
        params: Option<RequestParams>,
        kind: CallKind,
    ) -> RpcClientResult<CallOutcome> {
        let endpoint = endpoint.ok_or(RpcClientError::MissingParameter("url"))?;
        let endpoint = Url::parse(endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(RpcClientError::UnsupportedScheme(
                endpoint.scheme().to_string(),
            ));
        }

        // Encode under the lock and release it before the transport await;
        // the id is consumed here, not at completion time.
        let payload = {
            let mut encoder = self.encoder.lock();
            match kind {
                CallKind::Request => encoder.encode_request(method, params)?,
                CallKind::Notification => encoder.encode_notification(method, params)?,
            }
        };

        debug!(endpoint = %endpoint, kind = ?kind, "dispatching JSON-RPC call");

        match self.transport.post(&endpoint, payload).await {
            Ok(reply) => self.route_reply(reply),
            Err(failure) => {
                warn!(endpoint = %endpoint, failure = %failure, "transport exchange failed");
                if let Some(handler) = &self.on_error {
                    handler(failure.status, &failure);
                }
                Ok(CallOutcome::Transport(failure))
            }
        }
    }

    /// Call a remote procedure, expecting a response
    pub async fn request(
        &self,
        endpoint: &str,
        method: &str,
        params: Option<RequestParams>,
    ) -> RpcClientResult<CallOutcome> {
        self.call(Some(endpoint), Some(method), params, CallKind::Request)
            .await
    }

    /// Send a fire-and-forget notification
    pub async fn notify(
        &self,
        endpoint: &str,
        method: &str,
        params: Option<RequestParams>,
    ) -> RpcClientResult<CallOutcome> {
        self.call(Some(endpoint), Some(method), params, CallKind::Notification)
            .await
    }

    /// The id the next request will carry
    pub fn next_id(&self) -> i64 {
        self.encoder.lock().template().next_id()
    }

    fn route_reply(&self, reply: TransportReply) -> RpcClientResult<CallOutcome> {
        match JsonRpcMessage::from_body(&reply.body) {
            JsonRpcMessage::Error(error_response) => {
                let error = RpcError::from(error_response.error);
                warn!(code = %error.code, "server reported protocol error");
                Err(error.into())
            }
            JsonRpcMessage::Response(response) => {
                if let Some(handler) = &self.on_success {
                    handler(&response.result, &reply.body, reply.status, &reply.headers);
                }

                Ok(CallOutcome::Success {
                    result: response.result,
                    response: reply.body,
                    status: reply.status,
                    headers: reply.headers,
                })
            }
        }
    }
}

/// Builder for creating RPC clients
pub struct RpcClientBuilder {
    transport: Option<SharedTransport>,
    config: ClientConfig,
    on_success: Option<SuccessHandler>,
    on_error: Option<ErrorHandler>,
}

impl RpcClientBuilder {
    /// Create a new client builder
    pub fn new() -> Self {
        Self {
            transport: None,
            config: ClientConfig::default(),
            on_success: None,
            on_error: None,
        }
    }

    /// Set transport
    pub fn with_transport(mut self, transport: SharedTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set configuration used when building the default HTTP transport
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Install the success callback
    pub fn on_success<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Value, &Value, u16, &HashMap<String, String>) + Send + Sync + 'static,
    {
        self.on_success = Some(Arc::new(handler));
        self
    }

    /// Install the transport-error callback
    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: Fn(Option<u16>, &TransportFailure) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(handler));
        self
    }

    /// Build the client, defaulting to an HTTP transport
    pub fn build(self) -> RpcClientResult<RpcClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.config)?),
        };

        let mut client = RpcClient::new(transport);
        client.on_success = self.on_success;
        client.on_error = self.on_error;
        Ok(client)
    }
}

impl Default for RpcClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
