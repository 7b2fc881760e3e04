//! Error types for RPC client operations

use thiserror::Error;

use relay_json_rpc::{EncodeError, RpcError};

/// Result type for RPC client operations
pub type RpcClientResult<T> = Result<T, RpcClientError>;

/// Errors that abort a call before or during dispatch
///
/// Transport failures are intentionally not represented here: they are data
/// routed to the error callback (see [`crate::transport::TransportFailure`]),
/// not errors that propagate to the caller.
#[derive(Error, Debug)]
pub enum RpcClientError {
    /// A required call parameter was absent
    #[error("parameter \"{0}\" is required")]
    MissingParameter(&'static str),

    /// Payload encoding failed
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// The remote peer reported a protocol-level error
    #[error("protocol error: {0}")]
    Rpc(#[from] RpcError),

    /// The endpoint was not a valid URL
    #[error("invalid endpoint: {0}")]
    Url(#[from] url::ParseError),

    /// The endpoint scheme is not dispatchable over HTTP
    #[error("unsupported endpoint scheme: {0}")]
    UnsupportedScheme(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// The underlying HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl RpcClientError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Get the server-reported error if this is a protocol error
    pub fn rpc_error(&self) -> Option<&RpcError> {
        match self {
            Self::Rpc(error) => Some(error),
            _ => None,
        }
    }
}
