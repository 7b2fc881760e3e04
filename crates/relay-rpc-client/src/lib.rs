//! # JSON-RPC HTTP Client
//!
//! A client-side helper that formats and dispatches JSON-RPC 2.0 requests and
//! notifications over HTTP, and routes asynchronous responses to registered
//! callbacks. Encoding is handled by [`relay_json_rpc`]; this crate adds the
//! transport and the callback routing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use relay_rpc_client::RpcClientBuilder;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RpcClientBuilder::new()
//!         .on_success(|result, _response, _status, _headers| {
//!             println!("result: {result}");
//!         })
//!         .on_error(|status, failure| {
//!             eprintln!("transport failed ({status:?}): {failure}");
//!         })
//!         .build()?;
//!
//!     client
//!         .request(
//!             "http://localhost:8080/rpc",
//!             "add",
//!             Some(vec![json!(1), json!(2)].into()),
//!         )
//!         .await?;
//!
//!     client
//!         .notify("http://localhost:8080/rpc", "save", None)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Routing rules
//!
//! - A response carrying `result` invokes the success callback and yields
//!   [`CallOutcome::Success`].
//! - A response carrying `error` propagates as an `Err` — a protocol
//!   violation is never delivered to the transport-error callback and never
//!   silently dropped.
//! - A transport failure (network error, non-2xx status, undecodable body)
//!   invokes the error callback and yields [`CallOutcome::Transport`].
//!
//! There are no retries, no batching, and no call history.

pub mod client;
pub mod config;
pub mod error;
pub mod transport;

// Re-export main types
pub use client::{CallKind, CallOutcome, ErrorHandler, RpcClient, RpcClientBuilder, SuccessHandler};
pub use config::ClientConfig;
pub use error::{RpcClientError, RpcClientResult};
pub use transport::{HttpTransport, Transport, TransportFailure, TransportReply};

// Re-export encoding types for convenience
pub use relay_json_rpc::{RequestEncoder, RequestParams, RpcError};
