//! Configuration types for the RPC client

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Client configuration
///
/// Covers the HTTP client knobs only; there is deliberately no retry or
/// connection-pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// User agent string sent with every request
    pub user_agent: String,

    /// Per-request timeout
    #[serde(with = "duration_serde")]
    pub request_timeout: Duration,

    /// Extra headers to include in every request
    pub headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("relay-rpc-client/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: Duration::from_secs(30),
            headers: HashMap::new(),
        }
    }
}

// Helper module for Duration serialization
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
