//! Request encoding with a reusable call template
//!
//! One encoder serves a whole session of calls. The template accumulates the
//! next call's fields, is serialized on encode, and is cleared afterwards so
//! a field omitted on the following call is detectable instead of leaking the
//! previous call's value.

use crate::error::EncodeError;
use crate::notification::JsonRpcNotification;
use crate::request::{JsonRpcRequest, RequestParams};
use crate::types::RequestId;

/// In-progress call state shared across successive encodes
///
/// `method` and `params` are `None` between calls. `next_id` advances only
/// when a request is encoded; notifications never consume an id.
#[derive(Debug, Clone, Default)]
pub struct CallTemplate {
    method: Option<String>,
    params: Option<RequestParams>,
    next_id: i64,
}

impl CallTemplate {
    /// The id the next encoded request will carry
    pub fn next_id(&self) -> i64 {
        self.next_id
    }

    /// The method currently staged for the next encode, if any
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }
}

/// Turns `(method, params)` pairs into serialized JSON-RPC payloads
///
/// Each encoder owns its own [`CallTemplate`], so independent encoders (one
/// per endpoint, or per test) never share id counters.
#[derive(Debug, Clone, Default)]
pub struct RequestEncoder {
    template: CallTemplate,
}

impl RequestEncoder {
    /// Create an encoder with a fresh template, ids starting at 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode a request payload carrying the next id
    ///
    /// On success the template's `method` and `params` are cleared and the id
    /// counter advances by one.
    pub fn encode_request(
        &mut self,
        method: Option<&str>,
        params: Option<RequestParams>,
    ) -> Result<String, EncodeError> {
        self.validate(method, params)?;

        let request = JsonRpcRequest::new(
            RequestId::Number(self.template.next_id),
            self.take_method()?,
            self.template.params.take(),
        );
        self.template.next_id += 1;

        Ok(serde_json::to_string(&request)?)
    }

    /// Encode a notification payload
    ///
    /// Identical to [`encode_request`](Self::encode_request) except the wire
    /// form has no `id` key and the id counter does not advance.
    pub fn encode_notification(
        &mut self,
        method: Option<&str>,
        params: Option<RequestParams>,
    ) -> Result<String, EncodeError> {
        self.validate(method, params)?;

        let notification =
            JsonRpcNotification::new(self.take_method()?, self.template.params.take());

        Ok(serde_json::to_string(&notification)?)
    }

    /// Stage the call's fields on the template, enforcing preconditions
    ///
    /// A supplied `method` overwrites the staged one; an omitted `method` is
    /// only valid when the template already holds one. Supplied `params`
    /// overwrite staged params; omitted params stay absent from the payload.
    pub fn validate(
        &mut self,
        method: Option<&str>,
        params: Option<RequestParams>,
    ) -> Result<(), EncodeError> {
        match method {
            Some(method) => self.template.method = Some(method.to_owned()),
            None => {
                if self.template.method.is_none() {
                    return Err(EncodeError::MissingParameter("method"));
                }
            }
        }

        if let Some(params) = params {
            self.template.params = Some(params);
        }

        Ok(())
    }

    /// Read-only view of the template state
    pub fn template(&self) -> &CallTemplate {
        &self.template
    }

    // validate() ran first, so the staged method is present; taking it is
    // what clears the template for the next call.
    fn take_method(&mut self) -> Result<String, EncodeError> {
        self.template
            .method
            .take()
            .ok_or(EncodeError::MissingParameter("method"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::collections::HashMap;

    fn decode(payload: &str) -> Value {
        serde_json::from_str(payload).unwrap()
    }

    #[test]
    fn test_request_scenario_add() {
        let mut encoder = RequestEncoder::new();

        let payload = encoder
            .encode_request(Some("add"), Some(vec![json!(1), json!(2)].into()))
            .unwrap();

        assert_eq!(
            decode(&payload),
            json!({"jsonrpc": "2.0", "method": "add", "params": [1, 2], "id": 0})
        );
        assert_eq!(encoder.template().next_id(), 1);
    }

    #[test]
    fn test_notification_scenario_save() {
        let mut encoder = RequestEncoder::new();

        let mut params = HashMap::new();
        params.insert("message".to_string(), json!("Hello!"));
        let payload = encoder
            .encode_notification(Some("save"), Some(params.into()))
            .unwrap();

        let decoded = decode(&payload);
        assert_eq!(
            decoded,
            json!({"jsonrpc": "2.0", "method": "save", "params": {"message": "Hello!"}})
        );
        assert!(decoded.get("id").is_none());
        assert_eq!(encoder.template().next_id(), 0);
    }

    #[test]
    fn test_method_echoed_in_payload() {
        let mut encoder = RequestEncoder::new();

        for method in ["status", "shutdown", "items/list"] {
            let payload = encoder.encode_request(Some(method), None).unwrap();
            assert_eq!(decode(&payload)["method"], json!(method));
        }
    }

    #[test]
    fn test_clearing_makes_omitted_method_fail() {
        let mut encoder = RequestEncoder::new();
        encoder.encode_request(Some("add"), None).unwrap();

        assert_eq!(
            encoder.encode_request(None, None),
            Err(EncodeError::MissingParameter("method"))
        );
        // Encoding a notification clears the method too
        encoder.encode_notification(Some("save"), None).unwrap();
        assert_eq!(
            encoder.encode_notification(None, None),
            Err(EncodeError::MissingParameter("method"))
        );
    }

    #[test]
    fn test_failed_validate_does_not_advance_id() {
        let mut encoder = RequestEncoder::new();

        assert!(encoder.encode_request(None, None).is_err());
        assert_eq!(encoder.template().next_id(), 0);

        let payload = encoder.encode_request(Some("add"), None).unwrap();
        assert_eq!(decode(&payload)["id"], json!(0));
    }

    #[test]
    fn test_request_ids_are_consecutive() {
        let mut encoder = RequestEncoder::new();

        for expected in 0..5 {
            let payload = encoder.encode_request(Some("tick"), None).unwrap();
            assert_eq!(decode(&payload)["id"], json!(expected));
        }
        assert_eq!(encoder.template().next_id(), 5);
    }

    #[test]
    fn test_notifications_never_consume_ids() {
        let mut encoder = RequestEncoder::new();

        let first = encoder.encode_request(Some("a"), None).unwrap();
        assert_eq!(decode(&first)["id"], json!(0));

        for _ in 0..3 {
            let payload = encoder.encode_notification(Some("ping"), None).unwrap();
            assert!(decode(&payload).get("id").is_none());
        }

        let second = encoder.encode_request(Some("b"), None).unwrap();
        assert_eq!(decode(&second)["id"], json!(1));
    }

    #[test]
    fn test_params_do_not_leak_between_calls() {
        let mut encoder = RequestEncoder::new();

        let bare = encoder.encode_request(Some("m"), None).unwrap();
        assert!(decode(&bare).get("params").is_none());

        let with_params = encoder
            .encode_request(Some("m"), Some(vec![json!(1), json!(2)].into()))
            .unwrap();
        assert_eq!(decode(&with_params)["params"], json!([1, 2]));

        let after = encoder.encode_request(Some("m2"), None).unwrap();
        assert!(decode(&after).get("params").is_none());
    }

    #[test]
    fn test_staged_method_survives_until_encode() {
        let mut encoder = RequestEncoder::new();

        encoder.validate(Some("staged"), None).unwrap();
        assert_eq!(encoder.template().method(), Some("staged"));

        // An omitted method falls back to the staged one
        let payload = encoder.encode_request(None, None).unwrap();
        assert_eq!(decode(&payload)["method"], json!("staged"));
        assert_eq!(encoder.template().method(), None);
    }

    #[test]
    fn test_independent_encoders_do_not_share_ids() {
        let mut first = RequestEncoder::new();
        let mut second = RequestEncoder::new();

        first.encode_request(Some("a"), None).unwrap();
        first.encode_request(Some("b"), None).unwrap();

        let payload = second.encode_request(Some("c"), None).unwrap();
        assert_eq!(decode(&payload)["id"], json!(0));
    }
}
