//! Mock HTTP transport for testing

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use super::{HttpTransport, TransportResponse};
use crate::models::{DispatchError, DispatchResult};

/// A call recorded by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

/// In-memory transport with configurable responses and a call log.
///
/// Every call is recorded, so tests can assert on exactly which requests the
/// client issued. Heartbeat failure can be toggled while the client is
/// running; the register gate holds the PUT open until released, which lets
/// tests observe the in-flight `Registering` state.
pub struct MockTransport {
    register_status: u16,
    register_body: String,
    heartbeat_status: u16,
    fail_register: bool,
    fail_deregister: bool,
    fail_heartbeat: AtomicBool,
    register_gate: Option<Arc<Notify>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    /// Create a transport that accepts everything; registration responds
    /// 200 with uuid `"mock-uuid"`.
    pub fn new() -> Self {
        Self {
            register_status: 200,
            register_body: r#"{"uuid":"mock-uuid"}"#.to_string(),
            heartbeat_status: 200,
            fail_register: false,
            fail_deregister: false,
            fail_heartbeat: AtomicBool::new(false),
            register_gate: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Set the status and body returned for registration.
    pub fn with_register_response(mut self, status: u16, body: impl Into<String>) -> Self {
        self.register_status = status;
        self.register_body = body.into();
        self
    }

    /// Fail registration at the transport level.
    pub fn with_register_failure(mut self) -> Self {
        self.fail_register = true;
        self
    }

    /// Fail deregistration at the transport level.
    pub fn with_deregister_failure(mut self) -> Self {
        self.fail_deregister = true;
        self
    }

    /// Set the status returned for heartbeats.
    pub fn with_heartbeat_status(mut self, status: u16) -> Self {
        self.heartbeat_status = status;
        self
    }

    /// Hold every registration PUT open until `gate` is notified.
    pub fn with_register_gate(mut self, gate: Arc<Notify>) -> Self {
        self.register_gate = Some(gate);
        self
    }

    /// Toggle transport-level heartbeat failure while running.
    pub fn set_heartbeat_failure(&self, fail: bool) {
        self.fail_heartbeat.store(fail, Ordering::SeqCst);
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Number of registration PUTs issued.
    pub fn register_calls(&self) -> usize {
        self.count("PUT")
    }

    /// Number of heartbeat PATCHes issued.
    pub fn heartbeat_calls(&self) -> usize {
        self.count("PATCH")
    }

    /// Number of deregistration DELETEs issued.
    pub fn deregister_calls(&self) -> usize {
        self.count("DELETE")
    }

    fn count(&self, method: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.method == method).count()
    }

    fn record(&self, method: &'static str, url: &str, body: Option<serde_json::Value>) {
        self.calls.lock().push(RecordedCall {
            method,
            url: url.to_string(),
            body,
        });
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn put_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> DispatchResult<TransportResponse> {
        self.record("PUT", url, Some(body.clone()));

        if let Some(gate) = &self.register_gate {
            gate.notified().await;
        }

        if self.fail_register {
            return Err(DispatchError::Network(
                "simulated connection failure".to_string(),
            ));
        }

        Ok(TransportResponse::new(
            self.register_status,
            self.register_body.clone(),
        ))
    }

    async fn patch(&self, url: &str) -> DispatchResult<TransportResponse> {
        self.record("PATCH", url, None);

        if self.fail_heartbeat.load(Ordering::SeqCst) {
            return Err(DispatchError::Network(
                "simulated connection failure".to_string(),
            ));
        }

        Ok(TransportResponse::new(self.heartbeat_status, ""))
    }

    async fn delete(&self, url: &str) -> DispatchResult<TransportResponse> {
        self.record("DELETE", url, None);

        if self.fail_deregister {
            return Err(DispatchError::Network(
                "simulated connection failure".to_string(),
            ));
        }

        Ok(TransportResponse::new(200, ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let transport = MockTransport::new();

        transport
            .put_json("http://d/register", &serde_json::json!({"service": "a"}))
            .await
            .unwrap();
        transport.patch("http://d/service/uuid/x/heartbeat").await.unwrap();
        transport.delete("http://d/service/uuid/x/").await.unwrap();

        assert_eq!(transport.register_calls(), 1);
        assert_eq!(transport.heartbeat_calls(), 1);
        assert_eq!(transport.deregister_calls(), 1);

        let calls = transport.calls();
        assert_eq!(calls[0].method, "PUT");
        assert_eq!(calls[0].body.as_ref().unwrap()["service"], "a");
    }

    #[tokio::test]
    async fn test_heartbeat_failure_toggle() {
        let transport = MockTransport::new();
        transport.set_heartbeat_failure(true);

        let result = transport.patch("http://d/service/uuid/x/heartbeat").await;
        assert!(matches!(result, Err(DispatchError::Network(_))));

        transport.set_heartbeat_failure(false);
        assert!(transport.patch("http://d/service/uuid/x/heartbeat").await.is_ok());

        // Failed attempts are recorded too
        assert_eq!(transport.heartbeat_calls(), 2);
    }

    #[tokio::test]
    async fn test_custom_register_response() {
        let transport = MockTransport::new().with_register_response(503, "try later");

        let response = transport
            .put_json("http://d/register", &serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(response.status, 503);
        assert_eq!(response.body, "try later");
    }
}
