//! Core trait for the HTTP transport

use async_trait::async_trait;

use crate::models::DispatchResult;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport the dispatcher calls go through.
///
/// Implementations return `Ok` for any completed HTTP exchange regardless of
/// status code; `Err(DispatchError::Network)` is reserved for transport-level
/// failures (connect, timeout, interrupted body). Timeout policy belongs to
/// the implementation.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a PUT with a JSON body.
    async fn put_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> DispatchResult<TransportResponse>;

    /// Issue a PATCH with an empty body.
    async fn patch(&self, url: &str) -> DispatchResult<TransportResponse>;

    /// Issue a DELETE.
    async fn delete(&self, url: &str) -> DispatchResult<TransportResponse>;
}
