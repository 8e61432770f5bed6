//! Reqwest-backed HTTP transport

use async_trait::async_trait;
use std::time::Duration;

use super::{HttpTransport, TransportResponse};
use crate::models::{DispatchError, DispatchResult};

/// Default transport, backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpClientTransport {
    client: reqwest::Client,
}

impl HttpClientTransport {
    /// Create a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    async fn collect(&self, response: reqwest::Response) -> DispatchResult<TransportResponse> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DispatchError::Network(e.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}

impl Default for HttpClientTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl HttpTransport for HttpClientTransport {
    async fn put_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> DispatchResult<TransportResponse> {
        let response = self
            .client
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(|e| DispatchError::Network(e.to_string()))?;

        self.collect(response).await
    }

    async fn patch(&self, url: &str) -> DispatchResult<TransportResponse> {
        let response = self
            .client
            .patch(url)
            .send()
            .await
            .map_err(|e| DispatchError::Network(e.to_string()))?;

        self.collect(response).await
    }

    async fn delete(&self, url: &str) -> DispatchResult<TransportResponse> {
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| DispatchError::Network(e.to_string()))?;

        self.collect(response).await
    }
}
