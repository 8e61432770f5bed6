//! Hostname resolver implementations

use async_trait::async_trait;

use crate::models::{DispatchError, DispatchResult};

/// Resolves the address this process should advertise to the dispatcher.
#[async_trait]
pub trait HostnameResolver: Send + Sync {
    /// Resolve the local endpoint hostname.
    async fn resolve(&self) -> DispatchResult<String>;
}

/// Resolver backed by the OS: looks up the local machine name and forward
/// resolves it through the system resolver, preferring an IPv4 address.
#[derive(Debug, Clone, Default)]
pub struct SystemResolver;

#[async_trait]
impl HostnameResolver for SystemResolver {
    async fn resolve(&self) -> DispatchResult<String> {
        let name = hostname::get()
            .map_err(|e| DispatchError::HostnameResolution(e.to_string()))?
            .into_string()
            .map_err(|_| {
                DispatchError::HostnameResolution("local hostname is not valid UTF-8".to_string())
            })?;

        let addrs: Vec<_> = tokio::net::lookup_host((name.as_str(), 0u16))
            .await
            .map_err(|e| {
                DispatchError::HostnameResolution(format!("lookup of {} failed: {}", name, e))
            })?
            .collect();

        let addr = addrs
            .iter()
            .find(|a| a.is_ipv4())
            .or_else(|| addrs.first())
            .ok_or_else(|| {
                DispatchError::HostnameResolution(format!("no addresses found for {}", name))
            })?;

        Ok(addr.ip().to_string())
    }
}

/// Resolver that always returns a fixed hostname.
#[derive(Debug, Clone)]
pub struct StaticResolver {
    hostname: String,
}

impl StaticResolver {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
        }
    }
}

#[async_trait]
impl HostnameResolver for StaticResolver {
    async fn resolve(&self) -> DispatchResult<String> {
        Ok(self.hostname.clone())
    }
}
