//! Client configuration settings

use config::{Config, Environment};
use serde::Deserialize;
use std::time::Duration;

use crate::models::DispatchResult;

/// Dispatch client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URI of the dispatcher, without a trailing slash
    pub dispatcher_uri: String,
    /// Interval between heartbeats in milliseconds
    #[serde(default = "default_heartbeat_interval_ms")]
    pub heartbeat_interval_ms: u64,
    /// Timeout for each HTTP request in milliseconds
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,
    /// Exit status used when a termination signal drives deregistration
    #[serde(default = "default_exit_code")]
    pub exit_code: i32,
    /// Install OS signal handlers on successful registration
    #[serde(default = "default_true")]
    pub handle_termination_signals: bool,
}

fn default_heartbeat_interval_ms() -> u64 {
    15_000
}

fn default_http_timeout_ms() -> u64 {
    30_000
}

fn default_exit_code() -> i32 {
    1
}

fn default_true() -> bool {
    true
}

impl ClientConfig {
    /// Create a configuration for the given dispatcher URI with defaults.
    pub fn new(dispatcher_uri: impl Into<String>) -> Self {
        Self {
            dispatcher_uri: normalize_uri(dispatcher_uri.into()),
            heartbeat_interval_ms: default_heartbeat_interval_ms(),
            http_timeout_ms: default_http_timeout_ms(),
            exit_code: default_exit_code(),
            handle_termination_signals: default_true(),
        }
    }

    /// Load configuration from `DISPATCH_*` environment variables.
    ///
    /// `DISPATCH_DISPATCHER_URI` is required; `DISPATCH_HEARTBEAT_INTERVAL_MS`,
    /// `DISPATCH_HTTP_TIMEOUT_MS` and `DISPATCH_EXIT_CODE` override defaults.
    pub fn from_env() -> DispatchResult<Self> {
        let builder = Config::builder()
            .set_default("heartbeat_interval_ms", default_heartbeat_interval_ms())?
            .set_default("http_timeout_ms", default_http_timeout_ms())?
            .set_default("exit_code", default_exit_code() as i64)?
            .set_default("handle_termination_signals", true)?
            .add_source(Environment::with_prefix("DISPATCH"));

        let mut settings: ClientConfig = builder.build()?.try_deserialize()?;
        settings.dispatcher_uri = normalize_uri(settings.dispatcher_uri);
        Ok(settings)
    }

    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Disable the OS signal handlers installed on registration.
    ///
    /// Supervised environments (and tests) drive deregistration through
    /// [`RegistrationHandle::deregister_on`](crate::RegistrationHandle) or an
    /// explicit deregister call instead.
    pub fn without_signal_handlers(mut self) -> Self {
        self.handle_termination_signals = false;
        self
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }
}

pub(crate) fn normalize_uri(uri: String) -> String {
    uri.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("http://dispatch.local:7000");
        assert_eq!(config.dispatcher_uri, "http://dispatch.local:7000");
        assert_eq!(config.heartbeat_interval(), Duration::from_millis(15_000));
        assert_eq!(config.http_timeout(), Duration::from_millis(30_000));
        assert_eq!(config.exit_code, 1);
        assert!(config.handle_termination_signals);
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = ClientConfig::new("http://dispatch.local:7000/");
        assert_eq!(config.dispatcher_uri, "http://dispatch.local:7000");

        let config = ClientConfig::new("http://dispatch.local:7000///");
        assert_eq!(config.dispatcher_uri, "http://dispatch.local:7000");
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new("http://dispatch.local:7000")
            .with_heartbeat_interval(Duration::from_secs(5))
            .with_http_timeout(Duration::from_secs(10))
            .with_exit_code(42)
            .without_signal_handlers();

        assert_eq!(config.heartbeat_interval_ms, 5_000);
        assert_eq!(config.http_timeout_ms, 10_000);
        assert_eq!(config.exit_code, 42);
        assert!(!config.handle_termination_signals);
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("DISPATCH_DISPATCHER_URI", "http://dispatch.env:7000/");
        std::env::set_var("DISPATCH_HEARTBEAT_INTERVAL_MS", "2000");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.dispatcher_uri, "http://dispatch.env:7000");
        assert_eq!(config.heartbeat_interval_ms, 2_000);
        assert_eq!(config.http_timeout_ms, 30_000);

        std::env::remove_var("DISPATCH_DISPATCHER_URI");
        std::env::remove_var("DISPATCH_HEARTBEAT_INTERVAL_MS");
    }
}
