//! Dispatch registration client

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::{termination_signal, RegistrationHandle};
use crate::config::ClientConfig;
use crate::models::{DispatchError, DispatchResult, RegistrationRequest, RegistrationState};
use crate::net::{HostnameResolver, SystemResolver};
use crate::transport::{HttpClientTransport, HttpTransport};

const PORT_ENV: &str = "PORT";
const DEFAULT_PORT: &str = "3000";

/// Registration client for the Dispatch service registry.
///
/// Wraps an injectable HTTP transport and hostname resolver around the
/// registration state machine. Construction does no I/O; `register` drives
/// the full lifecycle.
pub struct DispatchClient {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
    resolver: Arc<dyn HostnameResolver>,
    state: Arc<RwLock<RegistrationState>>,
}

impl DispatchClient {
    /// Create a client for the given dispatcher URI with default settings.
    pub fn new(dispatcher_uri: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(dispatcher_uri))
    }

    /// Create a client from a full configuration.
    pub fn with_config(mut config: ClientConfig) -> Self {
        config.dispatcher_uri = crate::config::normalize_uri(config.dispatcher_uri);
        debug!("Dispatch client created for {}", config.dispatcher_uri);

        let transport = Arc::new(HttpClientTransport::new(config.http_timeout()));

        Self {
            config,
            transport,
            resolver: Arc::new(SystemResolver),
            state: Arc::new(RwLock::new(RegistrationState::Unregistered)),
        }
    }

    /// Replace the HTTP transport.
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the hostname resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn HostnameResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Snapshot of the current registration state.
    pub fn state(&self) -> RegistrationState {
        self.state.read().clone()
    }

    /// The normalized dispatcher base URI.
    pub fn dispatcher_uri(&self) -> &str {
        &self.config.dispatcher_uri
    }

    /// Register this process with the dispatcher.
    ///
    /// Resolves the endpoint (explicit values win over the `PORT` environment
    /// variable and DNS auto-discovery), issues the registration request, and
    /// on success starts the heartbeat loop and the termination listener.
    /// At most one registration may be active per client; a `Failed` client
    /// may retry.
    pub async fn register(
        &self,
        request: RegistrationRequest,
    ) -> DispatchResult<RegistrationHandle> {
        request.validate()?;

        {
            let mut state = self.state.write();
            if !state.can_register() {
                return Err(DispatchError::AlreadyRegistering);
            }
            *state = RegistrationState::Registering;
        }

        let port = match &request.port {
            Some(port) => port.clone(),
            None => std::env::var(PORT_ENV).unwrap_or_else(|_| DEFAULT_PORT.to_string()),
        };

        let hostname = match &request.hostname {
            Some(hostname) => hostname.clone(),
            None => match self.resolver.resolve().await {
                Ok(hostname) => hostname,
                Err(e) => return Err(self.fail(e)),
            },
        };

        let endpoint = format!("{}:{}", hostname, port);
        info!(
            "Registering service '{}' at {} with dispatcher {}",
            request.name, endpoint, self.config.dispatcher_uri
        );

        let body = serde_json::json!({
            "service": request.name,
            "endpoint": endpoint,
            "tags": request.tags,
        });

        let url = format!("{}/register", self.config.dispatcher_uri);
        let response = match self.transport.put_json(&url, &body).await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(e)),
        };

        if response.status != 200 {
            return Err(self.fail(DispatchError::rejected(response.status, response.body)));
        }

        #[derive(serde::Deserialize)]
        struct RegisterResponse {
            uuid: String,
        }

        let parsed: RegisterResponse = match serde_json::from_str(&response.body) {
            Ok(parsed) => parsed,
            Err(e) => {
                return Err(self.fail(DispatchError::Network(format!(
                    "invalid registration response: {}",
                    e
                ))));
            }
        };

        *self.state.write() = RegistrationState::Registered {
            uuid: parsed.uuid.clone(),
        };
        info!("Registered as [{}]", parsed.uuid);

        let handle = RegistrationHandle::new(
            parsed.uuid,
            self.config.dispatcher_uri.clone(),
            self.config.exit_code,
            Arc::clone(&self.transport),
            Arc::clone(&self.state),
        );
        handle.start_heartbeat(self.config.heartbeat_interval());

        if self.config.handle_termination_signals {
            let _ = handle.deregister_on(termination_signal());
        }

        Ok(handle)
    }

    fn fail(&self, err: DispatchError) -> DispatchError {
        error!("Registration failed: {}", err);
        *self.state.write() = RegistrationState::Failed {
            reason: err.to_string(),
        };
        err
    }
}

impl Clone for DispatchClient {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            transport: Arc::clone(&self.transport),
            resolver: Arc::clone(&self.resolver),
            state: Arc::clone(&self.state),
        }
    }
}

impl std::fmt::Debug for DispatchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchClient")
            .field("dispatcher_uri", &self.config.dispatcher_uri)
            .field("state", &*self.state.read())
            .finish()
    }
}
