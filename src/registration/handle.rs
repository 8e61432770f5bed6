//! Handle to a live registration

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::heartbeat;
use crate::models::RegistrationState;
use crate::transport::HttpTransport;

/// Handle returned by a successful registration.
///
/// Exposes the dispatcher-assigned uuid and the deregistration paths. The
/// handle shares the client's state, so deregistering through it is visible
/// to the heartbeat loop and to any other clone of the handle.
pub struct RegistrationHandle {
    uuid: String,
    base_uri: String,
    exit_code: i32,
    transport: Arc<dyn HttpTransport>,
    state: Arc<RwLock<RegistrationState>>,
    heartbeat: Arc<Mutex<Option<tokio::task::JoinHandle<()>>>>,
    registered_at: DateTime<Utc>,
    last_heartbeat: Arc<RwLock<Option<DateTime<Utc>>>>,
}

impl RegistrationHandle {
    pub(crate) fn new(
        uuid: String,
        base_uri: String,
        exit_code: i32,
        transport: Arc<dyn HttpTransport>,
        state: Arc<RwLock<RegistrationState>>,
    ) -> Self {
        Self {
            uuid,
            base_uri,
            exit_code,
            transport,
            state,
            heartbeat: Arc::new(Mutex::new(None)),
            registered_at: Utc::now(),
            last_heartbeat: Arc::new(RwLock::new(None)),
        }
    }

    /// The uuid assigned by the dispatcher.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// When the registration was accepted.
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// When the last heartbeat was acknowledged, if any.
    pub fn last_heartbeat(&self) -> Option<DateTime<Utc>> {
        *self.last_heartbeat.read()
    }

    pub(crate) fn start_heartbeat(&self, interval: Duration) {
        let task = heartbeat::spawn(
            Arc::clone(&self.transport),
            self.base_uri.clone(),
            self.uuid.clone(),
            interval,
            Arc::clone(&self.state),
            Arc::clone(&self.last_heartbeat),
        );
        *self.heartbeat.lock() = Some(task);
    }

    /// Stop the heartbeat loop without deregistering.
    pub fn stop_heartbeat(&self) {
        if let Some(task) = self.heartbeat.lock().take() {
            task.abort();
        }
    }

    /// Deregister from the dispatcher.
    ///
    /// The first caller claims the registration and issues a single DELETE;
    /// concurrent and repeated calls are no-ops, so signal storms cannot
    /// produce duplicate requests. Failures are logged, never returned:
    /// termination must not be blocked on the dispatcher.
    pub async fn deregister(&self) {
        let uuid = {
            let mut state = self.state.write();
            match &*state {
                RegistrationState::Registered { uuid } => {
                    let uuid = uuid.clone();
                    *state = RegistrationState::Deregistering;
                    Some(uuid)
                }
                _ => None,
            }
        };

        let uuid = match uuid {
            Some(uuid) => uuid,
            None => {
                info!("No live registration, nothing to deregister");
                return;
            }
        };

        self.stop_heartbeat();

        let url = format!("{}/service/uuid/{}/", self.base_uri, uuid);
        match self.transport.delete(&url).await {
            Ok(response) if response.is_success() => {
                info!("Deregistered [{}] from service dispatch", uuid);
            }
            Ok(response) => {
                warn!(
                    "Deregistration of [{}] rejected: status {}",
                    uuid, response.status
                );
            }
            Err(e) => {
                warn!("Deregistration of [{}] failed: {}", uuid, e);
            }
        }
    }

    /// Deregister when `trigger` resolves, then exit the process.
    ///
    /// The exit status is the configured `exit_code` (non-zero by default),
    /// signalling a handled shutdown rather than success. Registration wires
    /// [`termination_signal`](super::termination_signal) through this when
    /// signal handling is enabled; supervised environments can pass their own
    /// shutdown future instead.
    pub fn deregister_on<F>(&self, trigger: F) -> tokio::task::JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = self.clone();
        tokio::spawn(async move {
            trigger.await;
            info!("Termination event caught, deregistering");
            handle.deregister().await;
            std::process::exit(handle.exit_code);
        })
    }
}

impl Clone for RegistrationHandle {
    fn clone(&self) -> Self {
        Self {
            uuid: self.uuid.clone(),
            base_uri: self.base_uri.clone(),
            exit_code: self.exit_code,
            transport: Arc::clone(&self.transport),
            state: Arc::clone(&self.state),
            heartbeat: Arc::clone(&self.heartbeat),
            registered_at: self.registered_at,
            last_heartbeat: Arc::clone(&self.last_heartbeat),
        }
    }
}

impl std::fmt::Debug for RegistrationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationHandle")
            .field("uuid", &self.uuid)
            .field("base_uri", &self.base_uri)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    fn registered_handle(transport: Arc<MockTransport>) -> RegistrationHandle {
        let state = Arc::new(RwLock::new(RegistrationState::Registered {
            uuid: "abc-123".to_string(),
        }));
        RegistrationHandle::new(
            "abc-123".to_string(),
            "http://dispatch.test:7000".to_string(),
            1,
            transport,
            state,
        )
    }

    #[tokio::test]
    async fn test_deregister_issues_single_delete() {
        let transport = Arc::new(MockTransport::new());
        let handle = registered_handle(Arc::clone(&transport));

        // Concurrent triggers: only the first claims the registration
        tokio::join!(handle.deregister(), handle.deregister());
        handle.deregister().await;

        assert_eq!(transport.deregister_calls(), 1);
        let calls = transport.calls();
        assert_eq!(calls[0].url, "http://dispatch.test:7000/service/uuid/abc-123/");
        assert_eq!(*handle.state.read(), RegistrationState::Deregistering);
    }

    #[tokio::test]
    async fn test_deregister_without_registration_makes_no_call() {
        let transport = Arc::new(MockTransport::new());
        let state = Arc::new(RwLock::new(RegistrationState::Unregistered));
        let handle = RegistrationHandle::new(
            "abc-123".to_string(),
            "http://dispatch.test:7000".to_string(),
            1,
            Arc::clone(&transport) as Arc<dyn HttpTransport>,
            state,
        );

        handle.deregister().await;

        assert_eq!(transport.calls().len(), 0);
    }

    #[tokio::test]
    async fn test_deregister_failure_is_swallowed() {
        let transport = Arc::new(MockTransport::new().with_deregister_failure());
        let handle = registered_handle(Arc::clone(&transport));

        handle.deregister().await;

        assert_eq!(transport.deregister_calls(), 1);
        assert_eq!(*handle.state.read(), RegistrationState::Deregistering);
    }
}
