//! Dispatch Client - Service Registration for the Dispatch Registry
//!
//! A client library for the Dispatch service registry, providing:
//! - Service registration with hostname/port auto-discovery
//! - Periodic liveness heartbeats
//! - Deregistration on process termination
//!
//! The registration lifecycle is a small state machine wrapping an
//! injectable HTTP transport, so the dispatcher can be mocked in tests.

pub mod config;
pub mod models;
pub mod net;
pub mod registration;
pub mod transport;

// Re-export commonly used types
pub use config::ClientConfig;
pub use models::{DispatchError, DispatchResult, RegistrationRequest, RegistrationState};
pub use net::{HostnameResolver, StaticResolver, SystemResolver};
pub use registration::{termination_signal, DispatchClient, RegistrationHandle};
pub use transport::{HttpClientTransport, HttpTransport, MockTransport, TransportResponse};

/// Version of the dispatch client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
