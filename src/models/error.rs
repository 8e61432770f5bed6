//! Error types for the Dispatch client

use thiserror::Error;

/// Client errors
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("A registration is already in progress or active on this client")]
    AlreadyRegistering,

    #[error("Hostname resolution failed: {0}")]
    HostnameResolution(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Registration rejected by dispatcher (status {status}): {detail}")]
    RegistrationRejected { status: u16, detail: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DispatchError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        DispatchError::InvalidArgument(msg.into())
    }

    pub fn rejected(status: u16, detail: impl Into<String>) -> Self {
        DispatchError::RegistrationRejected {
            status,
            detail: detail.into(),
        }
    }
}

impl From<config::ConfigError> for DispatchError {
    fn from(err: config::ConfigError) -> Self {
        DispatchError::Config(err.to_string())
    }
}

/// Result type for client operations
pub type DispatchResult<T> = Result<T, DispatchError>;
