//! Registration lifecycle state

/// State of a client's registration with the dispatcher.
///
/// A client starts `Unregistered`, moves through `Registering` while the
/// registration round trip is in flight, and lands in `Registered` or
/// `Failed`. `Deregistering` is terminal: the first deregistration trigger
/// claims it, which keeps the DELETE exactly-once under concurrent signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationState {
    Unregistered,
    Registering,
    Registered { uuid: String },
    Deregistering,
    Failed { reason: String },
}

impl RegistrationState {
    /// Whether the client currently holds a live registration.
    pub fn is_registered(&self) -> bool {
        matches!(self, RegistrationState::Registered { .. })
    }

    /// The dispatcher-assigned uuid, if registered.
    pub fn uuid(&self) -> Option<&str> {
        match self {
            RegistrationState::Registered { uuid } => Some(uuid),
            _ => None,
        }
    }

    /// Whether a new registration attempt may start from this state.
    pub fn can_register(&self) -> bool {
        matches!(
            self,
            RegistrationState::Unregistered | RegistrationState::Failed { .. }
        )
    }
}

impl Default for RegistrationState {
    fn default() -> Self {
        RegistrationState::Unregistered
    }
}
