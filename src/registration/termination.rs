//! Termination-event sources
//!
//! Deregistration is driven by an abstract termination event, not by OS
//! signal names: [`RegistrationHandle::deregister_on`] accepts any future,
//! and [`termination_signal`] is the default source wired up on
//! registration.
//!
//! [`RegistrationHandle::deregister_on`]: crate::RegistrationHandle::deregister_on

use tracing::warn;

/// Resolves when the process receives a standard termination signal.
///
/// Listens for SIGHUP, SIGINT, SIGQUIT, SIGILL, SIGTRAP, SIGABRT, SIGBUS,
/// SIGFPE, SIGUSR1, SIGSEGV, SIGUSR2 and SIGTERM. Signals the OS refuses a
/// handler for are logged and skipped.
#[cfg(unix)]
pub async fn termination_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let kinds = [
        SignalKind::hangup(),
        SignalKind::interrupt(),
        SignalKind::quit(),
        SignalKind::from_raw(libc::SIGILL),
        SignalKind::from_raw(libc::SIGTRAP),
        SignalKind::from_raw(libc::SIGABRT),
        SignalKind::from_raw(libc::SIGBUS),
        SignalKind::from_raw(libc::SIGFPE),
        SignalKind::user_defined1(),
        SignalKind::from_raw(libc::SIGSEGV),
        SignalKind::user_defined2(),
        SignalKind::terminate(),
    ];

    let mut streams = Vec::new();
    for kind in kinds {
        match signal(kind) {
            Ok(stream) => streams.push(stream),
            Err(e) => warn!("Failed to install handler for signal {:?}: {}", kind, e),
        }
    }

    if streams.is_empty() {
        warn!("No termination signal handlers could be installed");
        return std::future::pending::<()>().await;
    }

    let recvs: Vec<_> = streams.iter_mut().map(|s| Box::pin(s.recv())).collect();
    futures::future::select_all(recvs).await;
}

/// Resolves when the process receives ctrl-c.
#[cfg(not(unix))]
pub async fn termination_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
